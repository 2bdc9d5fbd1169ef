//! Token-related DTOs.

use serde::Deserialize;
use validator::Validate;

use crate::utils::validate::{non_empty_string, trimmed_string};

/// Credentials exchanged for a session token.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTokenRequest {
    #[serde(default, deserialize_with = "trimmed_string")]
    #[validate(required, length(equal = 10))]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    #[validate(required)]
    pub password: Option<String>,
}
