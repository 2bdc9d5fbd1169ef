//! User-related DTOs.

use serde::Deserialize;
use validator::Validate;

use crate::models::{NewUser, UserChanges};
use crate::utils::validate::{must_be_true, non_empty_string, strictly_true, trimmed_string};

/// Payload for creating a user. Every field is required.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(default, deserialize_with = "non_empty_string")]
    #[validate(required)]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    #[validate(required)]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "trimmed_string")]
    #[validate(required, length(equal = 10))]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    #[validate(required)]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "strictly_true")]
    #[validate(custom(function = "must_be_true"))]
    pub tos_agreement: bool,
}

impl CreateUserRequest {
    /// Converts a validated request into the model used for creation.
    ///
    /// Returns `None` if a required field is absent, which cannot happen
    /// once `validate()` has passed.
    pub fn into_new_user(self) -> Option<NewUser> {
        Some(NewUser {
            first_name: self.first_name?,
            last_name: self.last_name?,
            phone: self.phone?,
            password: self.password?,
        })
    }
}

/// Payload for updating a user.
///
/// `phone` selects the record. The other fields are optional; a field that
/// is blank or of the wrong type is treated as not supplied.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default, deserialize_with = "trimmed_string")]
    #[validate(required, length(equal = 10))]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub password: Option<String>,
}

impl UpdateUserRequest {
    /// Whether at least one updatable field was supplied
    pub fn has_changes(&self) -> bool {
        self.first_name.is_some() || self.last_name.is_some() || self.password.is_some()
    }

    /// Splits the request into the target phone and the requested changes.
    pub fn into_changes(self) -> Option<(String, UserChanges)> {
        let changes = UserChanges {
            first_name: self.first_name,
            last_name: self.last_name,
            password: self.password,
        };
        Some((self.phone?, changes))
    }
}

/// `?phone=` query parameter used by read and delete.
#[derive(Debug, Deserialize, Validate)]
pub struct PhoneQuery {
    #[serde(default, deserialize_with = "trimmed_string")]
    #[validate(required, length(equal = 10))]
    pub phone: Option<String>,
}
