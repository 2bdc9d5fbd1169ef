//! Resource handlers invoked by the dispatcher.
//!
//! Each handler sub-dispatches on the lower-cased method and returns a
//! [`Reply`](crate::api::reply::Reply) or an `AppError`.

pub mod ping;
pub mod tokens;
pub mod users;

use crate::error::AppError;

/// Rewords a validation failure for endpoints that take a single field.
fn missing_required_field(error: AppError) -> AppError {
    match error {
        AppError::Validation { fields, .. } => AppError::validation("Missing required field", fields),
        other => other,
    }
}

fn method_not_allowed(method: &str) -> AppError {
    AppError::MethodNotAllowed {
        method: method.to_string(),
    }
}
