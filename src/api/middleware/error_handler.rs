//! Conversion of `AppError` into replies, plus the panic fallback.
//!
//! Client-facing errors carry `{"Error": message}`. Not-found and
//! method-not-allowed answer with an empty object. Internal failures log
//! their source and send only the summary message.

use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use crate::api::dto::ErrorResponse;
use crate::api::reply::Reply;
use crate::error::AppError;

impl From<AppError> for Reply {
    fn from(error: AppError) -> Self {
        let status = error_to_status_code(&error);

        let message = match &error {
            AppError::Validation { message, fields } => {
                tracing::debug!(fields = ?fields, "{message}");
                Some(message.clone())
            }
            AppError::Conflict { message } | AppError::BadRequest { message } => {
                Some(message.clone())
            }
            AppError::NotImplemented { operation } => {
                tracing::debug!(operation = %operation, "Unimplemented operation requested");
                Some("Not implemented".to_string())
            }
            AppError::NotFound { .. } | AppError::MethodNotAllowed { .. } => {
                tracing::debug!(error = %error, "Request rejected");
                None
            }
            AppError::Internal { message, source } => {
                tracing::error!(error = ?source, "{message}");
                Some(message.clone())
            }
        };

        Reply {
            status: Some(status.as_u16()),
            payload: message.map(error_payload),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        Reply::from(self).into_response()
    }
}

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::Validation { .. } => StatusCode::BAD_REQUEST,
        AppError::Conflict { .. } => StatusCode::BAD_REQUEST,
        AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        AppError::NotImplemented { .. } => StatusCode::NOT_IMPLEMENTED,
        AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_payload(message: String) -> Value {
    serde_json::to_value(ErrorResponse::new(&message))
        .unwrap_or_else(|_| Value::Object(Default::default()))
}

/// Panic handler for `CatchPanicLayer`: a panicking handler still produces
/// a well-formed JSON 500.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!(panic = %detail, "Handler panicked");

    Reply {
        status: Some(StatusCode::INTERNAL_SERVER_ERROR.as_u16()),
        payload: Some(error_payload("Internal server error".to_string())),
    }
    .into_response()
}
