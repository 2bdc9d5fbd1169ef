//! Handler replies and their normalization into HTTP responses.

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{AppError, AppResult};

/// What a handler hands back to the dispatcher.
///
/// Both parts are optional; [`Reply::normalize`] fills in a 200 status and an
/// empty object so every response on the wire is a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reply {
    pub status: Option<u16>,
    pub payload: Option<Value>,
}

impl Reply {
    /// 200 with an empty object.
    pub fn ok() -> Self {
        Self::status(StatusCode::OK)
    }

    /// A bare status with no payload.
    pub fn status(status: StatusCode) -> Self {
        Self {
            status: Some(status.as_u16()),
            payload: None,
        }
    }

    /// A status with a serialized payload.
    pub fn json<T: Serialize>(status: StatusCode, payload: &T) -> AppResult<Self> {
        let payload = serde_json::to_value(payload)
            .map_err(|e| AppError::internal("Could not serialize the response", e))?;
        Ok(Self {
            status: Some(status.as_u16()),
            payload: Some(payload),
        })
    }

    /// Resolves the defaults: an absent or out-of-range status becomes 200,
    /// an absent or non-object payload becomes `{}`.
    pub fn normalize(self) -> (StatusCode, Map<String, Value>) {
        let status = self
            .status
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::OK);
        let payload = match self.payload {
            Some(Value::Object(object)) => object,
            _ => Map::new(),
        };
        (status, payload)
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        let (status, payload) = self.normalize();
        let body = Value::Object(payload).to_string();

        // Response bodies may hold token ids and are logged at debug only
        tracing::info!(status = status.as_u16(), "Returning response");
        tracing::debug!(payload = %body, "Response payload");

        (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response()
    }
}
