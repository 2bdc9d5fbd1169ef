//! Request parsing for the dispatcher.
//!
//! Every inbound request is reduced to a [`RequestContext`] before routing.
//! Parsing never rejects: a missing, unreadable or non-object body becomes an
//! empty payload and the handlers decide what is missing.

use std::collections::HashMap;
use std::convert::Infallible;

use axum::extract::{FromRequest, Query, Request};
use axum::http::{HeaderMap, Uri};
use serde_json::{Map, Value};

use crate::state::AppState;

/// Everything a handler may look at.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Path with every leading and trailing `/` removed; this is the routing key
    pub path: String,
    /// Query parameters; a repeated key keeps its last value
    pub query: HashMap<String, String>,
    /// Lower-cased method token
    pub method: String,
    pub headers: HeaderMap,
    /// Request body if it parsed to a JSON object, otherwise empty
    pub payload: Map<String, Value>,
}

impl FromRequest<AppState> for RequestContext {
    type Rejection = Infallible;

    async fn from_request(request: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let (parts, body) = request.into_parts();

        let payload = match axum::body::to_bytes(body, state.max_body_bytes).await {
            Ok(bytes) => parse_payload(&bytes),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read request body, using an empty payload");
                Map::new()
            }
        };

        Ok(Self {
            path: trim_path(parts.uri.path()),
            query: parse_query(&parts.uri),
            method: parts.method.as_str().to_ascii_lowercase(),
            headers: parts.headers,
            payload,
        })
    }
}

/// Strips all leading and trailing slashes: `/users/` and `users` route alike.
pub fn trim_path(path: &str) -> String {
    path.trim_matches('/').to_string()
}

fn parse_query(uri: &Uri) -> HashMap<String, String> {
    match Query::<HashMap<String, String>>::try_from_uri(uri) {
        Ok(Query(query)) => query,
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring malformed query string");
            HashMap::new()
        }
    }
}

/// Decodes the body as lossy UTF-8 and keeps it only if it is a JSON object.
pub fn parse_payload(bytes: &[u8]) -> Map<String, Value> {
    if bytes.is_empty() {
        return Map::new();
    }

    let text = String::from_utf8_lossy(bytes);
    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Object(object)) => object,
        Ok(_) => Map::new(),
        Err(e) => {
            tracing::debug!(error = %e, "Request body is not valid JSON, using an empty payload");
            Map::new()
        }
    }
}
