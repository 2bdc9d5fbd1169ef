//! Request ID middleware.
//!
//! Reuses a client-supplied `x-request-id` when it is a printable header
//! value, otherwise generates a UUID v4. The id is stored in the request
//! extensions for the logging middleware and echoed on the response.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest client-supplied id that is reused as is.
const MAX_REQUEST_ID_LEN: usize = 128;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(pub String);

pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = incoming_request_id(&request).unwrap_or_else(|| Uuid::new_v4().to_string());

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    response
}

fn incoming_request_id(request: &Request) -> Option<String> {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty() && id.len() <= MAX_REQUEST_ID_LEN)
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with(id: Option<&str>) -> Request {
        let mut builder = Request::builder().uri("/ping");
        if let Some(id) = id {
            builder = builder.header(REQUEST_ID_HEADER, id);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_incoming_id_is_reused() {
        let request = request_with(Some("abc-123"));
        assert_eq!(incoming_request_id(&request).as_deref(), Some("abc-123"));
    }

    #[test]
    fn test_blank_or_oversized_id_is_ignored() {
        assert!(incoming_request_id(&request_with(None)).is_none());
        assert!(incoming_request_id(&request_with(Some("   "))).is_none());

        let long = "a".repeat(MAX_REQUEST_ID_LEN + 1);
        assert!(incoming_request_id(&request_with(Some(&long))).is_none());
    }
}
