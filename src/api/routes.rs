//! Router construction.

use axum::{Router, middleware};
use tower_http::catch_panic::CatchPanicLayer;

use crate::api::dispatch::dispatch;
use crate::api::middleware::{handle_panic, logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Builds the router shared by the HTTP and HTTPS listeners.
///
/// There are no per-path routes: every request reaches [`dispatch`], which
/// routes on the trimmed path itself. Layers run outermost first: panic
/// catcher, request id, then logging.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .fallback(dispatch)
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}
