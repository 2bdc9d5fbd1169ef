//! Request dispatcher: static route table plus the single fallback handler
//! that serves every request on both listeners.

use axum::extract::State;
use axum::response::{IntoResponse, Response};

use crate::api::context::RequestContext;
use crate::api::handlers;
use crate::api::reply::Reply;
use crate::state::AppState;

/// Routable resources, keyed by trimmed path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Ping,
    Users,
    Tokens,
}

const ROUTES: [(&str, Route); 3] = [
    ("ping", Route::Ping),
    ("users", Route::Users),
    ("tokens", Route::Tokens),
];

impl Route {
    /// Exact, case-sensitive lookup of a routing key.
    pub fn resolve(key: &str) -> Option<Self> {
        ROUTES
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, route)| *route)
    }
}

pub async fn dispatch(State(state): State<AppState>, ctx: RequestContext) -> Response {
    let result = match Route::resolve(&ctx.path) {
        Some(Route::Ping) => handlers::ping::ping(&ctx),
        Some(Route::Users) => handlers::users::handle(&state, &ctx).await,
        Some(Route::Tokens) => handlers::tokens::handle(&state, &ctx).await,
        None => handlers::ping::not_found(&ctx),
    };

    result.unwrap_or_else(Reply::from).into_response()
}
