//! Liveness and fallback handlers.

use crate::api::context::RequestContext;
use crate::api::reply::Reply;
use crate::error::{AppError, AppResult};

/// Answers 200 `{}` whatever the method.
pub fn ping(_ctx: &RequestContext) -> AppResult<Reply> {
    Ok(Reply::ok())
}

/// Anything outside the route table.
pub fn not_found(ctx: &RequestContext) -> AppResult<Reply> {
    Err(AppError::NotFound {
        entity: "route".to_string(),
        field: "path".to_string(),
        value: ctx.path.clone(),
    })
}
