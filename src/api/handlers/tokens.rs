//! `tokens` resource. Only issuance is defined; the other methods of the
//! resource answer 501.

use axum::http::StatusCode;

use super::method_not_allowed;
use crate::api::context::RequestContext;
use crate::api::dto::CreateTokenRequest;
use crate::api::reply::Reply;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::utils::validate::from_payload;

pub async fn handle(state: &AppState, ctx: &RequestContext) -> AppResult<Reply> {
    match ctx.method.as_str() {
        "post" => create_token(state, ctx).await,
        "get" | "put" | "delete" => Err(AppError::NotImplemented {
            operation: format!("tokens.{}", ctx.method),
        }),
        other => Err(method_not_allowed(other)),
    }
}

/// Required payload: phone, password. Replies with the issued token.
async fn create_token(state: &AppState, ctx: &RequestContext) -> AppResult<Reply> {
    let request: CreateTokenRequest = from_payload(&ctx.payload)?;
    let (Some(phone), Some(password)) = (request.phone, request.password) else {
        return Err(AppError::validation("Missing required fields", Vec::new()));
    };

    let token = state.services.tokens.create_token(&phone, &password).await?;
    Reply::json(StatusCode::OK, &token)
}
