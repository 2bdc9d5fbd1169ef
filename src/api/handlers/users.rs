//! `users` resource: create, read, update and delete user accounts.
//!
//! Updates and deletes carry no ownership check; any caller that knows a
//! phone number may change or remove that account.

use axum::http::StatusCode;

use super::{method_not_allowed, missing_required_field};
use crate::api::context::RequestContext;
use crate::api::dto::{CreateUserRequest, PhoneQuery, UpdateUserRequest};
use crate::api::reply::Reply;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::utils::validate::{from_payload, from_query};

pub async fn handle(state: &AppState, ctx: &RequestContext) -> AppResult<Reply> {
    match ctx.method.as_str() {
        "post" => create_user(state, ctx).await,
        "get" => get_user(state, ctx).await,
        "put" => update_user(state, ctx).await,
        "delete" => delete_user(state, ctx).await,
        other => Err(method_not_allowed(other)),
    }
}

/// Required payload: firstName, lastName, phone, password, tosAgreement.
async fn create_user(state: &AppState, ctx: &RequestContext) -> AppResult<Reply> {
    let request: CreateUserRequest = from_payload(&ctx.payload)?;
    let new_user = request
        .into_new_user()
        .ok_or_else(|| AppError::validation("Missing required fields", Vec::new()))?;

    state.services.users.create_user(new_user).await?;
    Ok(Reply::ok())
}

/// Required query: phone.
async fn get_user(state: &AppState, ctx: &RequestContext) -> AppResult<Reply> {
    let phone = phone_from_query(ctx)?;
    let profile = state.services.users.get_user(&phone).await?;
    Reply::json(StatusCode::OK, &profile)
}

/// Required payload: phone. At least one of firstName, lastName, password.
async fn update_user(state: &AppState, ctx: &RequestContext) -> AppResult<Reply> {
    let request: UpdateUserRequest =
        from_payload(&ctx.payload).map_err(missing_required_field)?;
    if !request.has_changes() {
        return Err(AppError::validation("Missing fields to update", Vec::new()));
    }

    let (phone, changes) = request
        .into_changes()
        .ok_or_else(|| AppError::validation("Missing required field", vec!["phone".into()]))?;

    state.services.users.update_user(&phone, changes).await?;
    Ok(Reply::ok())
}

/// Required query: phone.
async fn delete_user(state: &AppState, ctx: &RequestContext) -> AppResult<Reply> {
    let phone = phone_from_query(ctx)?;
    state.services.users.delete_user(&phone).await?;
    Ok(Reply::ok())
}

fn phone_from_query(ctx: &RequestContext) -> AppResult<String> {
    let query: PhoneQuery = from_query(&ctx.query).map_err(missing_required_field)?;
    query
        .phone
        .ok_or_else(|| AppError::validation("Missing required field", vec!["phone".into()]))
}
