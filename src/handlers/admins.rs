use crate::AppState;
use crate::db::admin::AdminRepository;
use crate::error::AppResult;
use crate::forms::{ResetPasswordForm, SignupForm};
use crate::models::Admin;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

/// Register a new administrator
pub async fn handle_signup(
    State(state): State<Arc<AppState>>,
    Json(form): Json<SignupForm>,
) -> AppResult<(StatusCode, Json<Admin>)> {
    let admins = AdminRepository::new(state.db_pool.clone());
    let admin = form.signup(&admins).await?;
    Ok((StatusCode::CREATED, Json(admin)))
}

pub async fn handle_reset_password(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(form): Json<ResetPasswordForm>,
) -> AppResult<Json<Value>> {
    let admins = AdminRepository::new(state.db_pool.clone());
    let saved = form.reset_password(&admins, id).await?;
    Ok(Json(json!({ "saved": saved })))
}
