//! Registration and login routes.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;

use biostart_core::user::{AdminLoginOutput, Credentials, LoginOutput, NewAdmin, NewUser};
use biostart_core::{RawFields, RecordId};

use crate::error::ApiError;
use crate::state::AppState;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/registro", post(register))
        .route("/login", post(login))
        .route("/admin-registro", post(register_admin))
        .route("/admin-login", post(login_admin))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisteredResponse {
    success: bool,
    record_id: RecordId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    success: bool,
    user: RawFields,
    record_id: RecordId,
    completed_content_ids: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AdminLoginResponse {
    success: bool,
    is_admin: bool,
    admin: RawFields,
    record_id: RecordId,
}

async fn register(
    State(state): State<AppState>,
    Json(new_user): Json<NewUser>,
) -> Result<Json<RegisteredResponse>, ApiError> {
    let record_id = state.auth.register(new_user).await?;
    Ok(Json(RegisteredResponse {
        success: true,
        record_id,
    }))
}

async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<LoginResponse>, ApiError> {
    let LoginOutput {
        record_id,
        user,
        completed_content_ids,
    } = state.auth.login(credentials).await?;
    Ok(Json(LoginResponse {
        success: true,
        user,
        record_id,
        completed_content_ids,
    }))
}

async fn register_admin(
    State(state): State<AppState>,
    Json(new_admin): Json<NewAdmin>,
) -> Result<Json<RegisteredResponse>, ApiError> {
    let record_id = state.auth.register_admin(new_admin).await?;
    Ok(Json(RegisteredResponse {
        success: true,
        record_id,
    }))
}

async fn login_admin(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<AdminLoginResponse>, ApiError> {
    let AdminLoginOutput { record_id, admin } = state.auth.login_admin(credentials).await?;
    Ok(Json(AdminLoginResponse {
        success: true,
        is_admin: true,
        admin,
        record_id,
    }))
}
