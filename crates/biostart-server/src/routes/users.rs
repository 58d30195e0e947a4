//! Per-user checklist state routes.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use biostart_core::RecordId;

use crate::error::ApiError;
use crate::state::AppState;

pub(super) fn routes() -> Router<AppState> {
    Router::new().route("/user/:user_id/checklist", get(checklist).post(save_checklist))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChecklistResponse {
    success: bool,
    checklist_state: Map<String, Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SaveChecklistRequest {
    #[serde(default)]
    checklist_state: Value,
    #[serde(default)]
    progress: f64,
}

#[derive(Serialize)]
struct SavedResponse {
    success: bool,
    message: &'static str,
}

async fn checklist(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ChecklistResponse>, ApiError> {
    let checklist_state = state
        .users
        .checklist_state(&RecordId::from(user_id))
        .await?;
    Ok(Json(ChecklistResponse {
        success: true,
        checklist_state,
    }))
}

async fn save_checklist(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(request): Json<SaveChecklistRequest>,
) -> Result<Json<SavedResponse>, ApiError> {
    state
        .users
        .save_checklist(
            &RecordId::from(user_id),
            &request.checklist_state,
            request.progress,
        )
        .await?;
    Ok(Json(SavedResponse {
        success: true,
        message: "Progresso do checklist guardado.",
    }))
}
