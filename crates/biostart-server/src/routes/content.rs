//! Content CRUD routes.
//!
//! One generic handler set serves all three content types; the route table
//! pins the type parameter per path.

use axum::extract::{Path, State};
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde::Serialize;

use biostart_core::content::ContentSchema;
use biostart_core::{Checklist, EducationalText, Quiz, RawFields, RecordId};

use crate::error::ApiError;
use crate::state::AppState;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/content/educational-texts",
            get(list::<EducationalText>).post(create::<EducationalText>),
        )
        .route(
            "/content/educational-texts/:id",
            patch(update::<EducationalText>).delete(remove::<EducationalText>),
        )
        .route(
            "/content/quizzes",
            get(list::<Quiz>).post(create::<Quiz>),
        )
        .route(
            "/content/quizzes/:id",
            patch(update::<Quiz>).delete(remove::<Quiz>),
        )
        .route(
            "/content/checklists",
            get(list::<Checklist>).post(create::<Checklist>),
        )
        .route(
            "/content/checklists/:id",
            patch(update::<Checklist>).delete(remove::<Checklist>),
        )
}

#[derive(Serialize)]
struct ListResponse<C> {
    success: bool,
    data: Vec<C>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatedResponse {
    success: bool,
    record_id: RecordId,
}

#[derive(Serialize)]
struct UpdatedResponse {
    success: bool,
    data: RawFields,
}

#[derive(Serialize)]
struct DeletedResponse {
    success: bool,
}

async fn list<C: ContentSchema + Serialize + 'static>(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<C>>, ApiError> {
    let data = state.content.list::<C>().await?;
    Ok(Json(ListResponse {
        success: true,
        data,
    }))
}

async fn create<C: ContentSchema + 'static>(
    State(state): State<AppState>,
    Json(draft): Json<C::Draft>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let record_id = state.content.create::<C>(draft).await?;
    Ok(Json(CreatedResponse {
        success: true,
        record_id,
    }))
}

async fn update<C: ContentSchema + 'static>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<C::Patch>,
) -> Result<Json<UpdatedResponse>, ApiError> {
    let data = state
        .content
        .update::<C>(&RecordId::from(id), patch)
        .await?;
    Ok(Json(UpdatedResponse {
        success: true,
        data,
    }))
}

async fn remove<C: ContentSchema + 'static>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError> {
    state.content.delete::<C>(&RecordId::from(id)).await?;
    Ok(Json(DeletedResponse { success: true }))
}
