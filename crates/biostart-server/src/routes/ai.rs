//! Generative-text routes.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

pub(super) fn routes() -> Router<AppState> {
    Router::new()
        .route("/generate-content-ai", post(generate_content))
        .route("/generate-quiz-questions-ai", post(generate_quiz_questions))
}

#[derive(Deserialize)]
struct TopicRequest {
    #[serde(default)]
    topic: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedTextResponse {
    success: bool,
    generated_text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedQuestionsResponse {
    success: bool,
    /// Raw model output; the frontend parses it as a question array.
    generated_questions: String,
}

async fn generate_content(
    State(state): State<AppState>,
    Json(request): Json<TopicRequest>,
) -> Result<Json<GeneratedTextResponse>, ApiError> {
    let generated_text = state.generation.educational_text(&request.topic).await?;
    Ok(Json(GeneratedTextResponse {
        success: true,
        generated_text,
    }))
}

async fn generate_quiz_questions(
    State(state): State<AppState>,
    Json(request): Json<TopicRequest>,
) -> Result<Json<GeneratedQuestionsResponse>, ApiError> {
    let generated_questions = state.generation.quiz_questions(&request.topic).await?;
    Ok(Json(GeneratedQuestionsResponse {
        success: true,
        generated_questions,
    }))
}
