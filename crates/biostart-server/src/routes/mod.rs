//! Route table and handlers.

mod ai;
mod auth;
mod content;
mod users;

use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .merge(content::routes())
        .merge(auth::routes())
        .merge(users::routes())
        .merge(ai::routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    message: &'static str,
}

async fn health() -> Json<Health> {
    Json(Health {
        status: "Server is running",
        message: "Hello from BioStart Backend!",
    })
}
