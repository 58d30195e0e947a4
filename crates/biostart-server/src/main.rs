//! Gateway process entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use biostart_airtable::{AirtableConfig, AirtableStore};
use biostart_firestore::{FirestoreConfig, FirestoreStore};
use biostart_gemini::{GeminiClient, GeminiConfig};
use biostart_server::config::Config;
use biostart_server::routes;
use biostart_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before reading the environment; ignore a missing file.
    let _ = dotenvy::dotenv();
    init_logging();

    let config = Config::from_env()?;
    info!(
        port = config.port,
        airtable_base = %config.airtable_base_id,
        firebase_project = %config.firebase_project_id,
        "configuration loaded"
    );

    let users = Arc::new(AirtableStore::new(AirtableConfig::new(
        &config.airtable_api_key,
        &config.airtable_base_id,
    )));
    let content = Arc::new(FirestoreStore::new(FirestoreConfig::new(
        &config.firebase_project_id,
        &config.firebase_api_key,
    )));
    let generator = Arc::new(GeminiClient::new(GeminiConfig::new(&config.gemini_api_key)));

    let app = routes::router(AppState::new(content, users, generator));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .await
        .context("server terminated")
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}
