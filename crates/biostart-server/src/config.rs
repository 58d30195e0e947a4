//! Environment-driven configuration.
//!
//! Read once at startup into an immutable struct; nothing reads the
//! environment after that.

use std::env;

use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 3001;

/// Startup configuration for the gateway process.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub airtable_api_key: String,
    pub airtable_base_id: String,
    pub firebase_project_id: String,
    pub firebase_api_key: String,
    pub gemini_api_key: String,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("PORT is not a valid port number: {raw:?}"))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            port,
            airtable_api_key: required("AIRTABLE_API_KEY")?,
            airtable_base_id: required("AIRTABLE_BASE_ID")?,
            firebase_project_id: required("FIREBASE_PROJECT_ID")?,
            firebase_api_key: required("FIREBASE_API_KEY")?,
            gemini_api_key: required("GEMINI_API_KEY")?,
        })
    }
}

fn required(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("missing required environment variable {name}"))
}
