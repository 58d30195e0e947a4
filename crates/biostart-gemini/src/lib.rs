//! biostart-gemini - Gemini generative-text client.
//!
//! Implements [`TextGenerator`](biostart_core::TextGenerator) against the
//! Gemini `generateContent` endpoint. One attempt per call, no retries; a
//! response without the expected text field surfaces as
//! [`Error::InvalidResponse`](biostart_core::Error::InvalidResponse).

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};
use url::Url;

use biostart_core::traits::TextGenerator;
use biostart_core::{Error, Result, UpstreamError};

const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com";
const MODEL: &str = "gemini-2.0-flash";

/// Per-request timeout. Generation calls are slow but must still bound the
/// serving task.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Gemini client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    /// API host; overridable for tests against a mock server.
    pub api_url: Url,
}

impl GeminiConfig {
    /// Configuration against the public Gemini API.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
        }
    }

    /// Point the client at a different host.
    pub fn with_api_url(mut self, api_url: Url) -> Self {
        self.api_url = api_url;
        self
    }
}

/// A text generator backed by the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_url: Url,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiClient {
    /// Create a client for the configured key.
    pub fn new(config: GeminiConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("biostart/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            api_url: config.api_url,
            api_key: config.api_key,
        }
    }

    /// URL for `generateContent`; the key travels as a query parameter.
    fn generate_url(&self) -> Url {
        let mut url = self.api_url.clone();
        let model_call = format!("{MODEL}:generateContent");
        url.path_segments_mut()
            .expect("API URL is a valid base")
            .extend(["v1beta", "models", model_call.as_str()]);
        url.query_pairs_mut().append_pair("key", &self.api_key);
        url
    }
}

/// Pull the first candidate's first text part out of a response.
fn extract_text(response: GenerateResponse) -> Result<String> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .ok_or_else(|| {
            Error::InvalidResponse("generation response carried no text candidate".to_string())
        })
}

/// Gemini error bodies are `{"error": {"code", "message", "status"}}`.
async fn status_error(response: reqwest::Response) -> Error {
    let status = response.status().as_u16();
    let detail = response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|body| {
            body.get("error")?
                .get("message")?
                .as_str()
                .map(str::to_string)
        });
    UpstreamError::status(status, detail).into()
}

fn transport_error(err: reqwest::Error) -> Error {
    let upstream = if err.is_timeout() {
        UpstreamError::Timeout {
            duration_ms: REQUEST_TIMEOUT.as_millis() as u64,
        }
    } else if err.is_connect() {
        UpstreamError::Connection {
            message: err.to_string(),
        }
    } else {
        UpstreamError::Http {
            message: err.to_string(),
        }
    };
    upstream.into()
}

#[async_trait]
impl TextGenerator for GeminiClient {
    #[instrument(skip(self, prompt))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!(model = MODEL, prompt_chars = prompt.len(), "generating text");
        let request = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.generate_url())
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        trace!(status = %status, "generation response");
        if !status.is_success() {
            return Err(status_error(response).await);
        }

        let body: GenerateResponse = response.json().await.map_err(transport_error)?;
        extract_text(body)
    }
}
