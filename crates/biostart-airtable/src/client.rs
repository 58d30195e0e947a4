//! Authenticated HTTP client for the Airtable REST API.

use std::time::Duration;

use reqwest::Response;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::trace;
use url::Url;

use biostart_core::{Error, Result, UpstreamError};

/// Per-request timeout. Calls that hang must not hold a serving task
/// indefinitely.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Bearer-authenticated JSON client. One attempt per call, no retries.
#[derive(Debug, Clone)]
pub(crate) struct ApiClient {
    client: reqwest::Client,
    api_key: String,
}

impl ApiClient {
    pub(crate) fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("biostart/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            api_key: api_key.into(),
        }
    }

    pub(crate) async fn get(&self, url: Url, query: &[(&str, &str)]) -> Result<Response> {
        self.client
            .get(url)
            .query(query)
            .headers(self.auth_headers())
            .send()
            .await
            .map_err(transport_error)
    }

    pub(crate) async fn post_json<B: Serialize>(&self, url: Url, body: &B) -> Result<Response> {
        self.client
            .post(url)
            .json(body)
            .headers(self.auth_headers())
            .send()
            .await
            .map_err(transport_error)
    }

    pub(crate) async fn patch_json<B: Serialize>(&self, url: Url, body: &B) -> Result<Response> {
        self.client
            .patch(url)
            .json(body)
            .headers(self.auth_headers())
            .send()
            .await
            .map_err(transport_error)
    }

    pub(crate) async fn delete(&self, url: Url) -> Result<Response> {
        self.client
            .delete(url)
            .headers(self.auth_headers())
            .send()
            .await
            .map_err(transport_error)
    }

    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", self.api_key);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value).expect("invalid api key characters"),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }
}

/// Parse a successful response body, or surface the status as an error.
pub(crate) async fn into_json<R: DeserializeOwned>(response: Response) -> Result<R> {
    let status = response.status();
    trace!(status = %status, "upstream response");

    if status.is_success() {
        response.json::<R>().await.map_err(transport_error)
    } else {
        Err(status_error(response).await)
    }
}

/// Convert a non-success response into an upstream status error, carrying
/// whatever error detail the service body provides.
pub(crate) async fn status_error(response: Response) -> Error {
    let status = response.status().as_u16();
    let detail = response
        .json::<Value>()
        .await
        .ok()
        .and_then(|body| error_detail(&body));
    UpstreamError::status(status, detail).into()
}

/// Airtable error bodies are `{"error": {"type", "message"}}` or
/// `{"error": "CODE"}`.
fn error_detail(body: &Value) -> Option<String> {
    let error = body.get("error")?;
    if let Some(code) = error.as_str() {
        return Some(code.to_string());
    }
    error
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

pub(crate) fn transport_error(err: reqwest::Error) -> Error {
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
