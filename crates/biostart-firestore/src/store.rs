//! Firestore-backed record source implementation.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Response;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, trace};
use url::Url;

use biostart_core::traits::RecordSource;
use biostart_core::types::{Collection, RawFields, RawRecord, RecordId};
use biostart_core::{Error, Result, UpstreamError};

use crate::value::{FirestoreValue, to_firestore, to_json};

const DEFAULT_API_URL: &str = "https://firestore.googleapis.com";

/// Per-request timeout. Calls that hang must not hold a serving task
/// indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the Firestore backend.
#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    pub project_id: String,
    pub api_key: String,
    /// API host; overridable for tests against a mock server.
    pub api_url: Url,
}

impl FirestoreConfig {
    /// Configuration against the public Firestore API.
    pub fn new(project_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            api_key: api_key.into(),
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
        }
    }

    /// Point the backend at a different host.
    pub fn with_api_url(mut self, api_url: Url) -> Self {
        self.api_url = api_url;
        self
    }
}

/// A record source backed by a Firestore database.
#[derive(Debug, Clone)]
pub struct FirestoreStore {
    client: reqwest::Client,
    api_url: Url,
    project_id: String,
    api_key: String,
}

/// Document shape on the wire.
#[derive(Debug, Deserialize)]
struct Document {
    /// Full resource name; the record id is its last path segment.
    name: String,
    #[serde(default)]
    fields: BTreeMap<String, FirestoreValue>,
}

#[derive(Debug, Deserialize)]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<Document>,
}

#[derive(Debug, Serialize)]
struct WriteDocument {
    fields: BTreeMap<String, FirestoreValue>,
}

impl FirestoreStore {
    /// Create a store for the configured project.
    pub fn new(config: FirestoreConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("biostart/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            api_url: config.api_url,
            project_id: config.project_id,
            api_key: config.api_key,
        }
    }

    /// URL for a collection: `/v1/projects/{p}/databases/(default)/documents/{key}`.
    fn collection_url(&self, collection: &Collection) -> Url {
        let key = collection.storage_key();
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .expect("API URL is a valid base")
            .extend([
                "v1",
                "projects",
                self.project_id.as_str(),
                "databases",
                "(default)",
                "documents",
                key.as_str(),
            ]);
        url.query_pairs_mut().append_pair("key", &self.api_key);
        url
    }

    /// URL for a single document.
    fn document_url(&self, collection: &Collection, id: &RecordId) -> Url {
        let mut url = self.collection_url(collection);
        url.path_segments_mut()
            .expect("API URL is a valid base")
            .push(id.as_str());
        url
    }

    async fn handle_response<R: serde::de::DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<R> {
        let status = response.status();
        trace!(status = %status, "Firestore response");

        if status.is_success() {
            response.json::<R>().await.map_err(transport_error)
        } else {
            Err(status_error(response).await)
        }
    }
}

fn to_raw(document: Document) -> RawRecord {
    let id = document
        .name
        .rsplit('/')
        .next()
        .unwrap_or(document.name.as_str())
        .to_string();
    let fields = document
        .fields
        .into_iter()
        .map(|(k, v)| (k, to_json(v)))
        .collect();
    RawRecord::new(id, fields)
}

fn to_write(fields: &RawFields) -> WriteDocument {
    WriteDocument {
        fields: fields
            .iter()
            .map(|(k, v)| (k.clone(), to_firestore(v)))
            .collect(),
    }
}

/// Firestore error bodies are `{"error": {"code", "message", "status"}}`.
async fn status_error(response: Response) -> Error {
    let status = response.status().as_u16();
    let detail = response.json::<Value>().await.ok().and_then(|body| {
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
impl RecordSource for FirestoreStore {
    #[instrument(skip(self))]
    async fn fetch_all(&self, collection: &Collection) -> Result<Vec<RawRecord>> {
        debug!(collection = %collection.storage_key(), "listing documents");
        let response = self
            .client
            .get(self.collection_url(collection))
            .send()
            .await
            .map_err(transport_error)?;
        let body: ListDocumentsResponse = self.handle_response(response).await?;
        Ok(body.documents.into_iter().map(to_raw).collect())
    }

    #[instrument(skip(self, fields))]
    async fn create(&self, collection: &Collection, fields: RawFields) -> Result<RecordId> {
        debug!(collection = %collection.storage_key(), "creating document");
        let response = self
            .client
            .post(self.collection_url(collection))
            .json(&to_write(&fields))
            .send()
            .await
            .map_err(transport_error)?;
        let document: Document = self.handle_response(response).await?;
        Ok(to_raw(document).id)
    }

    #[instrument(skip(self, fields))]
    async fn update(
        &self,
        collection: &Collection,
        id: &RecordId,
        fields: RawFields,
    ) -> Result<()> {
        debug!(collection = %collection.storage_key(), id = %id, "patching document");
        // The update mask limits the write to the supplied fields; without
        // it a PATCH replaces the whole document.
        let mut url = self.document_url(collection, id);
        for (name, _) in fields.iter() {
            url.query_pairs_mut()
                .append_pair("updateMask.fieldPaths", name);
        }

        let response = self
            .client
            .patch(url)
            .json(&to_write(&fields))
            .send()
            .await
            .map_err(transport_error)?;
        match response.status().as_u16() {
            status if (200..300).contains(&status) => Ok(()),
            404 => Err(Error::NotFound(format!(
                "document '{id}' in '{}'",
                collection.storage_key()
            ))),
            _ => Err(status_error(response).await),
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, collection: &Collection, id: &RecordId) -> Result<()> {
        debug!(collection = %collection.storage_key(), id = %id, "deleting document");
        let response = self
            .client
            .delete(self.document_url(collection, id))
            .send()
            .await
            .map_err(transport_error)?;
        match response.status().as_u16() {
            // Firestore deletes are idempotent; mirror that for any backend.
            status if (200..300).contains(&status) => Ok(()),
            404 => Ok(()),
            _ => Err(status_error(response).await),
        }
    }
}
