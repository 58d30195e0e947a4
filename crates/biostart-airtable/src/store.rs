//! Airtable-backed record source implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, instrument};
use url::Url;

use biostart_core::traits::{RecordSource, UserSource};
use biostart_core::types::{Collection, RawFields, RawRecord, RecordId};
use biostart_core::{Error, Result};

use crate::client::{ApiClient, into_json, status_error};

const DEFAULT_API_URL: &str = "https://api.airtable.com";

/// Configuration for the Airtable backend.
#[derive(Debug, Clone)]
pub struct AirtableConfig {
    pub api_key: String,
    pub base_id: String,
    /// API host; overridable for tests against a mock server.
    pub api_url: Url,
}

impl AirtableConfig {
    /// Configuration against the public Airtable API.
    pub fn new(api_key: impl Into<String>, base_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_id: base_id.into(),
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
        }
    }

    /// Point the backend at a different host.
    pub fn with_api_url(mut self, api_url: Url) -> Self {
        self.api_url = api_url;
        self
    }
}

/// A record source backed by an Airtable base.
#[derive(Debug, Clone)]
pub struct AirtableStore {
    client: ApiClient,
    api_url: Url,
    base_id: String,
}

/// Record shape on the wire.
#[derive(Debug, Deserialize)]
struct AirtableRecord {
    id: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RecordsResponse {
    #[serde(default)]
    records: Vec<AirtableRecord>,
}

#[derive(Debug, Serialize)]
struct WriteRequest<'a> {
    fields: &'a RawFields,
}

#[derive(Debug, Deserialize)]
struct CreateResponse {
    id: String,
}

impl AirtableStore {
    /// Create a store for the configured base.
    pub fn new(config: AirtableConfig) -> Self {
        Self {
            client: ApiClient::new(&config.api_key),
            api_url: config.api_url,
            base_id: config.base_id,
        }
    }

    /// URL for a table, percent-encoding the table name.
    fn table_url(&self, collection: &Collection) -> Url {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .expect("API URL is a valid base")
            .push("v0")
            .push(&self.base_id)
            .push(collection.table_name());
        url
    }

    /// URL for a single record.
    fn record_url(&self, collection: &Collection, id: &RecordId) -> Url {
        let mut url = self.table_url(collection);
        url.path_segments_mut()
            .expect("API URL is a valid base")
            .push(id.as_str());
        url
    }
}

fn to_raw(record: AirtableRecord) -> RawRecord {
    RawRecord::new(record.id, RawFields::from(record.fields))
}

/// Build a `filterByFormula` expression testing field equality.
fn equality_formula(filters: &[(&str, &str)]) -> String {
    let clauses: Vec<String> = filters
        .iter()
        .map(|(field, value)| format!("{{{field}}}='{}'", escape_formula_value(value)))
        .collect();
    match clauses.as_slice() {
        [single] => single.clone(),
        many => format!("AND({})", many.join(",")),
    }
}

/// Single quotes would terminate the formula string literal.
fn escape_formula_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

#[async_trait]
impl RecordSource for AirtableStore {
    #[instrument(skip(self))]
    async fn fetch_all(&self, collection: &Collection) -> Result<Vec<RawRecord>> {
        debug!(collection = %collection, "fetching all records");
        let response = self.client.get(self.table_url(collection), &[]).await?;
        let body: RecordsResponse = into_json(response).await?;
        Ok(body.records.into_iter().map(to_raw).collect())
    }

    #[instrument(skip(self, fields))]
    async fn create(&self, collection: &Collection, fields: RawFields) -> Result<RecordId> {
        debug!(collection = %collection, "creating record");
        let request = WriteRequest { fields: &fields };
        let response = self
            .client
            .post_json(self.table_url(collection), &request)
            .await?;
        let body: CreateResponse = into_json(response).await?;
        Ok(RecordId::new(body.id))
    }

    #[instrument(skip(self, fields))]
    async fn update(
        &self,
        collection: &Collection,
        id: &RecordId,
        fields: RawFields,
    ) -> Result<()> {
        debug!(collection = %collection, id = %id, "updating record");
        let request = WriteRequest { fields: &fields };
        let response = self
            .client
            .patch_json(self.record_url(collection, id), &request)
            .await?;
        match response.status().as_u16() {
            status if (200..300).contains(&status) => Ok(()),
            404 => Err(Error::NotFound(format!(
                "record '{id}' in '{collection}'"
            ))),
            _ => Err(status_error(response).await),
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, collection: &Collection, id: &RecordId) -> Result<()> {
        debug!(collection = %collection, id = %id, "deleting record");
        let response = self.client.delete(self.record_url(collection, id)).await?;
        match response.status().as_u16() {
            // Deleting an absent record still reports success.
            status if (200..300).contains(&status) => Ok(()),
            404 => Ok(()),
            _ => Err(status_error(response).await),
        }
    }
}

#[async_trait]
impl UserSource for AirtableStore {
    #[instrument(skip(self))]
    async fn fetch(&self, collection: &Collection, id: &RecordId) -> Result<RawRecord> {
        debug!(collection = %collection, id = %id, "fetching record");
        let response = self.client.get(self.record_url(collection, id), &[]).await?;
        if response.status().as_u16() == 404 {
            return Err(Error::NotFound(format!(
                "record '{id}' in '{collection}'"
            )));
        }
        let record: AirtableRecord = into_json(response).await?;
        Ok(to_raw(record))
    }

    #[instrument(skip(self, filters))]
    async fn find_first(
        &self,
        collection: &Collection,
        filters: &[(&str, &str)],
    ) -> Result<Option<RawRecord>> {
        let formula = equality_formula(filters);
        debug!(collection = %collection, "searching records");
        let response = self
            .client
            .get(
                self.table_url(collection),
                &[("filterByFormula", formula.as_str()), ("maxRecords", "1")],
            )
            .await?;
        let body: RecordsResponse = into_json(response).await?;
        Ok(body.records.into_iter().next().map(to_raw))
    }
}
