//! Record source trait.

use async_trait::async_trait;

use crate::Result;
use crate::types::{Collection, RawFields, RawRecord, RecordId};

/// A backing store holding raw records grouped into collections.
///
/// Every method issues exactly one upstream call per invocation; there are
/// no retries. Transport failures and non-success statuses surface as
/// [`UpstreamError`](crate::UpstreamError).
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch every record in a collection.
    async fn fetch_all(&self, collection: &Collection) -> Result<Vec<RawRecord>>;

    /// Create a record, returning its store-assigned id.
    async fn create(&self, collection: &Collection, fields: RawFields) -> Result<RecordId>;

    /// Replace the given fields on an existing record, leaving all other
    /// fields untouched.
    async fn update(&self, collection: &Collection, id: &RecordId, fields: RawFields)
    -> Result<()>;

    /// Delete a record.
    async fn delete(&self, collection: &Collection, id: &RecordId) -> Result<()>;
}
