//! User record lookups.

use async_trait::async_trait;

use crate::Result;
use crate::traits::RecordSource;
use crate::types::{Collection, RawRecord, RecordId};

/// Lookup operations needed by the auth and user-profile services.
///
/// User and administrator records live only in the spreadsheet store, so
/// only that backend implements this trait.
#[async_trait]
pub trait UserSource: RecordSource {
    /// Fetch a single record by id. `NotFound` when it does not exist.
    async fn fetch(&self, collection: &Collection, id: &RecordId) -> Result<RawRecord>;

    /// Find the first record whose fields equal every `(field, value)` pair.
    async fn find_first(
        &self,
        collection: &Collection,
        filters: &[(&str, &str)],
    ) -> Result<Option<RawRecord>>;
}
