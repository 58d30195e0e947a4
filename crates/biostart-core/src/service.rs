//! Content service facade.
//!
//! Orchestrates fetch-all, create, update and delete per content type,
//! delegating storage to a [`RecordSource`] and shape translation to the
//! type's [`ContentSchema`]. Validation runs before any upstream call; a
//! request rejected here never reaches the backing store.

use std::sync::Arc;

use tracing::debug;

use crate::content::ContentSchema;
use crate::traits::RecordSource;
use crate::types::{RawFields, RecordId};
use crate::{Error, Result};

/// CRUD facade over a record source.
#[derive(Clone)]
pub struct ContentService {
    source: Arc<dyn RecordSource>,
}

impl ContentService {
    /// Create a facade over the given record source.
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self { source }
    }

    /// Fetch every entity of a content type.
    ///
    /// Never partial-fails: a malformed nested field on one record degrades
    /// that record to its empty default instead of aborting the list.
    pub async fn list<C: ContentSchema>(&self) -> Result<Vec<C>> {
        let records = self.source.fetch_all(&C::COLLECTION).await?;
        debug!(collection = %C::COLLECTION, count = records.len(), "listed records");
        Ok(records.iter().map(C::from_record).collect())
    }

    /// Create an entity, returning the store-assigned id.
    pub async fn create<C: ContentSchema>(&self, draft: C::Draft) -> Result<RecordId> {
        let fields = C::draft_fields(draft)?;
        self.source.create(&C::COLLECTION, fields).await
    }

    /// Apply a sparse update, returning the raw fields that were sent.
    pub async fn update<C: ContentSchema>(
        &self,
        id: &RecordId,
        patch: C::Patch,
    ) -> Result<RawFields> {
        let fields = C::patch_fields(patch)?;
        if fields.is_empty() {
            return Err(Error::Validation("no fields to update".to_string()));
        }
        self.source
            .update(&C::COLLECTION, id, fields.clone())
            .await?;
        Ok(fields)
    }

    /// Delete an entity.
    ///
    /// Reports success even if the record did not exist; no existence check
    /// is performed before the delete.
    pub async fn delete<C: ContentSchema>(&self, id: &RecordId) -> Result<()> {
        self.source.delete(&C::COLLECTION, id).await
    }
}
