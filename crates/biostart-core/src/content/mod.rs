//! Canonical content entities and their raw-field mappings.
//!
//! Each entity type implements [`ContentSchema`]: raw storage fields to the
//! canonical client-facing shape on read, canonical drafts and sparse
//! patches to raw fields on write.

mod checklist;
mod quiz;
mod text;

pub use checklist::{Checklist, ChecklistDraft, ChecklistItem, ChecklistPatch};
pub use quiz::{Quiz, QuizDraft, QuizPatch, QuizQuestion};
pub use text::{EducationalText, EducationalTextDraft, EducationalTextPatch};

use serde::de::{Deserialize, DeserializeOwned, Deserializer};

use crate::types::{Collection, RawFields, RawRecord};
use crate::{Error, Result};

/// Bidirectional mapping between a canonical entity and its raw storage shape.
///
/// `from_record` never fails: a malformed nested field degrades to the
/// type's empty default so that one bad record cannot abort a list response.
pub trait ContentSchema: Sized + Send {
    /// The collection this entity lives in.
    const COLLECTION: Collection;

    /// Fields accepted at creation. Mandatory fields are checked by
    /// [`draft_fields`](Self::draft_fields) before any upstream call.
    type Draft: DeserializeOwned + Send;

    /// Sparse update payload. Only fields present in the request body end up
    /// in the outgoing raw field set.
    type Patch: DeserializeOwned + Send;

    /// Map a raw record to the canonical shape.
    fn from_record(record: &RawRecord) -> Self;

    /// Validate a draft and map it to raw fields.
    fn draft_fields(draft: Self::Draft) -> Result<RawFields>;

    /// Map a sparse patch to raw fields. The result may be empty; the
    /// facade rejects empty sets.
    fn patch_fields(patch: Self::Patch) -> Result<RawFields>;
}

/// Require a non-empty string field from a draft.
pub(crate) fn required(value: Option<String>, name: &str) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::Validation(format!(
            "missing required field '{name}'"
        ))),
    }
}

/// Deserialize helper distinguishing an absent field (outer `None`) from an
/// explicit JSON `null` (inner `None`). Pair with `#[serde(default)]`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
