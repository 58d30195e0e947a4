//! Checklist content.
//!
//! Items are persisted as serialized JSON inside the `items` field. The
//! canonical item shape is `{text, completed}`; an earlier storage
//! generation persisted plain strings, which decode with `completed: false`.
//! Writes always use the object form.

use serde::{Deserialize, Deserializer, Serialize};

use super::{ContentSchema, required};
use crate::types::{Collection, RawFields, RawRecord, RecordId};
use crate::{Error, Result, codec};

const TITLE: &str = "titulo";
const ITEMS: &str = "items";

/// A checklist item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChecklistItem {
    pub text: String,
    pub completed: bool,
}

impl<'de> Deserialize<'de> for ChecklistItem {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Compat {
            Object {
                text: String,
                #[serde(default)]
                completed: bool,
            },
            // Legacy storage generation: a bare string.
            Legacy(String),
        }

        Ok(match Compat::deserialize(deserializer)? {
            Compat::Object { text, completed } => ChecklistItem { text, completed },
            Compat::Legacy(text) => ChecklistItem {
                text,
                completed: false,
            },
        })
    }
}

/// A checklist, canonical shape.
#[derive(Debug, Clone, Serialize)]
pub struct Checklist {
    pub id: RecordId,
    pub title: String,
    pub items: Vec<ChecklistItem>,
}

/// Creation payload. Title and an items array (possibly empty) are mandatory.
#[derive(Debug, Deserialize)]
pub struct ChecklistDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<ChecklistItem>>,
}

/// Sparse update payload.
#[derive(Debug, Default, Deserialize)]
pub struct ChecklistPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<ChecklistItem>>,
}

impl ContentSchema for Checklist {
    const COLLECTION: Collection = Collection::CHECKLISTS;
    type Draft = ChecklistDraft;
    type Patch = ChecklistPatch;

    fn from_record(record: &RawRecord) -> Self {
        Checklist {
            id: record.id.clone(),
            title: record.string_field(TITLE).unwrap_or_default().to_string(),
            items: codec::decode_or_default(ITEMS, record.id.as_str(), record.field(ITEMS)),
        }
    }

    fn draft_fields(draft: Self::Draft) -> Result<RawFields> {
        let title = required(draft.title, "title")?;
        let items = draft
            .items
            .ok_or_else(|| Error::Validation("a checklist needs a title and items".to_string()))?;

        let mut fields = RawFields::new();
        fields.insert(TITLE, title);
        fields.insert(ITEMS, codec::encode(&items)?);
        Ok(fields)
    }

    fn patch_fields(patch: Self::Patch) -> Result<RawFields> {
        let mut fields = RawFields::new();
        if let Some(title) = patch.title.filter(|t| !t.is_empty()) {
            fields.insert(TITLE, title);
        }
        if let Some(items) = patch.items {
            fields.insert(ITEMS, codec::encode(&items)?);
        }
        Ok(fields)
    }
}
