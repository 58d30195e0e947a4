//! Educational text content.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ContentSchema, double_option, required};
use crate::Result;
use crate::types::{Collection, RawFields, RawRecord, RecordId};

const TITLE: &str = "titulo";
const CONTENT: &str = "conteudo";
const ANNEX_URL: &str = "imageUrl";

/// An educational text, canonical shape.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationalText {
    pub id: RecordId,
    pub title: String,
    pub content: String,
    /// Optional attachment URL; an empty stored value reads as `None`.
    pub annex_url: Option<String>,
}

/// Creation payload. Title and content are mandatory.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationalTextDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub annex_url: Option<String>,
}

/// Sparse update payload.
///
/// `annex_url` distinguishes "absent" (leave the stored value alone) from an
/// explicit `null` or empty string (an intentional clear).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationalTextPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub annex_url: Option<Option<String>>,
}

impl ContentSchema for EducationalText {
    const COLLECTION: Collection = Collection::EDUCATIONAL_TEXTS;
    type Draft = EducationalTextDraft;
    type Patch = EducationalTextPatch;

    fn from_record(record: &RawRecord) -> Self {
        EducationalText {
            id: record.id.clone(),
            title: record.string_field(TITLE).unwrap_or_default().to_string(),
            content: record.string_field(CONTENT).unwrap_or_default().to_string(),
            annex_url: record
                .string_field(ANNEX_URL)
                .filter(|url| !url.is_empty())
                .map(str::to_string),
        }
    }

    fn draft_fields(draft: Self::Draft) -> Result<RawFields> {
        let title = required(draft.title, "title")?;
        let content = required(draft.content, "content")?;

        let mut fields = RawFields::new();
        fields.insert(TITLE, title);
        fields.insert(CONTENT, content);
        if let Some(url) = draft.annex_url.filter(|url| !url.is_empty()) {
            fields.insert(ANNEX_URL, url);
        }
        Ok(fields)
    }

    fn patch_fields(patch: Self::Patch) -> Result<RawFields> {
        let mut fields = RawFields::new();
        if let Some(title) = patch.title.filter(|t| !t.is_empty()) {
            fields.insert(TITLE, title);
        }
        if let Some(content) = patch.content.filter(|c| !c.is_empty()) {
            fields.insert(CONTENT, content);
        }
        match patch.annex_url {
            Some(Some(url)) => fields.insert(ANNEX_URL, url),
            // Explicit null clears the annex.
            Some(None) => fields.insert(ANNEX_URL, Value::Null),
            None => {}
        }
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use serde_json::json;

    fn record(fields: Value) -> RawRecord {
        RawRecord::new("rec1", serde_json::from_value(fields).unwrap())
    }

    #[test]
    fn maps_raw_fields_to_canonical() {
        let text = EducationalText::from_record(&record(json!({
            "titulo": "Biodigestores",
            "conteudo": "Como funcionam...",
            "imageUrl": "https://example.org/a.png"
        })));
        assert_eq!(text.title, "Biodigestores");
        assert_eq!(text.content, "Como funcionam...");
        assert_eq!(text.annex_url.as_deref(), Some("https://example.org/a.png"));
    }

    #[test]
    fn empty_annex_reads_as_none() {
        let text = EducationalText::from_record(&record(json!({
            "titulo": "T", "conteudo": "C", "imageUrl": ""
        })));
        assert!(text.annex_url.is_none());
    }

    #[test]
    fn draft_without_content_is_rejected() {
        let draft: EducationalTextDraft = serde_json::from_value(json!({"title": "T"})).unwrap();
        let err = EducationalText::draft_fields(draft).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn draft_maps_to_raw_names() {
        let draft: EducationalTextDraft =
            serde_json::from_value(json!({"title": "T", "content": "C"})).unwrap();
        let fields = EducationalText::draft_fields(draft).unwrap();
        assert_eq!(fields.get("titulo"), Some(&json!("T")));
        assert_eq!(fields.get("conteudo"), Some(&json!("C")));
        assert_eq!(fields.get("imageUrl"), None);
    }

    #[test]
    fn patch_absent_annex_is_left_untouched() {
        let patch: EducationalTextPatch =
            serde_json::from_value(json!({"title": "New"})).unwrap();
        let fields = EducationalText::patch_fields(patch).unwrap();
        assert_eq!(fields.get("titulo"), Some(&json!("New")));
        assert_eq!(fields.get("imageUrl"), None);
    }

    #[test]
    fn patch_null_annex_is_an_intentional_clear() {
        let patch: EducationalTextPatch =
            serde_json::from_value(json!({"annexUrl": null})).unwrap();
        let fields = EducationalText::patch_fields(patch).unwrap();
        assert_eq!(fields.get("imageUrl"), Some(&Value::Null));
    }

    #[test]
    fn empty_patch_produces_empty_field_set() {
        let patch: EducationalTextPatch = serde_json::from_value(json!({})).unwrap();
        let fields = EducationalText::patch_fields(patch).unwrap();
        assert!(fields.is_empty());
    }
}
