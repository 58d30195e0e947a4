//! Quiz content.
//!
//! Questions are persisted as serialized JSON inside the `Perguntas` field.
//! Stored entries are decoded individually so that one malformed entry drops
//! that entry, never the whole quiz and never the request.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ContentSchema, required};
use crate::types::{Collection, RawFields, RawRecord, RecordId};
use crate::{Error, Result, codec};

const TITLE: &str = "Title";
const QUESTIONS: &str = "Perguntas";

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Index of the correct option (0-3).
    #[serde(default)]
    pub correct: u32,
}

/// A quiz, canonical shape.
#[derive(Debug, Clone, Serialize)]
pub struct Quiz {
    pub id: RecordId,
    pub title: String,
    pub questions: Vec<QuizQuestion>,
}

/// Creation payload. Title and at least one question are mandatory.
#[derive(Debug, Deserialize)]
pub struct QuizDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub questions: Option<Vec<QuizQuestion>>,
}

/// Sparse update payload.
#[derive(Debug, Default, Deserialize)]
pub struct QuizPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub questions: Option<Vec<QuizQuestion>>,
}

impl ContentSchema for Quiz {
    const COLLECTION: Collection = Collection::QUIZZES;
    type Draft = QuizDraft;
    type Patch = QuizPatch;

    fn from_record(record: &RawRecord) -> Self {
        let entries: Vec<Value> =
            codec::decode_or_default(QUESTIONS, record.id.as_str(), record.field(QUESTIONS));
        Quiz {
            id: record.id.clone(),
            title: record.string_field(TITLE).unwrap_or_default().to_string(),
            questions: entries.iter().filter_map(valid_question).collect(),
        }
    }

    fn draft_fields(draft: Self::Draft) -> Result<RawFields> {
        let title = required(draft.title, "title")?;
        let questions = draft
            .questions
            .filter(|questions| !questions.is_empty())
            .ok_or_else(|| {
                Error::Validation("a quiz needs a title and at least one question".to_string())
            })?;

        let mut fields = RawFields::new();
        fields.insert(TITLE, title);
        fields.insert(QUESTIONS, codec::encode(&questions)?);
        Ok(fields)
    }

    fn patch_fields(patch: Self::Patch) -> Result<RawFields> {
        let mut fields = RawFields::new();
        if let Some(title) = patch.title.filter(|t| !t.is_empty()) {
            fields.insert(TITLE, title);
        }
        if let Some(questions) = patch.questions {
            fields.insert(QUESTIONS, codec::encode(&questions)?);
        }
        Ok(fields)
    }
}

/// Validity filter applied after decode: an entry survives only if its
/// question is a non-empty trimmed string and its options are a non-empty
/// sequence of non-empty trimmed strings. Entries failing the filter are
/// dropped without error.
fn valid_question(entry: &Value) -> Option<QuizQuestion> {
    let question = entry.get("question")?.as_str()?;
    if question.trim().is_empty() {
        return None;
    }
    let options = entry.get("options")?.as_array()?;
    if options.is_empty() {
        return None;
    }
    let mut collected = Vec::with_capacity(options.len());
    for option in options {
        let text = option.as_str()?;
        if text.trim().is_empty() {
            return None;
        }
        collected.push(text.to_string());
    }
    let correct = entry.get("correct").and_then(Value::as_u64).unwrap_or(0) as u32;
    Some(QuizQuestion {
        question: question.to_string(),
        options: collected,
        correct,
    })
}
