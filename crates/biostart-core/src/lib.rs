//! biostart-core - Canonical content model and service facades for the
//! BioStart learning-platform backend.
//!
//! The backing stores hold three content shapes (spreadsheet fields,
//! document fields, the frontend's JSON); this crate owns the translation
//! between them and the orchestration on top, independent of any HTTP
//! framework or concrete upstream client.

pub mod codec;
pub mod content;
pub mod error;
pub mod generation;
pub mod service;
pub mod traits;
pub mod types;
pub mod user;

pub use content::{
    Checklist, ChecklistItem, ContentSchema, EducationalText, Quiz, QuizQuestion,
};
pub use error::{AuthError, DecodeError, Error, UpstreamError};
pub use generation::GenerationService;
pub use service::ContentService;
pub use traits::{RecordSource, TextGenerator, UserSource};
pub use types::{Collection, RawFields, RawRecord, RecordId};
pub use user::{AuthService, UserChecklistService};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
