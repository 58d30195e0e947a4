//! biostart-firestore - Firestore-backed record source.
//!
//! Implements [`RecordSource`](biostart_core::RecordSource) against the
//! Firestore REST API (`/v1/projects/{p}/databases/(default)/documents`).
//! Content collections (educational texts, quizzes, checklists) live here,
//! addressed by their derived storage keys.

mod store;
mod value;

pub use store::{FirestoreConfig, FirestoreStore};
