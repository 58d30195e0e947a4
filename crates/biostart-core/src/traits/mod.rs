//! Core traits for the upstream collaborators.

mod generator;
mod record_source;
mod user_source;

pub use generator::TextGenerator;
pub use record_source::RecordSource;
pub use user_source::UserSource;
