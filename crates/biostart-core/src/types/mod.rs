//! Core storage-facing types.
//!
//! These types keep the field layout of the backing stores opaque to the
//! rest of the crate: records travel as an id plus a JSON field map, and
//! collections are addressed by name with store-specific key resolution.

mod collection;
mod record;

pub use collection::Collection;
pub use record::{RawFields, RawRecord, RecordId};
