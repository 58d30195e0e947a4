//! biostart-airtable - Airtable-backed record source.
//!
//! Implements [`RecordSource`](biostart_core::RecordSource) and
//! [`UserSource`](biostart_core::UserSource) against the Airtable REST API
//! (`/v0/{base}/{table}`). User and administrator records live here.

mod client;
mod store;

pub use store::{AirtableConfig, AirtableStore};
