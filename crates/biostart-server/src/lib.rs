//! biostart-server - HTTP gateway for the BioStart learning platform.
//!
//! Thin axum layer over the service facades: content CRUD against the
//! document store, auth and per-user checklist state against the
//! spreadsheet store, generative-text routes against Gemini. Library
//! target so integration tests can drive the router in-process.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
