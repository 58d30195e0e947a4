//! Shared application state.

use std::sync::Arc;

use biostart_core::traits::{RecordSource, TextGenerator, UserSource};
use biostart_core::{AuthService, ContentService, GenerationService, UserChecklistService};

/// Service facades shared by every handler.
///
/// Content lives in the document store; user and auth records in the
/// spreadsheet store. Both are injected as trait objects so tests can swap
/// in in-memory doubles.
#[derive(Clone)]
pub struct AppState {
    pub content: ContentService,
    pub auth: AuthService,
    pub users: UserChecklistService,
    pub generation: GenerationService,
}

impl AppState {
    /// Wire the facades over the given backends.
    pub fn new(
        content_source: Arc<dyn RecordSource>,
        user_source: Arc<dyn UserSource>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            content: ContentService::new(content_source),
            auth: AuthService::new(user_source.clone()),
            users: UserChecklistService::new(user_source),
            generation: GenerationService::new(generator),
        }
    }
}
