use std::sync::Arc;

use crate::session::SessionController;

/// Shared application state passed to all handlers via axum State extractor.
#[derive(Clone)]
pub struct AppState {
    /// Lifecycle controller owning the connection registry, the outbound
    /// gateway, and the online counter.
    pub sessions: Arc<SessionController>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(SessionController::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
