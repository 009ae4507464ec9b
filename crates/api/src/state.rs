//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use database::Database;
use tutor_core::Tutor;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection.
    pub db: Database,
    /// Content generation backend, selected once at startup.
    pub tutor: Arc<dyn Tutor>,
    /// Lifetime of newly created sessions.
    pub session_ttl: Duration,
}

impl AppState {
    /// Create new application state.
    pub fn new(db: Database, tutor: Arc<dyn Tutor>, session_ttl: Duration) -> Self {
        Self {
            db,
            tutor,
            session_ttl,
        }
    }
}
