//! Shared application state.
//!
//! [`AppState`] owns the [`Database`] behind a read-write lock. Reads take
//! the shared lock; every mutating request holds the exclusive lock for
//! its whole read/modify/write sequence, so requests never observe each
//! other's partial effects.

use std::sync::Arc;

use agora_store::Database;
use tokio::sync::RwLock;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// The entity tables.
    pub db: Arc<RwLock<Database>>,
}

impl AppState {
    /// Create application state around an existing database.
    pub fn new(db: Database) -> Self {
        Self {
            db: Arc::new(RwLock::new(db)),
        }
    }
}
