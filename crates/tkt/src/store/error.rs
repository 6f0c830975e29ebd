//! Error types for the preference store.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite failed to open, initialize or query the database
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}
