//! Store error types.

use thiserror::Error;

/// Errors that can occur in the statistics store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite error.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The aggregate query produced a negative value.
    #[error("aggregate returned a negative count: {0}")]
    NegativeCount(i64),
}
