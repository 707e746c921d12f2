//! Trait definitions for cfdrift.
//!
//! The reconciler talks to its two collaborators through these seams, so
//! either side can be replaced in tests without network or database access.

use crate::error::CoreError;
use crate::models::AppCount;

/// A source of live application counts for a foundation.
///
/// Implementors are responsible for authentication and for converting every
/// irrecoverable failure into [`AppCount::Unknown`]; `app_count` itself
/// never fails.
pub trait AppCountSource {
    /// Returns the application count for `foundation`, or
    /// [`AppCount::Unknown`] when the remote fetch cannot be completed.
    fn app_count(&mut self, foundation: &str) -> AppCount;
}

/// A persisted statistics store that can answer one aggregate query.
///
/// Store failures are the caller's problem: no retry or recovery happens
/// behind this trait.
pub trait CountStore {
    /// Executes `sql` and returns the first column of the first row.
    ///
    /// # Errors
    ///
    /// Any store-layer failure, surfaced as [`CoreError::Store`].
    fn query_count(&mut self, sql: &str) -> Result<u64, CoreError>;
}
