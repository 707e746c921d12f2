//! Count reconciliation.

use serde::Serialize;
use tracing::debug;

use cfdrift_core::{AppCount, AppCountSource, CoreError, CountStore};

/// Aggregate issued against the statistics store.
pub const APP_COUNT_SQL: &str = "SELECT COUNT(DISTINCT GUID) FROM applications";

/// Both application counts for one foundation.
#[derive(Debug, Clone, Serialize)]
pub struct CountReport {
    /// Foundation the counts belong to.
    pub foundation: String,
    /// Live count from the Cloud Controller, or unknown.
    pub cloud_controller: AppCount,
    /// Persisted count from the statistics database.
    pub database: u64,
}

/// Fetches the app count from the Cloud Controller and from the statistics
/// database, and reports both.
///
/// A remote count of [`AppCount::Unknown`] is reported, not treated as an
/// error; a store failure is, and ends the run.
///
/// # Errors
///
/// [`CoreError::Store`] when the statistics query fails.
pub fn get_counts<F, S>(
    foundation: &str,
    fetcher: &mut F,
    store: &mut S,
) -> Result<CountReport, CoreError>
where
    F: AppCountSource,
    S: CountStore,
{
    let cloud_controller = fetcher.app_count(foundation);
    if !cloud_controller.is_known() {
        debug!(foundation, "No count for foundation");
    }

    let database = store.query_count(APP_COUNT_SQL)?;

    Ok(CountReport {
        foundation: foundation.to_owned(),
        cloud_controller,
        database,
    })
}

// ============================================================================
// Tests
// ============================================================================
