//! JSON output for scripting.

use anyhow::Result;

use crate::reconcile::CountReport;

/// Renders the report as JSON; an unknown remote count becomes `null`.
///
/// # Errors
///
/// Serialization failure (not expected for [`CountReport`]).
pub fn render(report: &CountReport, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    Ok(rendered)
}
