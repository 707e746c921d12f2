//! Text output: the one-line reconciliation report.

use crate::reconcile::CountReport;

/// Renders the report as the single result line.
pub fn render(report: &CountReport) -> String {
    format!(
        "[Foundation {}] CloudController: {}, Database: {}",
        report.foundation, report.cloud_controller, report.database
    )
}
