//! Visit report file

use super::transfer::TransferError;
use crate::db::Database;
use crate::model::{ReportRange, ReportRow, REPORT_COLUMNS};
use std::path::Path;

/// Write report rows under the report header.
pub fn write_report(rows: &[ReportRow], path: &Path) -> Result<(), TransferError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(REPORT_COLUMNS)?;
    for row in rows {
        writer.write_record(row.cells())?;
    }
    writer.flush()?;
    Ok(())
}

/// Run the visit report for `range` and save it to `path`.
///
/// Returns the number of visits in the report.
pub fn generate_report(
    db: &Database,
    range: &ReportRange,
    path: &Path,
) -> Result<usize, TransferError> {
    let rows = db.visit_report(range)?;
    write_report(&rows, path)?;
    tracing::info!(
        rows = rows.len(),
        start = %range.start,
        end = %range.end,
        path = %path.display(),
        "report generated"
    );
    Ok(rows.len())
}
