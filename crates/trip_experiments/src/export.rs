//! Comparison export.
//!
//! Writes the comparison table as CSV, the full report (summaries and
//! failures) as JSON, and per-scenario trip tables as Parquet.

use std::path::Path;

use trip_core::{ComparisonReport, ComparisonTable, DerivedTripRecord};

#[path = "export/csv.rs"]
mod csv;
#[path = "export/json.rs"]
mod json;
#[path = "export/writer_utils.rs"]
mod writer_utils;

pub use self::csv::COMPARISON_COLUMNS;

/// Export the comparison table to CSV.
///
/// The header names the summary fields; undefined values are empty cells.
/// Identical tables produce byte-identical files.
///
/// # Errors
///
/// Returns an error if file creation or CSV writing fails.
pub fn export_comparison_csv(
    table: &ComparisonTable,
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = writer_utils::create_output_file(path)?;
    csv::write_comparison_csv(table, file)
}

/// Write the comparison table as CSV to any writer.
pub fn write_comparison_csv<W: std::io::Write>(
    table: &ComparisonTable,
    writer: W,
) -> Result<(), Box<dyn std::error::Error>> {
    csv::write_comparison_csv(table, writer)
}

/// Export the whole report, including per-scenario failures, to JSON.
///
/// # Errors
///
/// Returns an error if file creation or JSON serialization fails.
pub fn export_report_json(
    report: &ComparisonReport,
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = writer_utils::create_output_file(path)?;
    json::export_report_json_impl(report, file)
}

/// Export one scenario's derived trips to Parquet for external charting.
///
/// # Errors
///
/// Returns an error if there are no records or Parquet writing fails.
pub fn export_scenario_trips(
    records: &[DerivedTripRecord],
    path: impl AsRef<Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    writer_utils::ensure_not_empty(records)?;
    writer_utils::ensure_parent_dir(path.as_ref())?;
    trip_core::write_trips_parquet(path, records)
}
