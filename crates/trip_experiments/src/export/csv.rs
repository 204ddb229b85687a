use std::io::Write;

use trip_core::{ComparisonTable, ScenarioSummary};

/// Column order of the comparison CSV.
pub const COMPARISON_COLUMNS: [&str; 14] = [
    "scenario_name",
    "avg_duration",
    "median_duration",
    "avg_waiting_time",
    "max_waiting_time",
    "avg_speed",
    "avg_efficiency",
    "vehicles_per_hour",
    "trip_count",
    "p90_duration",
    "excluded_speed",
    "excluded_efficiency",
    "excluded_duration",
    "excluded_waiting_time",
];

pub(crate) fn write_comparison_csv<W: Write>(
    table: &ComparisonTable,
    writer: W,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(COMPARISON_COLUMNS)?;
    for summary in table {
        wtr.write_record(summary_cells(summary))?;
    }

    wtr.flush()?;
    Ok(())
}

fn summary_cells(summary: &ScenarioSummary) -> [String; 14] {
    [
        summary.scenario_name.clone(),
        summary.avg_duration.to_string(),
        summary.median_duration.to_string(),
        summary.avg_waiting_time.to_string(),
        summary.max_waiting_time.to_string(),
        optional_cell(summary.avg_speed),
        optional_cell(summary.avg_efficiency),
        optional_cell(summary.vehicles_per_hour),
        summary.trip_count.to_string(),
        summary.p90_duration.to_string(),
        summary.excluded_speed.to_string(),
        summary.excluded_efficiency.to_string(),
        summary.excluded_duration.to_string(),
        summary.excluded_waiting_time.to_string(),
    ]
}

fn optional_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
