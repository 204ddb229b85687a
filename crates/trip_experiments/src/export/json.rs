use serde::Serialize;
use trip_core::{ComparisonReport, ScenarioSummary};

#[derive(Serialize)]
struct ReportJson<'a> {
    summaries: &'a [ScenarioSummary],
    failures: Vec<FailureJson<'a>>,
}

#[derive(Serialize)]
struct FailureJson<'a> {
    position: usize,
    scenario: &'a str,
    error: String,
}

pub(crate) fn export_report_json_impl(
    report: &ComparisonReport,
    file: std::fs::File,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = ReportJson {
        summaries: report.table.rows(),
        failures: report
            .failures
            .iter()
            .map(|failure| FailureJson {
                position: failure.position,
                scenario: &failure.scenario,
                error: failure.error.to_string(),
            })
            .collect(),
    };
    serde_json::to_writer_pretty(file, &json)?;
    Ok(())
}
