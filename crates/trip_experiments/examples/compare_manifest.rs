//! Example: compare the scenarios listed in a manifest file.
//!
//! ```text
//! cargo run -p trip_experiments --example compare_manifest -- scenarios.json
//! ```

use std::path::PathBuf;

use trip_experiments::{
    export_comparison_csv, load_manifest, run_comparison, OutputConfig, RunOptions,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manifest_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .ok_or("usage: compare_manifest <manifest.json>")?;

    let manifest = load_manifest(&manifest_path)?;
    let output = OutputConfig::resolve(None, None, Some(&manifest));

    println!("Comparing {} scenarios...", manifest.scenarios.len());
    let run = run_comparison(&manifest.scenarios, &RunOptions::default())?;

    for row in &run.report.table {
        println!(
            "{:<24} avg travel {:>8.1}s  avg wait {:>6.1}s  efficiency {}",
            row.scenario_name,
            row.avg_duration,
            row.avg_waiting_time,
            row.avg_efficiency
                .map(|e| format!("{e:.3}"))
                .unwrap_or_else(|| "n/a".to_string())
        );
    }
    for failure in &run.report.failures {
        println!("{}: {}", failure.scenario, failure.error);
    }

    export_comparison_csv(&run.report.table, output.comparison_csv_path())?;
    println!("Exported to {}", output.comparison_csv_path().display());
    Ok(())
}
