use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use trip_core::{aggregate, derive, parse_file, ComparisonTable};
use trip_experiments::{
    export_comparison_csv, export_report_json, export_scenario_trips, load_manifest, render_run,
    run_comparison, ChartDataWriter, OutputConfig, RunOptions, ScenarioSource,
};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "trip-report",
    about = "Summarize and compare traffic-simulation trip logs",
    long_about = "Parses per-vehicle trip logs, derives travel metrics, and writes a\n\
                  cross-scenario comparison table plus chart data."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare several scenarios and write the comparison table
    Compare {
        /// Scenario as NAME=PATH; repeat in report order
        #[arg(long = "scenario", value_name = "NAME=PATH")]
        scenarios: Vec<ScenarioSource>,
        /// JSON manifest listing scenarios and output directories
        #[arg(long, env = "TRIP_REPORT_MANIFEST")]
        manifest: Option<PathBuf>,
        /// Directory for the comparison table [default: output]
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Directory for chart data [default: images]
        #[arg(long)]
        images_dir: Option<PathBuf>,
        /// Worker threads for loading scenarios
        #[arg(long)]
        threads: Option<usize>,
        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
        /// Also write the report (summaries and failures) as JSON
        #[arg(long)]
        json: bool,
        /// Also write each scenario's derived trips as Parquet
        #[arg(long)]
        trips_parquet: bool,
        /// Skip writing chart data
        #[arg(long)]
        no_charts: bool,
    },
    /// Print the summary of a single trip log
    Summarize {
        /// Trip-log file
        path: PathBuf,
        /// Scenario name shown in the summary
        #[arg(long, default_value = "scenario")]
        name: String,
    },
}

// ── helpers ────────────────────────────────────────────────────────

fn print_table(table: &ComparisonTable) {
    println!("\n=== Simulation Analysis Report ===");
    println!(
        "{:<24} {:>16} {:>17} {:>16}",
        "Scenario", "Avg Travel Time", "Avg Waiting Time", "Route Efficiency"
    );
    for row in table {
        println!(
            "{:<24} {:>16.2} {:>17.2} {:>16}",
            row.scenario_name,
            row.avg_duration,
            row.avg_waiting_time,
            row.avg_efficiency
                .map(|e| format!("{e:.4}"))
                .unwrap_or_else(|| "n/a".to_string())
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn compare(
    scenarios: Vec<ScenarioSource>,
    manifest: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    images_dir: Option<PathBuf>,
    options: RunOptions,
    json: bool,
    trips_parquet: bool,
    charts: bool,
) -> Result<()> {
    let manifest = manifest
        .map(|path| {
            load_manifest(&path).with_context(|| format!("loading manifest {}", path.display()))
        })
        .transpose()?;

    let mut sources = manifest
        .as_ref()
        .map(|m| m.scenarios.clone())
        .unwrap_or_default();
    sources.extend(scenarios);
    if sources.is_empty() {
        bail!("no scenarios given; pass --scenario NAME=PATH or --manifest FILE");
    }

    let output = OutputConfig::resolve(output_dir, images_dir, manifest.as_ref());
    let run = run_comparison(&sources, &options).context("starting worker pool")?;

    let csv_path = output.comparison_csv_path();
    export_comparison_csv(&run.report.table, &csv_path)
        .map_err(|err| anyhow::anyhow!("writing {}: {err}", csv_path.display()))?;
    info!("Wrote {}", csv_path.display());

    if json {
        let json_path = output.report_json_path();
        export_report_json(&run.report, &json_path)
            .map_err(|err| anyhow::anyhow!("writing {}: {err}", json_path.display()))?;
        info!("Wrote {}", json_path.display());
    }

    if trips_parquet {
        for scenario in &run.scenarios {
            let path = output
                .output_dir
                .join(format!("trips_{}.parquet", scenario.slug));
            export_scenario_trips(&scenario.derived.records, &path)
                .map_err(|err| anyhow::anyhow!("writing {}: {err}", path.display()))?;
        }
    }

    if charts {
        let writer = ChartDataWriter::new(&output.images_dir);
        let written = render_run(&writer, &run)
            .map_err(|err| anyhow::anyhow!("writing chart data: {err}"))?;
        info!(
            "Wrote {} chart data files to {}",
            written.len(),
            output.images_dir.display()
        );
    }

    print_table(&run.report.table);
    for scenario in &run.scenarios {
        for warning in &scenario.derived.warnings {
            warn!("{}: {warning}", scenario.source.name);
        }
    }
    if !run.report.failures.is_empty() {
        println!("\n=== Failed Scenarios ===");
        for failure in &run.report.failures {
            println!("{}: {}", failure.scenario, failure.error);
        }
    }
    println!(
        "\nReports saved to {} and {}",
        output.images_dir.display(),
        output.output_dir.display()
    );

    if run.report.table.is_empty() {
        bail!("every scenario failed");
    }
    Ok(())
}

fn summarize(path: PathBuf, name: String) -> Result<()> {
    let trips = parse_file(&path)?;
    let derived = derive(&trips);
    let summary = aggregate(&name, &derived.records)?;

    println!("Scenario:            {}", summary.scenario_name);
    println!("Trips:               {}", summary.trip_count);
    println!("Avg travel time:     {:.2}s", summary.avg_duration);
    println!("Median travel time:  {:.2}s", summary.median_duration);
    println!("P90 travel time:     {:.2}s", summary.p90_duration);
    println!("Avg waiting time:    {:.2}s", summary.avg_waiting_time);
    println!("Max waiting time:    {:.2}s", summary.max_waiting_time);
    match summary.avg_speed {
        Some(speed) => println!("Avg speed:           {speed:.2} m/s"),
        None => println!("Avg speed:           n/a"),
    }
    match summary.avg_efficiency {
        Some(efficiency) => println!("Route efficiency:    {efficiency:.4}"),
        None => println!("Route efficiency:    n/a"),
    }
    match summary.vehicles_per_hour {
        Some(vph) => println!("Vehicles per hour:   {vph:.1}"),
        None => println!("Vehicles per hour:   n/a"),
    }
    if summary.excluded_speed > 0 {
        println!(
            "Zero-duration trips excluded from speed/efficiency: {}",
            summary.excluded_speed
        );
    }
    Ok(())
}

// ── main ───────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Compare {
            scenarios,
            manifest,
            output_dir,
            images_dir,
            threads,
            no_progress,
            json,
            trips_parquet,
            no_charts,
        } => compare(
            scenarios,
            manifest,
            output_dir,
            images_dir,
            RunOptions {
                num_threads: threads,
                show_progress: !no_progress,
            },
            json,
            trips_parquet,
            !no_charts,
        ),
        Commands::Summarize { path, name } => summarize(path, name),
    }
}
