//! Multi-scenario comparison runs over simulator trip logs.
//!
//! This crate loads several scenarios' trip logs in parallel, builds the
//! comparison report with [`trip_core`], and exports the results.
//!
//! # Quick Start
//!
//! ```no_run
//! use trip_experiments::{export_comparison_csv, run_comparison, RunOptions, ScenarioSource};
//!
//! let sources = vec![
//!     ScenarioSource::new("Base Case", "output/tripinfo_base.xml"),
//!     ScenarioSource::new("Optimized Lights", "output/tripinfo_optimized.xml"),
//! ];
//! let run = run_comparison(&sources, &RunOptions::default())?;
//! export_comparison_csv(&run.report.table, "output/comparison_results.csv")?;
//! for failure in &run.report.failures {
//!     eprintln!("{}: {}", failure.scenario, failure.error);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Architecture
//!
//! - [`scenario`]: scenario name and trip-log path pairs
//! - [`config`]: JSON manifest and output locations
//! - [`runner`]: parallel parse/derive using rayon, then comparison
//! - [`export`]: CSV, JSON and Parquet output
//! - [`render`]: chart renderer interface and chart-data writer

pub mod config;
pub mod export;
pub mod render;
pub mod runner;
pub mod scenario;

pub use config::{load_manifest, Manifest, ManifestError, OutputConfig};
pub use export::{
    export_comparison_csv, export_report_json, export_scenario_trips, write_comparison_csv,
};
pub use render::{render_run, ChartDataWriter, ChartRenderer};
pub use runner::{load_scenario, run_comparison, ComparisonRun, RunOptions, ScenarioRun};
pub use scenario::ScenarioSource;
