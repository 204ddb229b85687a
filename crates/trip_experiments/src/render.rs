//! Hand-off to chart rendering.
//!
//! The pipeline only produces value objects; a [`ChartRenderer`] turns them
//! into artifacts. [`ChartDataWriter`] writes the chart series as CSV files
//! so any plotting tool can draw them. Per-scenario files are named after
//! the run's unique slug, so scenarios never overwrite each other.

use std::error::Error;
use std::path::{Path, PathBuf};

use log::debug;
use trip_core::histogram::{Histogram, DEFAULT_BINS};
use trip_core::trip::SECONDS_PER_HOUR;
use trip_core::{BoxStats, ComparisonTable, DerivedTripRecord};

use crate::runner::{ComparisonRun, ScenarioRun};

/// Box-plot data files, one per metric, with one row per scenario.
pub const DURATION_DISTRIBUTION_FILE: &str = "duration_distribution.csv";
pub const WAITING_TIME_DISTRIBUTION_FILE: &str = "waiting_time_distribution.csv";

pub trait ChartRenderer {
    /// Produce distribution charts for one scenario. `slug` is unique within
    /// the run. Returns the files written.
    fn render_scenario(
        &self,
        slug: &str,
        records: &[DerivedTripRecord],
    ) -> Result<Vec<PathBuf>, Box<dyn Error>>;

    /// Produce the cross-scenario box plots. Returns the files written.
    fn render_distributions(
        &self,
        scenarios: &[ScenarioRun],
    ) -> Result<Vec<PathBuf>, Box<dyn Error>>;

    /// Produce the cross-scenario comparison chart. Returns the files written.
    fn render_comparison(&self, table: &ComparisonTable) -> Result<Vec<PathBuf>, Box<dyn Error>>;
}

/// Render every successful scenario, then the comparison.
pub fn render_run(
    renderer: &dyn ChartRenderer,
    run: &ComparisonRun,
) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let mut written = Vec::new();
    for scenario in &run.scenarios {
        let files = renderer.render_scenario(&scenario.slug, &scenario.derived.records)?;
        written.extend(files);
    }
    if !run.scenarios.is_empty() {
        written.extend(renderer.render_distributions(&run.scenarios)?);
    }
    if !run.report.table.is_empty() {
        written.extend(renderer.render_comparison(&run.report.table)?);
    }
    Ok(written)
}

/// Writes chart-ready CSV series into a directory.
#[derive(Debug, Clone)]
pub struct ChartDataWriter {
    dir: PathBuf,
    bins: usize,
}

impl ChartDataWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            bins: DEFAULT_BINS,
        }
    }

    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins.max(1);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn create_writer(
        &self,
        file_name: &str,
    ) -> Result<(csv::Writer<std::fs::File>, PathBuf), Box<dyn Error>> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        let writer = csv::Writer::from_path(&path)?;
        Ok((writer, path))
    }

    fn write_histograms(
        &self,
        file_name: &str,
        records: &[DerivedTripRecord],
    ) -> Result<PathBuf, Box<dyn Error>> {
        let series: [(&str, Vec<Option<f64>>); 4] = [
            ("duration", records.iter().map(|r| Some(r.trip.duration)).collect()),
            (
                "waiting_time",
                records.iter().map(|r| Some(r.trip.waiting_time)).collect(),
            ),
            ("speed", records.iter().map(|r| r.trip.speed).collect()),
            ("efficiency", records.iter().map(|r| r.efficiency).collect()),
        ];

        let (mut wtr, path) = self.create_writer(file_name)?;
        wtr.write_record(["metric", "bin_lower", "bin_upper", "count"])?;
        for (metric, values) in series {
            let Some(histogram) = Histogram::from_optional(values, self.bins) else {
                debug!("No finite {metric} values for {file_name}");
                continue;
            };
            for bin in &histogram.bins {
                wtr.write_record([
                    metric.to_string(),
                    bin.lower.to_string(),
                    bin.upper.to_string(),
                    bin.count.to_string(),
                ])?;
            }
        }
        wtr.flush()?;
        Ok(path)
    }

    fn write_scatter(
        &self,
        file_name: &str,
        records: &[DerivedTripRecord],
    ) -> Result<PathBuf, Box<dyn Error>> {
        let (mut wtr, path) = self.create_writer(file_name)?;
        wtr.write_record(["id", "depart_hour", "duration", "waiting_time"])?;
        for record in records {
            wtr.write_record([
                record.trip.id.clone(),
                (record.trip.depart / SECONDS_PER_HOUR).to_string(),
                record.trip.duration.to_string(),
                record.trip.waiting_time.to_string(),
            ])?;
        }
        wtr.flush()?;
        Ok(path)
    }

    fn write_box_stats<F>(
        &self,
        file_name: &str,
        scenarios: &[ScenarioRun],
        metric: F,
    ) -> Result<PathBuf, Box<dyn Error>>
    where
        F: Fn(&DerivedTripRecord) -> f64,
    {
        let (mut wtr, path) = self.create_writer(file_name)?;
        wtr.write_record(["scenario", "min", "q1", "median", "q3", "max"])?;
        for scenario in scenarios {
            let records = &scenario.derived.records;
            let Some(stats) = BoxStats::from_values(records.iter().map(&metric)) else {
                debug!("No finite values for {:?} in {file_name}", scenario.source.name);
                continue;
            };
            wtr.write_record([
                scenario.source.name.clone(),
                stats.min.to_string(),
                stats.q1.to_string(),
                stats.median.to_string(),
                stats.q3.to_string(),
                stats.max.to_string(),
            ])?;
        }
        wtr.flush()?;
        Ok(path)
    }
}

impl ChartRenderer for ChartDataWriter {
    fn render_scenario(
        &self,
        slug: &str,
        records: &[DerivedTripRecord],
    ) -> Result<Vec<PathBuf>, Box<dyn Error>> {
        let histograms = self.write_histograms(&format!("metrics_{slug}.csv"), records)?;
        let scatter = self.write_scatter(&format!("departures_{slug}.csv"), records)?;
        Ok(vec![histograms, scatter])
    }

    fn render_distributions(
        &self,
        scenarios: &[ScenarioRun],
    ) -> Result<Vec<PathBuf>, Box<dyn Error>> {
        let durations =
            self.write_box_stats(DURATION_DISTRIBUTION_FILE, scenarios, |r| r.trip.duration)?;
        let waiting = self.write_box_stats(WAITING_TIME_DISTRIBUTION_FILE, scenarios, |r| {
            r.trip.waiting_time
        })?;
        Ok(vec![durations, waiting])
    }

    fn render_comparison(&self, table: &ComparisonTable) -> Result<Vec<PathBuf>, Box<dyn Error>> {
        let (mut wtr, path) = self.create_writer("scenario_comparison.csv")?;
        wtr.write_record(["scenario", "avg_duration", "avg_waiting_time", "avg_efficiency"])?;
        for row in table {
            wtr.write_record([
                row.scenario_name.clone(),
                row.avg_duration.to_string(),
                row.avg_waiting_time.to_string(),
                row.avg_efficiency.map(|v| v.to_string()).unwrap_or_default(),
            ])?;
        }
        wtr.flush()?;
        Ok(vec![path])
    }
}
