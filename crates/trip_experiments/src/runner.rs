//! Parallel scenario execution using rayon.
//!
//! Each scenario's parse and derive steps are independent, so they run on a
//! thread pool. Results are joined in input order before the comparison is
//! built, which keeps reports reproducible regardless of scheduling.

use std::collections::HashSet;

use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rayon::prelude::*;
use trip_core::{
    compare_indexed, derive, parse_file, ComparisonReport, DerivedTrips, DuplicateScenarioError,
    ScenarioFailure, TripDataError,
};

use crate::scenario::{unique_slugs, ScenarioSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Worker threads; rayon's default when `None`.
    pub num_threads: Option<usize>,
    pub show_progress: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            num_threads: None,
            show_progress: true,
        }
    }
}

/// Derived trips of one scenario that made it into the comparison table.
#[derive(Debug, Clone)]
pub struct ScenarioRun {
    /// Index of the scenario in the input list.
    pub position: usize,
    pub source: ScenarioSource,
    /// File-name stem, unique within the run.
    pub slug: String,
    pub derived: DerivedTrips,
}

#[derive(Debug)]
pub struct ComparisonRun {
    pub report: ComparisonReport,
    /// Successful scenarios in input order.
    pub scenarios: Vec<ScenarioRun>,
}

/// Parse and derive a single scenario's trip log.
pub fn load_scenario(source: &ScenarioSource) -> Result<DerivedTrips, TripDataError> {
    let trips = parse_file(&source.path)?;
    let derived = derive(&trips);
    info!(
        "Loaded scenario {:?}: {} trips ({} warnings)",
        source.name,
        derived.records.len(),
        derived.warnings.len()
    );
    Ok(derived)
}

/// Run every scenario and build the comparison.
///
/// A failing scenario is reported in `report.failures` and does not stop the
/// others. When two sources share a name the first one is used and the later
/// ones fail without being loaded.
pub fn run_comparison(
    sources: &[ScenarioSource],
    options: &RunOptions,
) -> Result<ComparisonRun, rayon::ThreadPoolBuildError> {
    let (pending, mut failures) = partition_duplicates(sources);
    let slugs = unique_slugs(pending.iter().map(|(_, source)| source.name.as_str()));

    let pb = progress_bar(pending.len(), options.show_progress);

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = options.num_threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder.build()?;

    let pb_clone = pb.clone();
    let loaded: Vec<Result<DerivedTrips, TripDataError>> = pool.install(|| {
        pending
            .par_iter()
            .map(|(_, source)| {
                let result = load_scenario(source);
                if let Some(ref progress_bar) = pb_clone {
                    progress_bar.inc(1);
                }
                result
            })
            .collect()
    });

    if let Some(ref progress_bar) = pb {
        progress_bar.finish_with_message("Completed");
    }

    let mut scenarios = Vec::with_capacity(loaded.len());
    for (((position, source), slug), result) in pending.into_iter().zip(slugs).zip(loaded) {
        match result {
            Ok(derived) => scenarios.push(ScenarioRun {
                position,
                source: source.clone(),
                slug,
                derived,
            }),
            Err(error) => {
                warn!("Scenario {:?} failed to load: {error}", source.name);
                failures.push(ScenarioFailure {
                    position,
                    scenario: source.name.clone(),
                    error,
                });
            }
        }
    }

    let mut report = compare_indexed(scenarios.iter().map(|run| {
        (
            run.position,
            run.source.name.as_str(),
            run.derived.records.as_slice(),
        )
    }));
    scenarios.retain(|run| !report.failures.iter().any(|f| f.position == run.position));
    report.merge_failures(failures);

    Ok(ComparisonRun { report, scenarios })
}

/// Splits sources into first occurrences of each name and failures for the
/// repeats.
fn partition_duplicates(
    sources: &[ScenarioSource],
) -> (Vec<(usize, &ScenarioSource)>, Vec<ScenarioFailure>) {
    let mut seen = HashSet::new();
    let mut pending = Vec::with_capacity(sources.len());
    let mut failures = Vec::new();
    for (position, source) in sources.iter().enumerate() {
        if seen.insert(source.name.as_str()) {
            pending.push((position, source));
            continue;
        }
        warn!("Skipping duplicate scenario {:?}", source.name);
        failures.push(ScenarioFailure {
            position,
            scenario: source.name.clone(),
            error: DuplicateScenarioError {
                scenario: source.name.clone(),
            }
            .into(),
        });
    }
    (pending, failures)
}

fn progress_bar(total: usize, show_progress: bool) -> Option<ProgressBar> {
    if !show_progress || total == 0 {
        return None;
    }
    let bar = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
    {
        bar.set_style(style.progress_chars("#>-"));
    }
    Some(bar)
}
