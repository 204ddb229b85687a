//! Cross-scenario comparison.
//!
//! Rows follow the order in which the caller supplies scenarios. A scenario
//! that cannot be summarized is recorded as a failure and the rest continue.

use std::collections::HashSet;

use log::{info, warn};

use crate::aggregate::{aggregate, ScenarioSummary};
use crate::error::{DuplicateScenarioError, TripDataError};
use crate::trip::DerivedTripRecord;

/// Scenario summaries in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonTable {
    rows: Vec<ScenarioSummary>,
}

impl ComparisonTable {
    pub fn rows(&self) -> &[ScenarioSummary] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, scenario_name: &str) -> Option<&ScenarioSummary> {
        self.rows.iter().find(|row| row.scenario_name == scenario_name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScenarioSummary> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a ComparisonTable {
    type Item = &'a ScenarioSummary;
    type IntoIter = std::slice::Iter<'a, ScenarioSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Why one scenario is missing from the table.
#[derive(Debug)]
pub struct ScenarioFailure {
    /// Index of the scenario in the caller's input list.
    pub position: usize,
    pub scenario: String,
    pub error: TripDataError,
}

/// Partial comparison table plus the scenarios that failed.
#[derive(Debug, Default)]
pub struct ComparisonReport {
    pub table: ComparisonTable,
    pub failures: Vec<ScenarioFailure>,
}

impl ComparisonReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Adds failures from earlier pipeline stages, keeping input order.
    pub fn merge_failures(&mut self, failures: impl IntoIterator<Item = ScenarioFailure>) {
        self.failures.extend(failures);
        self.failures.sort_by_key(|failure| failure.position);
    }
}

/// Aggregate each scenario once and collect the results in input order.
///
/// Positions in the report are indices into `scenarios`.
pub fn compare<'a, I, S>(scenarios: I) -> ComparisonReport
where
    I: IntoIterator<Item = (S, &'a [DerivedTripRecord])>,
    S: AsRef<str>,
{
    let indexed = scenarios
        .into_iter()
        .enumerate()
        .map(|(position, (name, records))| (position, name, records));
    compare_indexed(indexed)
}

/// Like [`compare`], with caller-assigned positions for each scenario.
pub fn compare_indexed<'a, I, S>(scenarios: I) -> ComparisonReport
where
    I: IntoIterator<Item = (usize, S, &'a [DerivedTripRecord])>,
    S: AsRef<str>,
{
    let mut report = ComparisonReport::default();
    let mut seen = HashSet::new();

    for (position, name, records) in scenarios {
        let name = name.as_ref();
        if !seen.insert(name.to_string()) {
            report.failures.push(ScenarioFailure {
                position,
                scenario: name.to_string(),
                error: DuplicateScenarioError {
                    scenario: name.to_string(),
                }
                .into(),
            });
            warn!("Skipping duplicate scenario {name:?}");
            continue;
        }

        match aggregate(name, records) {
            Ok(summary) => {
                info!(
                    "Scenario {name:?}: {} trips, avg duration {:.1}s",
                    summary.trip_count, summary.avg_duration
                );
                report.table.rows.push(summary);
            }
            Err(err) => {
                warn!("Scenario {name:?} not summarized: {err}");
                report.failures.push(ScenarioFailure {
                    position,
                    scenario: name.to_string(),
                    error: err.into(),
                });
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::derive;
    use crate::trip::TripRecord;

    fn scenario(durations: &[f64]) -> Vec<DerivedTripRecord> {
        let trips: Vec<_> = durations
            .iter()
            .enumerate()
            .map(|(i, &d)| {
                let depart = i as f64 * 60.0;
                TripRecord::new(format!("veh{i}"), depart, depart + d, d, 0.0, 100.0, "", "")
            })
            .collect();
        derive(&trips).records
    }

    #[test]
    fn preserves_input_order() {
        let c = scenario(&[30.0]);
        let a = scenario(&[10.0]);
        let b = scenario(&[20.0]);
        let report = compare([("C", c.as_slice()), ("A", a.as_slice()), ("B", b.as_slice())]);

        let names: Vec<_> = report
            .table
            .iter()
            .map(|r| r.scenario_name.as_str())
            .collect();
        assert_eq!(names, vec!["C", "A", "B"]);
        assert!(report.is_complete());
    }

    #[test]
    fn empty_scenario_does_not_abort_others() {
        let empty: Vec<DerivedTripRecord> = Vec::new();
        let ok = scenario(&[10.0, 20.0]);
        let report = compare([("Empty", empty.as_slice()), ("Base", ok.as_slice())]);

        assert_eq!(report.table.len(), 1);
        assert_eq!(report.table.rows()[0].scenario_name, "Base");
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].position, 0);
        assert!(matches!(
            report.failures[0].error,
            TripDataError::EmptyScenario(_)
        ));
    }

    #[test]
    fn duplicate_scenario_name_is_a_failure() {
        let first = scenario(&[10.0]);
        let second = scenario(&[50.0]);
        let report = compare([("Base", first.as_slice()), ("Base", second.as_slice())]);

        assert_eq!(report.table.len(), 1);
        assert_eq!(report.table.get("Base").unwrap().avg_duration, 10.0);
        assert!(matches!(
            report.failures[0].error,
            TripDataError::DuplicateScenario(_)
        ));
    }

    #[test]
    fn merged_failures_are_sorted_by_position() {
        let empty: Vec<DerivedTripRecord> = Vec::new();
        let mut report = compare([("Empty", empty.as_slice())]);
        report.failures[0].position = 2;
        report.merge_failures([ScenarioFailure {
            position: 0,
            scenario: "Missing".to_string(),
            error: TripDataError::Io {
                path: "missing.xml".into(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            },
        }]);

        let positions: Vec<_> = report.failures.iter().map(|f| f.position).collect();
        assert_eq!(positions, vec![0, 2]);
    }
}
