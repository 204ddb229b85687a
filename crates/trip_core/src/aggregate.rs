//! Reduction of one scenario's derived trips into summary statistics.

use serde::Serialize;

use crate::error::EmptyScenarioError;
use crate::stats::Column;
use crate::trip::{DerivedTripRecord, SECONDS_PER_HOUR};

/// Aggregate metrics for one scenario.
///
/// Statistics skip undefined or non-finite per-trip values; the `excluded_*`
/// fields count how many were skipped for each column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioSummary {
    pub scenario_name: String,
    pub avg_duration: f64,
    pub median_duration: f64,
    pub avg_waiting_time: f64,
    pub max_waiting_time: f64,
    /// `None` when no trip has a defined speed.
    pub avg_speed: Option<f64>,
    /// `None` when no trip has a defined efficiency.
    pub avg_efficiency: Option<f64>,
    /// Trips per hour of observed departures; `None` when the latest
    /// departure is at time 0.
    pub vehicles_per_hour: Option<f64>,
    pub trip_count: usize,
    pub p90_duration: f64,
    pub excluded_speed: usize,
    pub excluded_efficiency: usize,
    pub excluded_duration: usize,
    pub excluded_waiting_time: usize,
}

/// Summarize a scenario. Fails when there are no records.
pub fn aggregate(
    scenario_name: &str,
    records: &[DerivedTripRecord],
) -> Result<ScenarioSummary, EmptyScenarioError> {
    let empty = || EmptyScenarioError {
        scenario: scenario_name.to_string(),
    };
    if records.is_empty() {
        return Err(empty());
    }

    let durations = Column::from_values(records.iter().map(|r| r.trip.duration));
    let waiting = Column::from_values(records.iter().map(|r| r.trip.waiting_time));
    let speeds = Column::from_optional(records.iter().map(|r| r.trip.speed));
    let efficiencies = Column::from_optional(records.iter().map(|r| r.efficiency));
    let departures = Column::from_values(records.iter().map(|r| r.trip.depart));

    let trip_count = records.len();
    let vehicles_per_hour = departures
        .max()
        .filter(|&latest| latest > 0.0)
        .map(|latest| trip_count as f64 / (latest / SECONDS_PER_HOUR));

    Ok(ScenarioSummary {
        scenario_name: scenario_name.to_string(),
        avg_duration: durations.mean().ok_or_else(empty)?,
        median_duration: durations.median().ok_or_else(empty)?,
        avg_waiting_time: waiting.mean().ok_or_else(empty)?,
        max_waiting_time: waiting.max().ok_or_else(empty)?,
        avg_speed: speeds.mean(),
        avg_efficiency: efficiencies.mean(),
        vehicles_per_hour,
        trip_count,
        p90_duration: durations.percentile(0.9).ok_or_else(empty)?,
        excluded_speed: speeds.excluded(),
        excluded_efficiency: efficiencies.excluded(),
        excluded_duration: durations.excluded(),
        excluded_waiting_time: waiting.excluded(),
    })
}
