//! Trip records as read from a trip log, and their derived form.

use serde::Serialize;

/// Reference speed for theoretical travel time: 50 km/h in m/s.
pub const REFERENCE_SPEED_MPS: f64 = 13.89;

pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// One completed vehicle trip.
///
/// `duration` is trusted as reported by the simulator; it is not recomputed
/// from `arrival - depart`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    pub id: String,
    /// Departure time in seconds since simulation start.
    pub depart: f64,
    /// Arrival time in seconds since simulation start.
    pub arrival: f64,
    /// Travel duration in seconds.
    pub duration: f64,
    /// Seconds spent waiting; 0 when the log omits it.
    pub waiting_time: f64,
    /// Route length in meters.
    pub route_length: f64,
    /// `route_length / duration`, or `None` for zero-duration trips.
    pub speed: Option<f64>,
    pub depart_lane: String,
    pub arrival_lane: String,
}

impl TripRecord {
    /// Builds a record and computes its speed.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        depart: f64,
        arrival: f64,
        duration: f64,
        waiting_time: f64,
        route_length: f64,
        depart_lane: impl Into<String>,
        arrival_lane: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            depart,
            arrival,
            duration,
            waiting_time,
            route_length,
            speed: ratio(route_length, duration),
            depart_lane: depart_lane.into(),
            arrival_lane: arrival_lane.into(),
        }
    }
}

/// A trip record augmented with efficiency and time-of-day buckets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedTripRecord {
    #[serde(flatten)]
    pub trip: TripRecord,
    /// Seconds the route would take at [`REFERENCE_SPEED_MPS`].
    pub theoretical_time: f64,
    /// `theoretical_time / duration`, or `None` for zero-duration trips.
    pub efficiency: Option<f64>,
    pub depart_hour: u32,
    pub depart_minute: u32,
}

/// `numerator / denominator`, undefined when the result is not finite.
pub(crate) fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    let value = numerator / denominator;
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_is_length_over_duration() {
        let trip = TripRecord::new("veh0", 0.0, 10.0, 10.0, 0.0, 100.0, "a_0", "b_0");
        assert_eq!(trip.speed, Some(10.0));
    }

    #[test]
    fn zero_duration_has_no_speed() {
        let trip = TripRecord::new("veh0", 5.0, 5.0, 0.0, 0.0, 100.0, "a_0", "b_0");
        assert_eq!(trip.speed, None);
    }
}
