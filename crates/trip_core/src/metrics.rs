//! Per-trip derived metrics.
//!
//! Zero-duration trips are kept: their `efficiency` is `None` and a
//! [`MetricsWarning::ZeroDuration`] is recorded for each one.

use std::fmt;

use log::warn;
use serde::Serialize;

use crate::trip::{ratio, DerivedTripRecord, TripRecord, REFERENCE_SPEED_MPS, SECONDS_PER_HOUR};

/// A trip whose derived metrics could not all be computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MetricsWarning {
    /// `speed` and `efficiency` are undefined because `duration == 0`.
    ZeroDuration { trip_id: String },
}

impl fmt::Display for MetricsWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricsWarning::ZeroDuration { trip_id } => write!(
                f,
                "trip {trip_id:?} has zero duration; speed and efficiency are undefined"
            ),
        }
    }
}

/// Output of [`derive`]: one record per input, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedTrips {
    pub records: Vec<DerivedTripRecord>,
    pub warnings: Vec<MetricsWarning>,
}

/// Compute derived metrics for every trip.
pub fn derive(records: &[TripRecord]) -> DerivedTrips {
    let mut derived = DerivedTrips {
        records: Vec::with_capacity(records.len()),
        warnings: Vec::new(),
    };

    for trip in records {
        if trip.duration == 0.0 {
            let warning = MetricsWarning::ZeroDuration {
                trip_id: trip.id.clone(),
            };
            warn!("{warning}");
            derived.warnings.push(warning);
        }
        derived.records.push(derive_one(trip));
    }

    derived
}

fn derive_one(trip: &TripRecord) -> DerivedTripRecord {
    let theoretical_time = trip.route_length / REFERENCE_SPEED_MPS;
    DerivedTripRecord {
        trip: trip.clone(),
        theoretical_time,
        efficiency: ratio(theoretical_time, trip.duration),
        depart_hour: (trip.depart / SECONDS_PER_HOUR).floor() as u32,
        depart_minute: ((trip.depart % SECONDS_PER_HOUR) / 60.0).floor() as u32,
    }
}
