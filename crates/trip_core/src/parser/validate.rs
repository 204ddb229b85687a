use crate::trip::TripRecord;

/// Largest accepted gap between `duration` and `arrival - depart`, in seconds.
pub const DURATION_TOLERANCE_S: f64 = 1e-6;

/// Reports a trip whose `duration` disagrees with `arrival - depart`.
/// Returns an error message if the values disagree, None if consistent.
///
/// Mismatches are informational only; the parser keeps the reported duration.
pub fn check_duration_consistency(trip: &TripRecord) -> Option<String> {
    let elapsed = trip.arrival - trip.depart;
    if (elapsed - trip.duration).abs() > DURATION_TOLERANCE_S {
        return Some(format!(
            "Trip {:?}: duration ({}) != arrival ({}) - depart ({})",
            trip.id, trip.duration, trip.arrival, trip.depart
        ));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consistent_trip_passes() {
        let trip = TripRecord::new("veh0", 1.5, 11.5, 10.0, 0.0, 50.0, "", "");
        assert!(check_duration_consistency(&trip).is_none());
    }

    #[test]
    fn mismatched_duration_is_reported() {
        let trip = TripRecord::new("veh0", 0.0, 10.0, 12.0, 0.0, 50.0, "", "");
        let message = check_duration_consistency(&trip).unwrap();
        assert!(message.contains("veh0"));
    }
}
