//! Trip-log analysis core.
//!
//! Turns simulator trip logs into per-scenario summaries and a cross-scenario
//! comparison table. Every stage is a pure function over owned values:
//!
//! - [`parser`]: trip-log XML to [`TripRecord`]s, in document order
//! - [`metrics`]: efficiency and time-of-day buckets per trip
//! - [`aggregate`]: means, medians, extrema and throughput for one scenario
//! - [`compare`]: one summary row per scenario, failures collected per scenario
//!
//! ```no_run
//! use trip_core::{aggregate, derive, parse_file};
//!
//! let trips = parse_file("output/tripinfo_base.xml")?;
//! let derived = derive(&trips);
//! let summary = aggregate("Base Case", &derived.records)?;
//! println!("avg duration: {:.1}s", summary.avg_duration);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod aggregate;
pub mod compare;
pub mod distribution;
pub mod error;
pub mod histogram;
pub mod metrics;
pub mod parser;
pub mod stats;
pub mod trip;
pub mod trips_export;

pub use aggregate::{aggregate, ScenarioSummary};
pub use compare::{compare, compare_indexed, ComparisonReport, ComparisonTable, ScenarioFailure};
pub use distribution::BoxStats;
pub use error::{DuplicateScenarioError, EmptyScenarioError, MalformedInputError, TripDataError};
pub use histogram::Histogram;
pub use metrics::{derive, DerivedTrips, MetricsWarning};
pub use parser::{parse_file, parse_str, write_tripinfo_xml};
pub use trip::{DerivedTripRecord, TripRecord, REFERENCE_SPEED_MPS};
pub use trips_export::write_trips_parquet;
