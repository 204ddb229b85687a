//! Error types for the trip pipeline.
//!
//! Every failure is scoped to one scenario: a comparison run collects these
//! per scenario instead of aborting the batch.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Trip-log content could not be turned into trip records.
#[derive(Debug)]
pub enum MalformedInputError {
    /// The document is not well-formed XML.
    Xml(roxmltree::Error),
    /// A mandatory attribute is absent from the `record`-th trip element.
    MissingAttribute {
        record: usize,
        trip_id: Option<String>,
        attribute: &'static str,
    },
    /// A numeric attribute is present but not a finite decimal number.
    InvalidNumber {
        record: usize,
        trip_id: Option<String>,
        attribute: &'static str,
        value: String,
    },
}

impl fmt::Display for MalformedInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedInputError::Xml(err) => write!(f, "not well-formed XML: {err}"),
            MalformedInputError::MissingAttribute {
                record,
                trip_id,
                attribute,
            } => write!(
                f,
                "trip record {record}{}: missing required attribute `{attribute}`",
                describe_trip(trip_id)
            ),
            MalformedInputError::InvalidNumber {
                record,
                trip_id,
                attribute,
                value,
            } => write!(
                f,
                "trip record {record}{}: attribute `{attribute}` is not a finite number: {value:?}",
                describe_trip(trip_id)
            ),
        }
    }
}

impl std::error::Error for MalformedInputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MalformedInputError::Xml(err) => Some(err),
            _ => None,
        }
    }
}

impl From<roxmltree::Error> for MalformedInputError {
    fn from(err: roxmltree::Error) -> Self {
        MalformedInputError::Xml(err)
    }
}

fn describe_trip(trip_id: &Option<String>) -> String {
    match trip_id {
        Some(id) => format!(" (id {id:?})"),
        None => String::new(),
    }
}

/// A scenario produced no trip records, so none of its statistics exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyScenarioError {
    pub scenario: String,
}

impl fmt::Display for EmptyScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scenario {:?} has no trip records", self.scenario)
    }
}

impl std::error::Error for EmptyScenarioError {}

/// The same scenario name appeared twice in one comparison run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateScenarioError {
    pub scenario: String,
}

impl fmt::Display for DuplicateScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "scenario name {:?} is already used earlier in this run",
            self.scenario
        )
    }
}

impl std::error::Error for DuplicateScenarioError {}

/// Any failure that takes a single scenario out of a comparison run.
#[derive(Debug)]
pub enum TripDataError {
    Io { path: PathBuf, source: io::Error },
    Malformed(MalformedInputError),
    EmptyScenario(EmptyScenarioError),
    DuplicateScenario(DuplicateScenarioError),
}

impl fmt::Display for TripDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripDataError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            TripDataError::Malformed(err) => write!(f, "malformed trip log: {err}"),
            TripDataError::EmptyScenario(err) => err.fmt(f),
            TripDataError::DuplicateScenario(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for TripDataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TripDataError::Io { source, .. } => Some(source),
            TripDataError::Malformed(err) => Some(err),
            TripDataError::EmptyScenario(err) => Some(err),
            TripDataError::DuplicateScenario(err) => Some(err),
        }
    }
}

impl From<MalformedInputError> for TripDataError {
    fn from(err: MalformedInputError) -> Self {
        TripDataError::Malformed(err)
    }
}

impl From<EmptyScenarioError> for TripDataError {
    fn from(err: EmptyScenarioError) -> Self {
        TripDataError::EmptyScenario(err)
    }
}

impl From<DuplicateScenarioError> for TripDataError {
    fn from(err: DuplicateScenarioError) -> Self {
        TripDataError::DuplicateScenario(err)
    }
}
