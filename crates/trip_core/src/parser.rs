//! Trip-log parsing.
//!
//! A trip log is an XML document whose root holds one `tripinfo` element per
//! completed trip. Records come back in document order.

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{MalformedInputError, TripDataError};
use crate::trip::TripRecord;

#[path = "parser/attributes.rs"]
mod attributes;
#[path = "parser/validate.rs"]
mod validate;
#[path = "parser/writer.rs"]
mod writer;

pub use validate::{check_duration_consistency, DURATION_TOLERANCE_S};
pub use writer::write_tripinfo_xml;

use attributes::TripElement;

/// Element name of one trip record under the document root.
pub const TRIP_ELEMENT: &str = "tripinfo";

/// Parse trip-log XML text into trip records.
///
/// `waitingTime` defaults to 0 when absent. `depart`, `arrival`, `duration`
/// and `routeLength` are required and must be finite numbers. Root children
/// other than `tripinfo` are ignored.
pub fn parse_str(xml: &str) -> Result<Vec<TripRecord>, MalformedInputError> {
    let document = roxmltree::Document::parse(xml)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for node in document.root_element().children().filter(|n| n.is_element()) {
        if node.tag_name().name() != TRIP_ELEMENT {
            skipped += 1;
            continue;
        }

        let element = TripElement::new(node, records.len());
        let record = TripRecord::new(
            element.text("id"),
            element.required_number("depart")?,
            element.required_number("arrival")?,
            element.required_number("duration")?,
            element.optional_number("waitingTime", 0.0)?,
            element.required_number("routeLength")?,
            element.text("departLane"),
            element.text("arrivalLane"),
        );

        if let Some(message) = check_duration_consistency(&record) {
            debug!("{message}");
        }
        records.push(record);
    }

    if skipped > 0 {
        debug!("Skipped {skipped} non-trip elements");
    }
    Ok(records)
}

/// Read and parse one scenario's trip-log file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Vec<TripRecord>, TripDataError> {
    let path = path.as_ref();
    let xml = fs::read_to_string(path).map_err(|source| TripDataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_str(&xml)?;
    debug!("Parsed {} trips from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<tripinfos>
    <tripinfo id="veh0" depart="0.00" arrival="10.00" duration="10.00" routeLength="50.00" departLane="e1_0" arrivalLane="e2_0"/>
    <personinfo id="ped0" depart="3.00"/>
    <tripinfo id="veh1" depart="5.00" arrival="25.00" duration="20.00" waitingTime="4.50" routeLength="100.00" departLane="e1_1" arrivalLane="e3_0"/>
</tripinfos>"#;

    #[test]
    fn parses_records_in_document_order() {
        let records = parse_str(SAMPLE).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "veh0");
        assert_eq!(records[1].id, "veh1");
        assert_eq!(records[1].waiting_time, 4.5);
        assert_eq!(records[1].depart_lane, "e1_1");
        assert_eq!(records[1].arrival_lane, "e3_0");
    }

    #[test]
    fn missing_waiting_time_defaults_to_zero() {
        let records = parse_str(SAMPLE).unwrap();
        assert_eq!(records[0].waiting_time, 0.0);
        assert_eq!(records[0].speed, Some(5.0));
    }

    #[test]
    fn missing_required_attribute_is_malformed() {
        let xml = r#"<tripinfos><tripinfo id="veh0" depart="0" arrival="10" duration="10"/></tripinfos>"#;
        match parse_str(xml) {
            Err(MalformedInputError::MissingAttribute {
                record,
                trip_id,
                attribute,
            }) => {
                assert_eq!(record, 0);
                assert_eq!(trip_id.as_deref(), Some("veh0"));
                assert_eq!(attribute, "routeLength");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn non_numeric_attribute_is_malformed() {
        let xml = r#"<tripinfos><tripinfo id="veh0" depart="soon" arrival="10" duration="10" routeLength="5"/></tripinfos>"#;
        assert!(matches!(
            parse_str(xml),
            Err(MalformedInputError::InvalidNumber {
                attribute: "depart",
                ..
            })
        ));
    }

    #[test]
    fn non_finite_number_is_malformed() {
        let xml = r#"<tripinfos><tripinfo id="veh0" depart="0" arrival="10" duration="inf" routeLength="5"/></tripinfos>"#;
        assert!(matches!(
            parse_str(xml),
            Err(MalformedInputError::InvalidNumber {
                attribute: "duration",
                ..
            })
        ));
    }

    #[test]
    fn broken_xml_is_malformed() {
        assert!(matches!(
            parse_str("<tripinfos><tripinfo"),
            Err(MalformedInputError::Xml(_))
        ));
    }

    #[test]
    fn empty_root_yields_no_records() {
        assert!(parse_str("<tripinfos/>").unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = parse_file("/nonexistent/tripinfo.xml").unwrap_err();
        assert!(matches!(err, TripDataError::Io { .. }));
    }
}
