use std::fs::File;

use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use tempfile::NamedTempFile;
use trip_core::{
    aggregate, compare, derive, parse_file, parse_str, write_trips_parquet, write_tripinfo_xml,
    TripDataError, TripRecord,
};

const BASE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- generated by a traffic simulator -->
<tripinfos xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
    <tripinfo id="flow0.0" depart="0.00" departLane="in_0" arrival="62.00" arrivalLane="out_1" duration="62.00" routeLength="512.40" waitingTime="12.00"/>
    <tripinfo id="flow0.1" depart="900.00" departLane="in_1" arrival="948.50" arrivalLane="out_0" duration="48.50" routeLength="512.40" waitingTime="0.00"/>
    <tripinfo id="flow0.2" depart="1800.00" departLane="in_0" arrival="1855.00" arrivalLane="out_1" duration="55.00" routeLength="498.10"/>
</tripinfos>
"#;

#[test]
fn parse_write_parse_reproduces_records() {
    let records = parse_str(BASE).unwrap();

    let mut buffer = Vec::new();
    write_tripinfo_xml(&records, &mut buffer).unwrap();
    let reparsed = parse_str(std::str::from_utf8(&buffer).unwrap()).unwrap();

    assert_eq!(records, reparsed);
}

#[test]
fn special_characters_survive_round_trip() {
    let records = vec![TripRecord::new(
        "veh<\"0\">&1",
        0.1,
        10.3,
        10.2,
        0.0,
        50.0,
        "lane'a",
        "lane&b",
    )];

    let mut buffer = Vec::new();
    write_tripinfo_xml(&records, &mut buffer).unwrap();
    let reparsed = parse_str(std::str::from_utf8(&buffer).unwrap()).unwrap();

    assert_eq!(records, reparsed);
}

#[test]
fn whitespace_in_identifiers_survives_round_trip() {
    let records = vec![
        TripRecord::new("veh\t0\nx", 0.0, 12.0, 12.0, 0.0, 80.0, "lane\r1", "b"),
        TripRecord::new("veh 1", 1.0, 9.0, 8.0, 2.0, 40.0, "in\t0", "out\r\n1"),
    ];

    let mut buffer = Vec::new();
    write_tripinfo_xml(&records, &mut buffer).unwrap();
    let xml = std::str::from_utf8(&buffer).unwrap();
    assert!(xml.contains(r#"id="veh&#9;0&#10;x""#));
    assert!(xml.contains(r#"departLane="lane&#13;1""#));

    let reparsed = parse_str(xml).unwrap();
    assert_eq!(records, reparsed);
    assert_eq!(reparsed[0].id, "veh\t0\nx");
    assert_eq!(reparsed[1].arrival_lane, "out\r\n1");
}

#[test]
fn full_pipeline_over_file() {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), BASE).unwrap();

    let trips = parse_file(file.path()).unwrap();
    let derived = derive(&trips);
    let summary = aggregate("Base Case", &derived.records).unwrap();

    assert_eq!(summary.trip_count, 3);
    assert_eq!(summary.median_duration, 55.0);
    assert_eq!(summary.max_waiting_time, 12.0);
    assert!((summary.avg_waiting_time - 4.0).abs() < 1e-12);
    assert_eq!(summary.vehicles_per_hour, Some(6.0));
    assert!(derived.warnings.is_empty());
}

#[test]
fn compare_produces_one_row_per_scenario() {
    let base = derive(&parse_str(BASE).unwrap()).records;
    let faster: Vec<_> = base
        .iter()
        .cloned()
        .map(|mut r| {
            r.trip.duration /= 2.0;
            r
        })
        .collect();

    let report = compare([("Base Case", base.as_slice()), ("Optimized Lights", faster.as_slice())]);

    assert!(report.is_complete());
    assert_eq!(report.table.len(), 2);
    assert_eq!(report.table.rows()[0].scenario_name, "Base Case");
    assert_eq!(report.table.rows()[1].scenario_name, "Optimized Lights");
    assert!(report.table.rows()[1].avg_duration < report.table.rows()[0].avg_duration);
}

#[test]
fn malformed_file_reports_malformed_error() {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(file.path(), "<tripinfos><tripinfo depart=\"x\"/></tripinfos>").unwrap();

    assert!(matches!(
        parse_file(file.path()),
        Err(TripDataError::Malformed(_))
    ));
}

#[test]
fn trips_parquet_has_one_row_per_trip() {
    let derived = derive(&parse_str(BASE).unwrap()).records;
    let file = NamedTempFile::new().unwrap();
    write_trips_parquet(file.path(), &derived).unwrap();

    let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(file.path()).unwrap())
        .unwrap()
        .build()
        .unwrap();
    let rows: usize = reader.map(|batch| batch.unwrap().num_rows()).sum();
    assert_eq!(rows, 3);

    let builder =
        ParquetRecordBatchReaderBuilder::try_new(File::open(file.path()).unwrap()).unwrap();
    let names: Vec<_> = builder
        .schema()
        .fields()
        .iter()
        .map(|field| field.name().to_string())
        .collect();
    assert_eq!(names[0], "id");
    assert!(names.contains(&"efficiency".to_string()));
}
