//! Per-trip table export for external charting tools.

use std::error::Error;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray, UInt32Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use crate::trip::DerivedTripRecord;

fn f64_field(name: &'static str) -> Field {
    Field::new(name, DataType::Float64, false)
}

fn nullable_f64_field(name: &'static str) -> Field {
    Field::new(name, DataType::Float64, true)
}

fn utf8_field(name: &'static str) -> Field {
    Field::new(name, DataType::Utf8, false)
}

fn u32_field(name: &'static str) -> Field {
    Field::new(name, DataType::UInt32, false)
}

pub fn trips_schema() -> Schema {
    Schema::new(vec![
        utf8_field("id"),
        f64_field("depart"),
        f64_field("arrival"),
        f64_field("duration"),
        f64_field("waiting_time"),
        f64_field("route_length"),
        nullable_f64_field("speed"),
        utf8_field("depart_lane"),
        utf8_field("arrival_lane"),
        f64_field("theoretical_time"),
        nullable_f64_field("efficiency"),
        u32_field("depart_hour"),
        u32_field("depart_minute"),
    ])
}

/// Write derived trip records to a Parquet file, one row per trip.
pub fn write_trips_parquet<P: AsRef<Path>>(
    path: P,
    records: &[DerivedTripRecord],
) -> Result<(), Box<dyn Error>> {
    let arrays: Vec<ArrayRef> = vec![
        string_column(records, |r| r.trip.id.as_str()),
        float_column(records, |r| r.trip.depart),
        float_column(records, |r| r.trip.arrival),
        float_column(records, |r| r.trip.duration),
        float_column(records, |r| r.trip.waiting_time),
        float_column(records, |r| r.trip.route_length),
        optional_float_column(records, |r| r.trip.speed),
        string_column(records, |r| r.trip.depart_lane.as_str()),
        string_column(records, |r| r.trip.arrival_lane.as_str()),
        float_column(records, |r| r.theoretical_time),
        optional_float_column(records, |r| r.efficiency),
        u32_column(records, |r| r.depart_hour),
        u32_column(records, |r| r.depart_minute),
    ];

    write_record_batch(path, trips_schema(), arrays)
}

fn float_column(
    records: &[DerivedTripRecord],
    value: impl Fn(&DerivedTripRecord) -> f64,
) -> ArrayRef {
    Arc::new(Float64Array::from(records.iter().map(value).collect::<Vec<_>>()))
}

fn optional_float_column(
    records: &[DerivedTripRecord],
    value: impl Fn(&DerivedTripRecord) -> Option<f64>,
) -> ArrayRef {
    Arc::new(Float64Array::from(records.iter().map(value).collect::<Vec<_>>()))
}

fn string_column<'a>(
    records: &'a [DerivedTripRecord],
    value: impl Fn(&'a DerivedTripRecord) -> &'a str,
) -> ArrayRef {
    Arc::new(StringArray::from(records.iter().map(value).collect::<Vec<_>>()))
}

fn u32_column(
    records: &[DerivedTripRecord],
    value: impl Fn(&DerivedTripRecord) -> u32,
) -> ArrayRef {
    Arc::new(UInt32Array::from(records.iter().map(value).collect::<Vec<_>>()))
}

fn write_record_batch<P: AsRef<Path>>(
    path: P,
    schema: Schema,
    arrays: Vec<ArrayRef>,
) -> Result<(), Box<dyn Error>> {
    let schema = Arc::new(schema);
    let batch = RecordBatch::try_new(schema.clone(), arrays)?;
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}
