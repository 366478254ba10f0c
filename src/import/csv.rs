//! CSV parsing for historical run logs
//!
//! Expected columns (header row required):
//! `date,vo2max,avg_power,avg_hr,duration,pace,distance,trimp,run_type`
//! with `YYYY-MM-DD` dates, `H:MM:SS` durations and `MM:SS` paces.
//! Records are kept in file order.

use chrono::NaiveDate;
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::io::Read;

use crate::config::Tunables;
use crate::error::{PlanError, Result};
use crate::load::estimate_load;
use crate::models::{HistoricalRun, RunType};

const REQUIRED_COLUMNS: [&str; 9] = [
    "date",
    "vo2max",
    "avg_power",
    "avg_hr",
    "duration",
    "pace",
    "distance",
    "trimp",
    "run_type",
];

/// Parse a historical run log from any reader.
///
/// The caller hands in fully-materialized data (a file already read, an
/// upload buffer); this function does no IO of its own beyond the reader.
/// An empty `trimp` value is computed from the record's duration and
/// average heart rate; every other empty required value is an error.
pub fn parse_history<R: Read>(input: R, tunables: &Tunables) -> Result<Vec<HistoricalRun>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| PlanError::input_format("header", &e.to_string()))?
        .clone();

    let columns = column_indices(&headers)?;

    let mut runs = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| PlanError::input_format("record", &e.to_string()))?;

        let duration_minutes = parse_duration(field(&record, &columns, "duration")?)?;
        let avg_hr = parse_number("avg_hr", field(&record, &columns, "avg_hr")?)?;

        let trimp_raw = field(&record, &columns, "trimp")?;
        let load = if trimp_raw.is_empty() {
            estimate_load(duration_minutes, avg_hr, tunables)
        } else {
            parse_number("trimp", trimp_raw)?
        };

        runs.push(HistoricalRun {
            date: parse_date(field(&record, &columns, "date")?)?,
            vo2max: parse_number("vo2max", field(&record, &columns, "vo2max")?)?,
            avg_power: parse_number("avg_power", field(&record, &columns, "avg_power")?)?,
            avg_hr,
            duration_minutes,
            pace_min_per_km: parse_pace(field(&record, &columns, "pace")?)?,
            distance_km: parse_number("distance", field(&record, &columns, "distance")?)?,
            load,
            run_type: RunType::from(field(&record, &columns, "run_type")?),
        });
    }

    Ok(runs)
}

/// A record's value for a named column. Empty values are missing-field
/// errors, except `trimp`, whose absence the caller computes around.
fn field<'r>(
    record: &'r csv::StringRecord,
    columns: &HashMap<&'static str, usize>,
    name: &'static str,
) -> Result<&'r str> {
    let value = record.get(columns[name]).unwrap_or("").trim();
    if value.is_empty() && name != "trimp" {
        return Err(PlanError::missing_field(name));
    }
    Ok(value)
}

/// Map required column names to header positions; any absent column is a
/// missing-field error
fn column_indices(headers: &csv::StringRecord) -> Result<HashMap<&'static str, usize>> {
    let mut columns = HashMap::new();
    for name in REQUIRED_COLUMNS {
        let index = headers
            .iter()
            .position(|header| normalize_header(header) == name)
            .ok_or_else(|| PlanError::missing_field(name))?;
        columns.insert(name, index);
    }
    Ok(columns)
}

/// Lowercase and strip whitespace plus any leading UTF-8 BOM
fn normalize_header(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_lowercase()
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| PlanError::input_format("date", value))
}

fn parse_number(field: &str, value: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .map_err(|_| PlanError::input_format(field, value))
}

/// `H:MM:SS` to minutes
fn parse_duration(value: &str) -> Result<f64> {
    let parts = parse_time_parts("duration", value, 3)?;
    Ok(parts[0] * 60.0 + parts[1] + parts[2] / 60.0)
}

/// `MM:SS` to minutes per kilometer
fn parse_pace(value: &str) -> Result<f64> {
    let parts = parse_time_parts("pace", value, 2)?;
    Ok(parts[0] + parts[1] / 60.0)
}

fn parse_time_parts(field: &str, value: &str, expected: usize) -> Result<Vec<f64>> {
    let parts: Vec<&str> = value.split(':').collect();
    if parts.len() != expected {
        return Err(PlanError::input_format(field, value));
    }
    parts
        .iter()
        .map(|part| {
            part.parse::<u32>()
                .map(f64::from)
                .map_err(|_| PlanError::input_format(field, value))
        })
        .collect()
}
