//! Load single-metric monthly actual series
//!
//! The generated actual extracts share one shape: a `year_month` column plus
//! one measured metric column (`actual_cash`, `actual_loss`). The loader is
//! parameterized on the metric column name and returns the series resampled
//! onto a contiguous monthly calendar; zero-filling is left to the caller.

use std::error::Error;
use std::path::Path;

use crate::error::SchemaError;
use crate::schema::{build_header_map, field, require_column};
use crate::series::{parse_month, MonthlySeries};

/// Load a monthly actual series from a CSV file
pub fn load_actual_series<P: AsRef<Path>>(
    path: P,
    value_column: &str,
) -> Result<MonthlySeries, Box<dyn Error>> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    read_actual_series(reader, value_column)
}

/// Load a monthly actual series from any reader (e.g., string buffer)
pub fn load_actual_series_from_reader<R: std::io::Read>(
    reader: R,
    value_column: &str,
) -> Result<MonthlySeries, Box<dyn Error>> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    read_actual_series(reader, value_column)
}

fn read_actual_series<R: std::io::Read>(
    mut reader: csv::Reader<R>,
    value_column: &str,
) -> Result<MonthlySeries, Box<dyn Error>> {
    let header_map = build_header_map(reader.headers()?);
    let month_idx = require_column(&header_map, "year_month")?;
    let value_idx = require_column(&header_map, value_column)?;

    let mut observations = Vec::new();

    for result in reader.records() {
        let record = result?;

        let Some(month_cell) = field(&record, month_idx) else {
            continue;
        };
        let month = parse_month(month_cell)?;

        // An empty metric cell is a gap, filled (with zero) downstream
        let Some(value_cell) = field(&record, value_idx) else {
            continue;
        };
        let value: f64 = value_cell.parse().map_err(|_| SchemaError::InvalidValue {
            column: value_column.to_string(),
            value: value_cell.to_string(),
            reason: "expected a number".to_string(),
        })?;

        observations.push((month, value));
    }

    Ok(MonthlySeries::from_observations(observations))
}
