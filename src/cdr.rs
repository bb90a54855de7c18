//! Cumulative default rate (12M horizon) by origination vintage

use std::error::Error;
use std::path::Path;

use chrono::NaiveDate;
use csv::Reader;
use log::warn;
use serde::Serialize;

use crate::series::parse_month;

/// Tolerance (percent points) for the loaded-vs-recomputed rate cross-check
const RATE_CHECK_TOLERANCE_PCT: f64 = 0.05;

/// One origination vintage with its 12-month cumulative default rate
#[derive(Debug, Clone, Serialize)]
pub struct CdrRow {
    /// Origination vintage (month start)
    pub origination_month: NaiveDate,

    /// Loans originated in the vintage
    pub n_loans_in_vintage: u32,

    /// Loans that defaulted within 12 months of origination
    pub n_default_12m_loans: u32,

    /// 12M cumulative default rate, percent
    pub cdr_12m: f64,
}

/// Raw CSV row matching the cumulative_default_rate extract columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "origination_month")]
    origination_month: String,
    #[serde(rename = "n_loans_in_vintage")]
    n_loans_in_vintage: u32,
    #[serde(rename = "n_default_12m_loans")]
    n_default_12m_loans: u32,
    #[serde(rename = "cdr_12m")]
    cdr_12m: f64,
}

impl CsvRow {
    fn to_cdr_row(self) -> Result<CdrRow, Box<dyn Error>> {
        Ok(CdrRow {
            origination_month: parse_month(&self.origination_month)?,
            n_loans_in_vintage: self.n_loans_in_vintage,
            n_default_12m_loans: self.n_default_12m_loans,
            cdr_12m: self.cdr_12m,
        })
    }
}

/// Load CDR vintage rows from a CSV file, sorted chronologically
pub fn load_cdr_rows<P: AsRef<Path>>(path: P) -> Result<Vec<CdrRow>, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    read_cdr_rows(&mut reader)
}

/// Load CDR vintage rows from any reader (e.g., string buffer)
pub fn load_cdr_rows_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<CdrRow>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    read_cdr_rows(&mut csv_reader)
}

fn read_cdr_rows<R: std::io::Read>(
    reader: &mut Reader<R>,
) -> Result<Vec<CdrRow>, Box<dyn Error>> {
    let mut rows = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        rows.push(row.to_cdr_row()?);
    }

    rows.sort_by_key(|r| r.origination_month);
    Ok(rows)
}

/// Cross-check the loaded rate against the count columns
///
/// The extract stays authoritative; mismatches are logged, not corrected.
/// Empty vintages are skipped. Returns the number of mismatching rows.
pub fn check_rates(rows: &[CdrRow]) -> usize {
    let mut mismatches = 0;

    for row in rows {
        if row.n_loans_in_vintage == 0 {
            continue;
        }
        let expected = 100.0 * row.n_default_12m_loans as f64 / row.n_loans_in_vintage as f64;
        if (row.cdr_12m - expected).abs() > RATE_CHECK_TOLERANCE_PCT {
            warn!(
                "cdr_12m mismatch for vintage {}: extract has {:.4}%, counts imply {:.4}%",
                row.origination_month.format("%Y-%m"),
                row.cdr_12m,
                expected
            );
            mismatches += 1;
        }
    }

    mismatches
}
