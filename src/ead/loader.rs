//! Load defaulted-loan rows from the exposure-at-default extract

use std::error::Error;
use std::path::Path;

use chrono::NaiveDate;
use csv::Reader;

use super::EadRow;
use crate::series::parse_month;

/// Raw CSV row matching the exposure_at_default extract columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "loan_id")]
    loan_id: String,
    #[serde(rename = "origination_date")]
    origination_date: String,
    #[serde(rename = "origination_month")]
    origination_month: String,
    #[serde(rename = "default_date")]
    default_date: String,
    #[serde(rename = "risk_tier_at_signup")]
    risk_tier_at_signup: String,
    #[serde(rename = "principal_unpaid_on_default")]
    principal_unpaid_on_default: f64,
}

impl CsvRow {
    fn to_ead_row(self) -> Result<EadRow, Box<dyn Error>> {
        Ok(EadRow {
            origination_date: parse_date(&self.origination_date)?,
            origination_month: parse_month(&self.origination_month)?,
            default_date: parse_date(&self.default_date)?,
            loan_id: self.loan_id,
            risk_tier_at_signup: self.risk_tier_at_signup,
            principal_unpaid_on_default: self.principal_unpaid_on_default,
        })
    }
}

// Full-precision dates; unlike vintage months these must not be floored.
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    const FMTS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    Err(format!(
        "Invalid date '{s}'. Expected YYYY-MM-DD, YYYY/MM/DD, or DD/MM/YYYY."
    ))
}

/// Load all EAD rows from a CSV file
pub fn load_ead_rows<P: AsRef<Path>>(path: P) -> Result<Vec<EadRow>, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    let mut rows = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        rows.push(row.to_ead_row()?);
    }

    Ok(rows)
}

/// Load EAD rows from any reader (e.g., string buffer)
pub fn load_ead_rows_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<EadRow>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut rows = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        rows.push(row.to_ead_row()?);
    }

    Ok(rows)
}
