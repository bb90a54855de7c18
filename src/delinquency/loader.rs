//! Load the monthly portfolio delinquency extract
//!
//! The rate column name varies across extract versions; the loader resolves
//! it through a fixed alias list and reports every accepted name when none
//! matches. Rows with an unparseable month are dropped, matching how the
//! extract is consumed elsewhere.

use std::collections::BTreeMap;
use std::error::Error;
use std::path::Path;

use chrono::NaiveDate;
use log::warn;

use super::{DelinquencyTable, DpdBucket};
use crate::error::SchemaError;
use crate::schema::{build_header_map, field, parse_opt_f64, require_column};
use crate::series::{month_span, parse_month};

/// Accepted DPD 30+ rate column names, in resolution order
///
/// `round` is a legacy alias emitted by an old extract query; it is kept
/// only here.
pub const RATE_COLUMN_ALIASES: [&str; 3] =
    ["dpd_30_plus_rate", "dpd_30_plus_rate_pct", "round"];

#[derive(Debug, Clone, Default)]
struct RawMonth {
    rate: Option<f64>,
    defaulted: Option<f64>,
    active: Option<f64>,
    buckets: [Option<f64>; 5],
}

/// Load the delinquency table from a CSV file
pub fn load_delinquency_table<P: AsRef<Path>>(
    path: P,
) -> Result<DelinquencyTable, Box<dyn Error>> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;
    read_delinquency_table(reader)
}

/// Load the delinquency table from any reader (e.g., string buffer)
pub fn load_delinquency_table_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<DelinquencyTable, Box<dyn Error>> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    read_delinquency_table(reader)
}

fn read_delinquency_table<R: std::io::Read>(
    mut reader: csv::Reader<R>,
) -> Result<DelinquencyTable, Box<dyn Error>> {
    let header_map = build_header_map(reader.headers()?);

    let month_idx = require_column(&header_map, "year_month")?;
    let defaulted_idx = require_column(&header_map, "defaulted_loans")?;

    let (rate_column, rate_idx) = RATE_COLUMN_ALIASES
        .iter()
        .find_map(|name| header_map.get(*name).map(|&idx| (name.to_string(), idx)))
        .ok_or_else(|| SchemaError::no_alias("DPD 30+ rate", &RATE_COLUMN_ALIASES))?;

    let active_idx = header_map.get("active_loans").copied();

    // Bucket columns participate all-or-nothing
    let bucket_idx: Option<[usize; 5]> = {
        let found: Vec<Option<usize>> = DpdBucket::ALL
            .iter()
            .map(|b| header_map.get(b.column_name()).copied())
            .collect();
        if found.iter().all(|i| i.is_some()) {
            let mut idx = [0usize; 5];
            for (slot, i) in idx.iter_mut().zip(found) {
                *slot = i.expect("checked all present");
            }
            Some(idx)
        } else {
            None
        }
    };

    let mut by_month: BTreeMap<NaiveDate, RawMonth> = BTreeMap::new();
    let mut dropped_rows = 0usize;

    for result in reader.records() {
        let record = result?;

        let month = match field(&record, month_idx).map(parse_month) {
            Some(Ok(month)) => month,
            _ => {
                dropped_rows += 1;
                continue;
            }
        };

        let raw = by_month.entry(month).or_default();
        raw.rate = parse_opt_f64(field(&record, rate_idx));
        raw.defaulted = parse_opt_f64(field(&record, defaulted_idx));
        raw.active = active_idx.and_then(|idx| parse_opt_f64(field(&record, idx)));
        if let Some(bucket_idx) = bucket_idx {
            for (slot, idx) in raw.buckets.iter_mut().zip(bucket_idx) {
                *slot = parse_opt_f64(field(&record, idx));
            }
        }
    }

    if dropped_rows > 0 {
        warn!("dropped {dropped_rows} delinquency rows with unparseable year_month");
    }

    let months = match (by_month.first_key_value(), by_month.last_key_value()) {
        (Some((&first, _)), Some((&last, _))) => month_span(first, last),
        _ => Vec::new(),
    };

    let column = |pick: fn(&RawMonth) -> Option<f64>| -> Vec<Option<f64>> {
        months
            .iter()
            .map(|m| by_month.get(m).and_then(pick))
            .collect()
    };

    let dpd_30_plus_rate = column(|r| r.rate);
    let defaulted_loans = column(|r| r.defaulted);
    let active_loans = active_idx.map(|_| column(|r| r.active));
    let buckets = bucket_idx.map(|_| {
        let mut cols: [Vec<Option<f64>>; 5] = Default::default();
        for (slot, bucket) in cols.iter_mut().zip(0..5) {
            *slot = months
                .iter()
                .map(|m| by_month.get(m).and_then(|r| r.buckets[bucket]))
                .collect();
        }
        cols
    });

    Ok(DelinquencyTable {
        months,
        dpd_30_plus_rate,
        defaulted_loans,
        active_loans,
        buckets,
        rate_column,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ymd(year: i32, month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, 1).unwrap()
    }

    const FULL: &str = "\
year_month,active_loans,current_loans,dpd_1_29_loans,dpd_30_59_loans,dpd_60_89_loans,dpd_90_plus_loans,defaulted_loans,dpd_30_plus_rate
2023-01-01,100,80,10,6,3,1,2,0.10
2023-03-01,120,90,15,9,4,2,3,0.125
";

    #[test]
    fn test_load_resamples_and_keeps_optional_columns() {
        let table = load_delinquency_table_from_reader(FULL.as_bytes()).unwrap();

        assert_eq!(table.months, vec![ymd(2023, 1), ymd(2023, 2), ymd(2023, 3)]);
        assert_eq!(table.dpd_30_plus_rate, vec![Some(0.10), None, Some(0.125)]);
        assert_eq!(table.defaulted_loans, vec![Some(2.0), None, Some(3.0)]);
        assert_eq!(table.rate_column, "dpd_30_plus_rate");

        let buckets = table.buckets.as_ref().unwrap();
        assert_eq!(buckets[0], vec![Some(80.0), None, Some(90.0)]);
        assert_eq!(buckets[4], vec![Some(1.0), None, Some(2.0)]);
    }

    #[test]
    fn test_load_default_delinquency_extract() {
        let table = load_delinquency_table("data/generated/portfolio_delinquency_trend.csv")
            .expect("Failed to load delinquency extract");
        assert_eq!(table.len(), 18);
        assert!(table.buckets.is_some());
        assert!(table.active_loans.is_some());
        assert_eq!(table.rate_column, "dpd_30_plus_rate");
    }

    #[test]
    fn test_rate_alias_fallback_to_round() {
        let csv = "year_month,defaulted_loans,round\n2023-01-01,2,12.5\n";
        let table = load_delinquency_table_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.rate_column, "round");
        assert_eq!(table.dpd_30_plus_rate, vec![Some(12.5)]);
        assert!(table.buckets.is_none());
        assert!(table.active_loans.is_none());
    }

    #[test]
    fn test_no_rate_alias_lists_every_accepted_name() {
        let csv = "year_month,defaulted_loans\n2023-01-01,2\n";
        let err = load_delinquency_table_from_reader(csv.as_bytes()).unwrap_err();
        let message = err.to_string();
        for alias in RATE_COLUMN_ALIASES {
            assert!(message.contains(alias), "missing alias in: {message}");
        }
    }

    #[test]
    fn test_missing_defaulted_loans_is_named() {
        let csv = "year_month,dpd_30_plus_rate\n2023-01-01,0.1\n";
        let err = load_delinquency_table_from_reader(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("`defaulted_loans`"));
    }

    #[test]
    fn test_unparseable_months_are_dropped() {
        let csv = "year_month,defaulted_loans,round\nnot-a-date,9,9.0\n2023-02-01,2,0.1\n";
        let table = load_delinquency_table_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.months, vec![ymd(2023, 2)]);
    }
}
