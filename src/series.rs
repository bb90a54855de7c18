//! Monthly calendar handling and time-indexed series
//!
//! Every table in this crate is indexed by month-start dates. A
//! `MonthlySeries` always covers a contiguous calendar from its first to its
//! last month; months without an observation hold `None`.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

/// Floor a date to the first day of its month
pub fn month_floor(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).expect("first of month is a valid date")
}

/// The month-start immediately after `month`
pub fn next_month(month: NaiveDate) -> NaiveDate {
    let (year, month_no) = if month.month() == 12 {
        (month.year() + 1, 1)
    } else {
        (month.year(), month.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month_no, 1).expect("first of month is a valid date")
}

/// Number of whole months from `first` to `last` (0 when equal)
pub fn months_between(first: NaiveDate, last: NaiveDate) -> i32 {
    (last.year() - first.year()) * 12 + last.month() as i32 - first.month() as i32
}

/// Every month-start between `first` and `last`, inclusive
///
/// Returns an empty calendar when `last` precedes `first`.
pub fn month_span(first: NaiveDate, last: NaiveDate) -> Vec<NaiveDate> {
    let mut months = Vec::new();
    let mut current = month_floor(first);
    let last = month_floor(last);

    while current <= last {
        months.push(current);
        current = next_month(current);
    }

    months
}

/// Parse a date cell and floor it to its month start
///
/// Extracts mostly carry ISO dates, but month columns sometimes arrive as
/// bare `YYYY-MM`. A small fixed set of formats keeps parsing deterministic.
pub fn parse_month(s: &str) -> Result<NaiveDate, String> {
    const FMTS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(month_floor(d));
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
        return Ok(d);
    }
    Err(format!(
        "Invalid date '{s}'. Expected YYYY-MM-DD, YYYY/MM/DD, DD/MM/YYYY, or YYYY-MM."
    ))
}

/// A time series on a contiguous month-start calendar
///
/// The months vector always spans min..max of the source observations with
/// no gaps; missing observations are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySeries {
    months: Vec<NaiveDate>,
    values: Vec<Option<f64>>,
}

impl MonthlySeries {
    /// Build a series from (date, value) observations
    ///
    /// Dates are floored to month starts; when a month appears more than
    /// once the last observation wins. The resulting calendar is the full
    /// month span of the observations.
    pub fn from_observations<I>(observations: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        let by_month: BTreeMap<NaiveDate, f64> = observations
            .into_iter()
            .map(|(date, value)| (month_floor(date), value))
            .collect();

        let Some((&first, _)) = by_month.first_key_value() else {
            return Self {
                months: Vec::new(),
                values: Vec::new(),
            };
        };
        let (&last, _) = by_month.last_key_value().expect("non-empty map");

        let months = month_span(first, last);
        let values = months.iter().map(|m| by_month.get(m).copied()).collect();

        Self { months, values }
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn months(&self) -> &[NaiveDate] {
        &self.months
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn first_month(&self) -> Option<NaiveDate> {
        self.months.first().copied()
    }

    pub fn last_month(&self) -> Option<NaiveDate> {
        self.months.last().copied()
    }

    /// Value recorded for `month`, if the month is in range and filled
    pub fn get(&self, month: NaiveDate) -> Option<f64> {
        let month = month_floor(month);
        let first = self.first_month()?;
        let offset = months_between(first, month);
        if offset < 0 {
            return None;
        }
        self.values.get(offset as usize).copied().flatten()
    }

    /// Copy of this series with every gap replaced by zero
    pub fn zero_filled(&self) -> Self {
        Self {
            months: self.months.clone(),
            values: self.values.iter().map(|v| Some(v.unwrap_or(0.0))).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_month_span_crosses_year_boundary() {
        let months = month_span(ymd(2023, 11, 15), ymd(2024, 2, 1));
        assert_eq!(
            months,
            vec![ymd(2023, 11, 1), ymd(2023, 12, 1), ymd(2024, 1, 1), ymd(2024, 2, 1)]
        );
    }

    #[test]
    fn test_resample_fills_every_calendar_month() {
        // Sparse observations: Jan and Apr only
        let series = MonthlySeries::from_observations(vec![
            (ymd(2023, 4, 1), 4.0),
            (ymd(2023, 1, 1), 1.0),
        ]);

        assert_eq!(series.len(), 4);
        assert_eq!(series.values(), &[Some(1.0), None, None, Some(4.0)]);
        assert_eq!(series.first_month(), Some(ymd(2023, 1, 1)));
        assert_eq!(series.last_month(), Some(ymd(2023, 4, 1)));
    }

    #[test]
    fn test_dates_floored_to_month_start() {
        let series = MonthlySeries::from_observations(vec![(ymd(2023, 6, 17), 9.0)]);
        assert_eq!(series.months(), &[ymd(2023, 6, 1)]);
        assert_eq!(series.get(ymd(2023, 6, 30)), Some(9.0));
    }

    #[test]
    fn test_zero_filled_replaces_gaps_only() {
        let series = MonthlySeries::from_observations(vec![
            (ymd(2023, 1, 1), 100.0),
            (ymd(2023, 3, 1), 150.0),
        ]);

        let filled = series.zero_filled();
        assert_eq!(filled.values(), &[Some(100.0), Some(0.0), Some(150.0)]);
        // Original untouched
        assert_eq!(series.values()[1], None);
    }

    #[test]
    fn test_parse_month_accepts_bare_year_month() {
        assert_eq!(parse_month("2023-07").unwrap(), ymd(2023, 7, 1));
        assert_eq!(parse_month("2023-07-19").unwrap(), ymd(2023, 7, 1));
        assert!(parse_month("July 2023").is_err());
    }

    #[test]
    fn test_empty_observations_yield_empty_series() {
        let series = MonthlySeries::from_observations(Vec::new());
        assert!(series.is_empty());
        assert_eq!(series.get(ymd(2023, 1, 1)), None);
    }
}
