//! Derived delinquency trend metrics

use chrono::NaiveDate;

use super::DelinquencyTable;
use crate::metrics::{
    lag_correlations, rolling_mean, LagCorrelation, DEFAULT_MAX_LAG_MONTHS,
};

/// Rates whose maximum is at or below this are treated as fractions and
/// scaled to percent
pub const FRACTION_MAX_THRESHOLD: f64 = 1.5;

/// Moving-average window for trend smoothing
pub const TREND_MA_WINDOW: usize = 3;

/// Delinquency trend table with derived columns
#[derive(Debug, Clone)]
pub struct DelinquencyTrend {
    pub months: Vec<NaiveDate>,

    /// DPD 30+ rate in percent points
    pub rate_pct: Vec<Option<f64>>,
    /// 3-month moving average of the rate
    pub rate_pct_ma3: Vec<Option<f64>>,

    pub defaulted_loans: Vec<Option<f64>>,
    pub defaulted_loans_ma3: Vec<Option<f64>>,

    /// Bucket shares of active loans (percent), aligned with
    /// [`super::DpdBucket::ALL`]; present only when the extract carried the
    /// bucket and active-loan columns
    pub bucket_shares_pct: Option<[Vec<Option<f64>>; 5]>,

    /// Correlation of the DPD 30+ rate now vs defaults 0-6 months later
    pub lag_correlations: Vec<LagCorrelation>,
}

/// Derive trend metrics from a raw delinquency table
pub fn derive_trend(table: &DelinquencyTable) -> DelinquencyTrend {
    let rate_pct = normalize_rate_to_pct(&table.dpd_30_plus_rate);
    let rate_pct_ma3 = rolling_mean(&rate_pct, TREND_MA_WINDOW);
    let defaulted_loans_ma3 = rolling_mean(&table.defaulted_loans, TREND_MA_WINDOW);

    let bucket_shares_pct = match (&table.buckets, &table.active_loans) {
        (Some(buckets), Some(active)) => {
            let mut shares: [Vec<Option<f64>>; 5] = Default::default();
            for (share_col, bucket_col) in shares.iter_mut().zip(buckets) {
                *share_col = bucket_col
                    .iter()
                    .zip(active)
                    .map(|(count, active)| match (count, active) {
                        (Some(count), Some(active)) if *active > 0.0 => {
                            Some(count / active * 100.0)
                        }
                        _ => None,
                    })
                    .collect();
            }
            Some(shares)
        }
        _ => None,
    };

    let lag_correlations =
        lag_correlations(&rate_pct, &table.defaulted_loans, DEFAULT_MAX_LAG_MONTHS);

    DelinquencyTrend {
        months: table.months.clone(),
        rate_pct,
        rate_pct_ma3,
        defaulted_loans: table.defaulted_loans.clone(),
        defaulted_loans_ma3,
        bucket_shares_pct,
        lag_correlations,
    }
}

/// Scale a rate series to percent points when it arrives as fractions
///
/// A series already in percent (e.g. 12.3) is left untouched.
fn normalize_rate_to_pct(rate: &[Option<f64>]) -> Vec<Option<f64>> {
    let max = rate
        .iter()
        .filter_map(|v| *v)
        .fold(f64::NEG_INFINITY, f64::max);

    if max.is_finite() && max <= FRACTION_MAX_THRESHOLD {
        rate.iter().map(|v| v.map(|r| r * 100.0)).collect()
    } else {
        rate.to_vec()
    }
}
