//! Descriptive statistics shared by the analyses
//!
//! All functions operate on gap-aware slices (`Option<f64>`) so callers can
//! pass resampled monthly columns directly.

/// Minimum paired observations required before a correlation is reported
pub const MIN_CORR_OBSERVATIONS: usize = 3;

/// Default lag horizon (months) for lead/lag correlation scans
pub const DEFAULT_MAX_LAG_MONTHS: usize = 6;

/// Correlation between a leading indicator and a lagging one at a fixed lag
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct LagCorrelation {
    /// How many months the lagging series was shifted back
    pub lag_months: usize,
    /// Pearson correlation, or `None` with fewer than
    /// [`MIN_CORR_OBSERVATIONS`] paired observations
    pub corr: Option<f64>,
}

/// Trailing moving average with a window of `window` months
///
/// Matches min-periods-1 semantics: each output is the mean of the values
/// present in the trailing window, and is `None` only when the window holds
/// no values at all.
pub fn rolling_mean(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    assert!(window > 0, "window must be positive");

    values
        .iter()
        .enumerate()
        .map(|(idx, _)| {
            let start = idx.saturating_sub(window - 1);
            let present: Vec<f64> = values[start..=idx].iter().filter_map(|v| *v).collect();
            if present.is_empty() {
                None
            } else {
                Some(present.iter().sum::<f64>() / present.len() as f64)
            }
        })
        .collect()
}

/// Pearson correlation coefficient of two equal-length samples
///
/// `None` when fewer than two points remain or either sample has zero
/// variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }

    let mean_x = xs[..n].iter().sum::<f64>() / n as f64;
    let mean_y = ys[..n].iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for i in 0..n {
        let dx = xs[i] - mean_x;
        let dy = ys[i] - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return None;
    }
    Some(cov / denom)
}

/// Lead/lag correlation scan between a leading and a lagging series
///
/// For each lag in `0..=max_lag`, pairs `leading[t]` with
/// `lagging[t + lag]`, drops unpaired rows, and computes the Pearson
/// correlation when at least [`MIN_CORR_OBSERVATIONS`] pairs remain.
pub fn lag_correlations(
    leading: &[Option<f64>],
    lagging: &[Option<f64>],
    max_lag: usize,
) -> Vec<LagCorrelation> {
    (0..=max_lag)
        .map(|lag| {
            let mut xs = Vec::new();
            let mut ys = Vec::new();

            for t in 0..leading.len() {
                let Some(x) = leading[t] else { continue };
                let Some(y) = lagging.get(t + lag).copied().flatten() else {
                    continue;
                };
                xs.push(x);
                ys.push(y);
            }

            let corr = if xs.len() >= MIN_CORR_OBSERVATIONS {
                pearson(&xs, &ys)
            } else {
                None
            };

            LagCorrelation {
                lag_months: lag,
                corr,
            }
        })
        .collect()
}

/// `numerator / denominator`, with a zero or missing denominator masked to
/// `None` rather than producing an infinity
pub fn safe_ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rolling_mean_min_periods_one() {
        let values = vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)];
        let ma = rolling_mean(&values, 3);
        assert_eq!(ma[0], Some(1.0));
        assert_eq!(ma[1], Some(1.5));
        assert_eq!(ma[2], Some(2.0));
        assert_eq!(ma[3], Some(3.0));
    }

    #[test]
    fn test_rolling_mean_skips_gaps() {
        let values = vec![Some(3.0), None, Some(9.0)];
        let ma = rolling_mean(&values, 3);
        assert_eq!(ma[1], Some(3.0));
        // Window over [3, gap, 9] averages the two present values
        assert_eq!(ma[2], Some(6.0));
    }

    #[test]
    fn test_rolling_mean_all_gaps_is_undefined() {
        let values = vec![None, None];
        assert_eq!(rolling_mean(&values, 3), vec![None, None]);
    }

    #[test]
    fn test_pearson_perfect_correlation() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [10.0, 20.0, 30.0, 40.0];
        assert_relative_eq!(pearson(&xs, &ys).unwrap(), 1.0, epsilon = 1e-12);

        let ys_neg = [40.0, 30.0, 20.0, 10.0];
        assert_relative_eq!(pearson(&xs, &ys_neg).unwrap(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pearson_zero_variance_is_undefined() {
        let xs = [1.0, 2.0, 3.0];
        let ys = [5.0, 5.0, 5.0];
        assert_eq!(pearson(&xs, &ys), None);
    }

    #[test]
    fn test_lag_correlation_requires_three_pairs() {
        // Only two months: every lag has < 3 pairs
        let leading = vec![Some(1.0), Some(2.0)];
        let lagging = vec![Some(1.0), Some(2.0)];

        let corrs = lag_correlations(&leading, &lagging, 6);
        assert_eq!(corrs.len(), 7);
        assert!(corrs.iter().all(|c| c.corr.is_none()));
    }

    #[test]
    fn test_lag_correlation_alignment() {
        // lagging is leading shifted forward one month, so lag 1 is perfect
        let leading = vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0), None];
        let lagging = vec![None, Some(1.0), Some(2.0), Some(3.0), Some(4.0)];

        let corrs = lag_correlations(&leading, &lagging, 2);
        assert_relative_eq!(corrs[1].corr.unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lag_correlation_drops_unpaired_rows() {
        let leading = vec![Some(1.0), None, Some(3.0), Some(4.0), Some(2.0)];
        let lagging = vec![Some(2.0), Some(9.0), Some(6.0), None, Some(4.0)];

        // Lag 0 pairs: (1,2), (3,6), (2,4) -> perfectly correlated
        let corrs = lag_correlations(&leading, &lagging, 0);
        assert_relative_eq!(corrs[0].corr.unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_safe_ratio_masks_zero_denominator() {
        assert_eq!(safe_ratio(5.0, 0.0), None);
        assert_eq!(safe_ratio(5.0, 2.0), Some(2.5));
        assert_eq!(safe_ratio(-120.0, 120.0), Some(-1.0));
    }
}
