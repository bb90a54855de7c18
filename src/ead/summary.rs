//! EAD aggregation by origination vintage and by risk tier

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use super::EadRow;

/// EAD summary for one origination vintage
#[derive(Debug, Clone, Serialize)]
pub struct VintageEad {
    pub origination_month: NaiveDate,
    /// Distinct defaulted loans in the vintage
    pub defaulted_loan_count: usize,
    pub total_principal_unpaid: f64,
    pub avg_principal_unpaid: f64,
}

/// EAD summary for one signup risk tier
#[derive(Debug, Clone, Serialize)]
pub struct RiskTierEad {
    pub risk_tier: String,
    /// Distinct defaulted loans in the tier
    pub defaulted_loan_count: usize,
    pub total_principal_unpaid: f64,
    pub avg_principal_unpaid: f64,
}

#[derive(Default)]
struct Accumulator {
    loan_ids: HashSet<String>,
    total: f64,
    row_count: usize,
}

impl Accumulator {
    fn push(&mut self, row: &EadRow) {
        self.loan_ids.insert(row.loan_id.clone());
        self.total += row.principal_unpaid_on_default;
        self.row_count += 1;
    }

    fn avg(&self) -> f64 {
        self.total / self.row_count as f64
    }
}

fn group_by<K: Ord>(rows: &[EadRow], key: impl Fn(&EadRow) -> K) -> BTreeMap<K, Accumulator> {
    let mut groups: BTreeMap<K, Accumulator> = BTreeMap::new();
    for row in rows {
        groups.entry(key(row)).or_default().push(row);
    }
    groups
}

/// Summarize EAD by origination vintage, sorted chronologically
pub fn summarize_by_vintage(rows: &[EadRow]) -> Vec<VintageEad> {
    group_by(rows, |r| r.origination_month)
        .into_iter()
        .map(|(origination_month, acc)| VintageEad {
            origination_month,
            defaulted_loan_count: acc.loan_ids.len(),
            total_principal_unpaid: acc.total,
            avg_principal_unpaid: acc.avg(),
        })
        .collect()
}

/// Summarize EAD by risk tier, sorted by tier
pub fn summarize_by_risk_tier(rows: &[EadRow]) -> Vec<RiskTierEad> {
    group_by(rows, |r| r.risk_tier_at_signup.clone())
        .into_iter()
        .map(|(risk_tier, acc)| RiskTierEad {
            risk_tier,
            defaulted_loan_count: acc.loan_ids.len(),
            total_principal_unpaid: acc.total,
            avg_principal_unpaid: acc.avg(),
        })
        .collect()
}

/// Both EAD summaries; the groupings are independent, so they run in
/// parallel
pub fn summarize(rows: &[EadRow]) -> (Vec<VintageEad>, Vec<RiskTierEad>) {
    rayon::join(|| summarize_by_vintage(rows), || summarize_by_risk_tier(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ymd(year: i32, month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, 1).unwrap()
    }

    fn row(loan_id: &str, vintage: NaiveDate, tier: &str, principal: f64) -> EadRow {
        EadRow {
            loan_id: loan_id.to_string(),
            origination_date: vintage,
            origination_month: vintage,
            default_date: vintage,
            risk_tier_at_signup: tier.to_string(),
            principal_unpaid_on_default: principal,
        }
    }

    #[test]
    fn test_vintage_summary_counts_distinct_loans() {
        let rows = vec![
            row("L-1", ymd(2022, 3), "A", 100.0),
            row("L-1", ymd(2022, 3), "A", 100.0), // duplicate extract row
            row("L-2", ymd(2022, 3), "B", 300.0),
            row("L-3", ymd(2022, 5), "B", 50.0),
        ];

        let by_vintage = summarize_by_vintage(&rows);
        assert_eq!(by_vintage.len(), 2);

        let march = &by_vintage[0];
        assert_eq!(march.origination_month, ymd(2022, 3));
        assert_eq!(march.defaulted_loan_count, 2);
        assert_relative_eq!(march.total_principal_unpaid, 500.0);
        // Mean is over rows, not distinct loans
        assert_relative_eq!(march.avg_principal_unpaid, 500.0 / 3.0);
    }

    #[test]
    fn test_risk_tier_summary_sorted_by_tier() {
        let rows = vec![
            row("L-1", ymd(2022, 3), "C", 100.0),
            row("L-2", ymd(2022, 4), "A", 200.0),
            row("L-3", ymd(2022, 5), "B", 300.0),
        ];

        let by_tier = summarize_by_risk_tier(&rows);
        let tiers: Vec<&str> = by_tier.iter().map(|t| t.risk_tier.as_str()).collect();
        assert_eq!(tiers, vec!["A", "B", "C"]);
        assert_eq!(by_tier[0].defaulted_loan_count, 1);
        assert_relative_eq!(by_tier[0].avg_principal_unpaid, 200.0);
    }

    #[test]
    fn test_parallel_summaries_match_sequential() {
        let rows = vec![
            row("L-1", ymd(2022, 3), "A", 100.0),
            row("L-2", ymd(2022, 4), "B", 200.0),
        ];

        let (by_vintage, by_tier) = summarize(&rows);
        assert_eq!(by_vintage.len(), summarize_by_vintage(&rows).len());
        assert_eq!(by_tier.len(), summarize_by_risk_tier(&rows).len());
    }
}
