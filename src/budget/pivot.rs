//! Scenario pivot: flat plan rows to per-scenario monthly columns
//!
//! Deliberately implemented as filter + group-sum + outer-join rather than a
//! pivot table, matching how the planning extracts are shaped downstream.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::{BudgetPlanRow, PlanMetric, Scenario};
use crate::series::month_span;

/// Per-scenario monthly sums on a complete month-start calendar
///
/// Every calendar month between the earliest and latest observed plan month
/// is present; months a scenario never planned hold `None` (not zero).
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioPivot {
    months: Vec<NaiveDate>,
    base: Vec<Option<f64>>,
    stretch: Vec<Option<f64>>,
}

impl ScenarioPivot {
    pub fn months(&self) -> &[NaiveDate] {
        &self.months
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Monthly sums for one scenario, aligned with [`Self::months`]
    pub fn column(&self, scenario: Scenario) -> &[Option<f64>] {
        match scenario {
            Scenario::Base => &self.base,
            Scenario::Stretch => &self.stretch,
        }
    }

    /// Value for one scenario in one month, if planned
    pub fn get(&self, scenario: Scenario, month: NaiveDate) -> Option<f64> {
        let idx = self.months.iter().position(|&m| m == month)?;
        self.column(scenario)[idx]
    }
}

/// Pivot flat plan rows into per-scenario monthly columns for one metric
pub fn pivot_scenarios(rows: &[BudgetPlanRow], metric: PlanMetric) -> ScenarioPivot {
    // Filter per scenario, group by month, sum the metric
    let mut sums: [BTreeMap<NaiveDate, f64>; 2] = [BTreeMap::new(), BTreeMap::new()];
    for (scenario_idx, scenario) in Scenario::ALL.iter().enumerate() {
        for row in rows.iter().filter(|r| r.scenario == *scenario) {
            *sums[scenario_idx].entry(row.month).or_insert(0.0) += row.metric(metric);
        }
    }

    // Outer-join on month, then resample to the full calendar
    let first = sums
        .iter()
        .filter_map(|s| s.first_key_value().map(|(&m, _)| m))
        .min();
    let last = sums
        .iter()
        .filter_map(|s| s.last_key_value().map(|(&m, _)| m))
        .max();

    let (Some(first), Some(last)) = (first, last) else {
        return ScenarioPivot {
            months: Vec::new(),
            base: Vec::new(),
            stretch: Vec::new(),
        };
    };

    let months = month_span(first, last);
    let base = months.iter().map(|m| sums[0].get(m).copied()).collect();
    let stretch = months.iter().map(|m| sums[1].get(m).copied()).collect();

    ScenarioPivot {
        months,
        base,
        stretch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, 1).unwrap()
    }

    fn row(month: NaiveDate, scenario: Scenario, cash: f64) -> BudgetPlanRow {
        BudgetPlanRow {
            month,
            scenario,
            planned_cash_inflow: cash,
            planned_net_losses: 0.0,
        }
    }

    #[test]
    fn test_pivot_groups_and_sums_per_scenario() {
        let rows = vec![
            row(ymd(2023, 1), Scenario::Base, 100.0),
            row(ymd(2023, 1), Scenario::Base, 20.0),
            row(ymd(2023, 1), Scenario::Stretch, 150.0),
        ];

        let pivot = pivot_scenarios(&rows, PlanMetric::CashInflow);
        assert_eq!(pivot.get(Scenario::Base, ymd(2023, 1)), Some(120.0));
        assert_eq!(pivot.get(Scenario::Stretch, ymd(2023, 1)), Some(150.0));
    }

    #[test]
    fn test_pivot_calendar_is_complete_with_gaps_unset() {
        // Base plans Jan and Apr; stretch plans Feb only
        let rows = vec![
            row(ymd(2023, 1), Scenario::Base, 100.0),
            row(ymd(2023, 4), Scenario::Base, 130.0),
            row(ymd(2023, 2), Scenario::Stretch, 150.0),
        ];

        let pivot = pivot_scenarios(&rows, PlanMetric::CashInflow);
        assert_eq!(
            pivot.months(),
            &[ymd(2023, 1), ymd(2023, 2), ymd(2023, 3), ymd(2023, 4)]
        );
        assert_eq!(
            pivot.column(Scenario::Base),
            &[Some(100.0), None, None, Some(130.0)]
        );
        assert_eq!(
            pivot.column(Scenario::Stretch),
            &[None, Some(150.0), None, None]
        );
    }

    #[test]
    fn test_pivot_of_no_rows_is_empty() {
        let pivot = pivot_scenarios(&[], PlanMetric::NetLosses);
        assert!(pivot.is_empty());
    }

    #[test]
    fn test_pivot_reads_requested_metric() {
        let mut plan = row(ymd(2023, 1), Scenario::Base, 100.0);
        plan.planned_net_losses = 40.0;

        let pivot = pivot_scenarios(&[plan], PlanMetric::NetLosses);
        assert_eq!(pivot.get(Scenario::Base, ymd(2023, 1)), Some(40.0));
    }
}
