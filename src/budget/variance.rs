//! Merged budget-vs-actual table and variance columns

use chrono::NaiveDate;
use serde::Serialize;

use super::{Scenario, ScenarioPivot};
use crate::metrics::safe_ratio;
use crate::series::MonthlySeries;

/// One month of the merged budget-vs-actual table
///
/// Variance percentages are fractions (0.25 = +25%). A percentage is `None`
/// whenever the corresponding budget is absent or zero.
#[derive(Debug, Clone, Serialize)]
pub struct VarianceRow {
    pub month: NaiveDate,
    pub actual: f64,
    pub budget_base: Option<f64>,
    pub budget_stretch: Option<f64>,
    pub var_base: Option<f64>,
    pub var_stretch: Option<f64>,
    pub var_base_pct: Option<f64>,
    pub var_stretch_pct: Option<f64>,
}

/// Time-indexed budget-vs-actual comparison, monthly frequency
#[derive(Debug, Clone, Serialize)]
pub struct BudgetVsActual {
    pub rows: Vec<VarianceRow>,
}

impl BudgetVsActual {
    pub fn months(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.month).collect()
    }

    /// Actual series column (always filled; actuals are zero-filled)
    pub fn actual(&self) -> Vec<Option<f64>> {
        self.rows.iter().map(|r| Some(r.actual)).collect()
    }

    pub fn budget(&self, scenario: Scenario) -> Vec<Option<f64>> {
        self.rows
            .iter()
            .map(|r| match scenario {
                Scenario::Base => r.budget_base,
                Scenario::Stretch => r.budget_stretch,
            })
            .collect()
    }

    /// Variance-% column scaled to percent points for charting
    pub fn variance_pct_points(&self, scenario: Scenario) -> Vec<Option<f64>> {
        self.rows
            .iter()
            .map(|r| {
                let pct = match scenario {
                    Scenario::Base => r.var_base_pct,
                    Scenario::Stretch => r.var_stretch_pct,
                };
                pct.map(|p| p * 100.0)
            })
            .collect()
    }
}

/// Merge an actual series with a scenario pivot and derive variances
///
/// The join is left on the actual's calendar: the actual series is
/// zero-filled, budget months outside the actual's span are dropped, and
/// actual months the plan never covered keep `None` budgets.
pub fn budget_vs_actual(actual: &MonthlySeries, pivot: &ScenarioPivot) -> BudgetVsActual {
    let actual = actual.zero_filled();

    let rows = actual
        .months()
        .iter()
        .zip(actual.values())
        .map(|(&month, &value)| {
            let actual_value = value.unwrap_or(0.0);
            let budget_base = pivot.get(Scenario::Base, month);
            let budget_stretch = pivot.get(Scenario::Stretch, month);

            let var_base = budget_base.map(|b| actual_value - b);
            let var_stretch = budget_stretch.map(|b| actual_value - b);

            let var_base_pct = match (var_base, budget_base) {
                (Some(var), Some(budget)) => safe_ratio(var, budget),
                _ => None,
            };
            let var_stretch_pct = match (var_stretch, budget_stretch) {
                (Some(var), Some(budget)) => safe_ratio(var, budget),
                _ => None,
            };

            VarianceRow {
                month,
                actual: actual_value,
                budget_base,
                budget_stretch,
                var_base,
                var_stretch,
                var_base_pct,
                var_stretch_pct,
            }
        })
        .collect();

    BudgetVsActual { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::{pivot_scenarios, BudgetPlanRow, PlanMetric};
    use approx::assert_relative_eq;

    fn ymd(year: i32, month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, 1).unwrap()
    }

    fn plan(month: NaiveDate, scenario: Scenario, cash: f64) -> BudgetPlanRow {
        BudgetPlanRow {
            month,
            scenario,
            planned_cash_inflow: cash,
            planned_net_losses: 0.0,
        }
    }

    #[test]
    fn test_variance_equals_actual_minus_budget() {
        let actual = MonthlySeries::from_observations(vec![
            (ymd(2023, 1), 100.0),
            (ymd(2023, 2), 90.0),
        ]);
        let pivot = pivot_scenarios(
            &[
                plan(ymd(2023, 1), Scenario::Base, 120.0),
                plan(ymd(2023, 2), Scenario::Base, 80.0),
            ],
            PlanMetric::CashInflow,
        );

        let bva = budget_vs_actual(&actual, &pivot);
        for row in &bva.rows {
            let budget = row.budget_base.unwrap();
            assert_relative_eq!(row.var_base.unwrap(), row.actual - budget);
        }
    }

    #[test]
    fn test_zero_budget_masks_percentage() {
        let actual = MonthlySeries::from_observations(vec![(ymd(2023, 1), 50.0)]);
        let pivot = pivot_scenarios(
            &[plan(ymd(2023, 1), Scenario::Base, 0.0)],
            PlanMetric::CashInflow,
        );

        let bva = budget_vs_actual(&actual, &pivot);
        assert_eq!(bva.rows[0].var_base, Some(50.0));
        assert_eq!(bva.rows[0].var_base_pct, None);
    }

    #[test]
    fn test_join_is_left_on_actual_calendar() {
        let actual = MonthlySeries::from_observations(vec![(ymd(2023, 2), 10.0)]);
        // Budget spans Jan..Mar; only Feb survives the join
        let pivot = pivot_scenarios(
            &[
                plan(ymd(2023, 1), Scenario::Base, 1.0),
                plan(ymd(2023, 3), Scenario::Base, 3.0),
            ],
            PlanMetric::CashInflow,
        );

        let bva = budget_vs_actual(&actual, &pivot);
        assert_eq!(bva.rows.len(), 1);
        assert_eq!(bva.rows[0].month, ymd(2023, 2));
        assert_eq!(bva.rows[0].budget_base, None);
        assert_eq!(bva.rows[0].var_base, None);
    }

    #[test]
    fn test_end_to_end_cash_scenario() {
        // Jan–Mar 2023: actual [100, missing, 150], budget base 120 flat
        let actual = MonthlySeries::from_observations(vec![
            (ymd(2023, 1), 100.0),
            (ymd(2023, 3), 150.0),
        ]);
        let pivot = pivot_scenarios(
            &[
                plan(ymd(2023, 1), Scenario::Base, 120.0),
                plan(ymd(2023, 2), Scenario::Base, 120.0),
                plan(ymd(2023, 3), Scenario::Base, 120.0),
            ],
            PlanMetric::CashInflow,
        );

        let bva = budget_vs_actual(&actual, &pivot);
        let actuals: Vec<f64> = bva.rows.iter().map(|r| r.actual).collect();
        assert_eq!(actuals, vec![100.0, 0.0, 150.0]);

        let vars: Vec<f64> = bva.rows.iter().map(|r| r.var_base.unwrap()).collect();
        assert_eq!(vars, vec![-20.0, -120.0, 30.0]);

        let pcts: Vec<f64> = bva.rows.iter().map(|r| r.var_base_pct.unwrap()).collect();
        assert_relative_eq!(pcts[0], -20.0 / 120.0, epsilon = 1e-12);
        assert_relative_eq!(pcts[1], -1.0, epsilon = 1e-12);
        assert_relative_eq!(pcts[2], 0.25, epsilon = 1e-12);
    }
}
