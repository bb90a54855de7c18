//! Budget plan data structures matching the monthly planning extract

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Planning scenario a budget row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scenario {
    /// Base planning case
    Base,
    /// Stretch planning case
    Stretch,
}

impl Scenario {
    /// All known scenarios, in pivot column order
    pub const ALL: [Scenario; 2] = [Scenario::Base, Scenario::Stretch];

    /// String form matching the `scenario_name` column
    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Base => "base",
            Scenario::Stretch => "stretch",
        }
    }
}

/// Which planned metric a pivot or variance run reads from the plan rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanMetric {
    /// `planned_cash_inflow`
    CashInflow,
    /// `planned_net_losses`
    NetLosses,
}

impl PlanMetric {
    /// Column name in the budget plan extract
    pub fn column_name(&self) -> &'static str {
        match self {
            PlanMetric::CashInflow => "planned_cash_inflow",
            PlanMetric::NetLosses => "planned_net_losses",
        }
    }
}

/// A single row of the monthly budget plan
///
/// One row per (month, scenario); the same row carries both planned metrics.
#[derive(Debug, Clone, Serialize)]
pub struct BudgetPlanRow {
    /// Plan month (floored to month start)
    pub month: NaiveDate,

    /// Planning scenario
    pub scenario: Scenario,

    /// Planned cash inflow for the month
    pub planned_cash_inflow: f64,

    /// Planned net credit losses for the month
    pub planned_net_losses: f64,
}

impl BudgetPlanRow {
    /// Value of the requested plan metric
    pub fn metric(&self, metric: PlanMetric) -> f64 {
        match metric {
            PlanMetric::CashInflow => self.planned_cash_inflow,
            PlanMetric::NetLosses => self.planned_net_losses,
        }
    }
}
