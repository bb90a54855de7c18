//! Budget plan handling: loading, scenario pivot, and variance vs actuals

mod data;
pub mod loader;
mod pivot;
mod variance;

pub use data::{BudgetPlanRow, PlanMetric, Scenario};
pub use loader::{load_budget_plan, load_budget_plan_from_reader};
pub use pivot::{pivot_scenarios, ScenarioPivot};
pub use variance::{budget_vs_actual, BudgetVsActual, VarianceRow};
