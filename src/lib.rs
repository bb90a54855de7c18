//! Lending Analytics - portfolio analytics for a consumer-lending book
//!
//! This library provides:
//! - Monthly series loading and resampling from CSV extracts
//! - Budget scenario pivoting and budget-vs-actual variance tables
//! - Delinquency trend metrics (moving averages, bucket shares, lag correlations)
//! - Exposure-at-default summaries by vintage and risk tier
//! - Cumulative default rate tables with rate cross-checks
//! - Chart rendering (terminal ASCII figures, SVG export)

pub mod actuals;
pub mod budget;
pub mod cdr;
pub mod chart;
pub mod delinquency;
pub mod ead;
pub mod error;
pub mod metrics;
mod schema;
pub mod series;

// Re-export commonly used types
pub use budget::{budget_vs_actual, pivot_scenarios, BudgetVsActual, PlanMetric, Scenario};
pub use chart::{ChartStyle, SeriesSpec};
pub use delinquency::{derive_trend, DelinquencyTrend};
pub use error::SchemaError;
pub use series::MonthlySeries;
