//! Portfolio delinquency trend: loading and derived metrics

mod data;
pub mod loader;
mod trend;

pub use data::{DelinquencyTable, DpdBucket};
pub use loader::{
    load_delinquency_table, load_delinquency_table_from_reader, RATE_COLUMN_ALIASES,
};
pub use trend::{derive_trend, DelinquencyTrend, FRACTION_MAX_THRESHOLD, TREND_MA_WINDOW};
