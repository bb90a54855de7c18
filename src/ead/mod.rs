//! Exposure at default: loading and vintage/risk-tier summaries

mod data;
pub mod loader;
mod summary;

pub use data::EadRow;
pub use loader::{load_ead_rows, load_ead_rows_from_reader};
pub use summary::{
    summarize, summarize_by_risk_tier, summarize_by_vintage, RiskTierEad, VintageEad,
};
