//! Exposure-at-default data structures

use chrono::NaiveDate;
use serde::Serialize;

/// One defaulted loan from the exposure-at-default extract
#[derive(Debug, Clone, Serialize)]
pub struct EadRow {
    /// Loan identifier (not guaranteed unique across extract rows)
    pub loan_id: String,

    /// Date the loan was originated
    pub origination_date: NaiveDate,

    /// Origination vintage (month start)
    pub origination_month: NaiveDate,

    /// Date the loan defaulted
    pub default_date: NaiveDate,

    /// Risk tier assigned at signup
    pub risk_tier_at_signup: String,

    /// Unpaid principal at the time of default
    pub principal_unpaid_on_default: f64,
}
