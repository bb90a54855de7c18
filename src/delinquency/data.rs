//! Delinquency trend data structures

use chrono::NaiveDate;

/// Days-past-due bucket of an active loan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DpdBucket {
    /// No missed payment
    Current,
    /// 1-29 days past due
    Dpd1To29,
    /// 30-59 days past due
    Dpd30To59,
    /// 60-89 days past due
    Dpd60To89,
    /// 90+ days past due
    Dpd90Plus,
}

impl DpdBucket {
    /// All buckets, in extract column order
    pub const ALL: [DpdBucket; 5] = [
        DpdBucket::Current,
        DpdBucket::Dpd1To29,
        DpdBucket::Dpd30To59,
        DpdBucket::Dpd60To89,
        DpdBucket::Dpd90Plus,
    ];

    /// Count column name in the delinquency extract
    pub fn column_name(&self) -> &'static str {
        match self {
            DpdBucket::Current => "current_loans",
            DpdBucket::Dpd1To29 => "dpd_1_29_loans",
            DpdBucket::Dpd30To59 => "dpd_30_59_loans",
            DpdBucket::Dpd60To89 => "dpd_60_89_loans",
            DpdBucket::Dpd90Plus => "dpd_90_plus_loans",
        }
    }

    /// Short label used in chart legends
    pub fn label(&self) -> &'static str {
        match self {
            DpdBucket::Current => "Current",
            DpdBucket::Dpd1To29 => "1-29 DPD",
            DpdBucket::Dpd30To59 => "30-59 DPD",
            DpdBucket::Dpd60To89 => "60-89 DPD",
            DpdBucket::Dpd90Plus => "90+ DPD",
        }
    }
}

/// Raw monthly delinquency table on a contiguous month-start calendar
///
/// `defaulted_loans` and the DPD 30+ rate are required by the extract; the
/// active-loan count and per-bucket counts are optional and only present
/// when the extract carries every one of them.
#[derive(Debug, Clone)]
pub struct DelinquencyTable {
    pub months: Vec<NaiveDate>,

    /// DPD 30+ rate as loaded (unit resolved downstream)
    pub dpd_30_plus_rate: Vec<Option<f64>>,

    /// Loans that defaulted in the month
    pub defaulted_loans: Vec<Option<f64>>,

    /// Active loans at month end, when the extract carries the column
    pub active_loans: Option<Vec<Option<f64>>>,

    /// Per-bucket counts aligned with [`DpdBucket::ALL`], all-or-nothing
    pub buckets: Option<[Vec<Option<f64>>; 5]>,

    /// Which header alias the rate column resolved to
    pub rate_column: String,
}

impl DelinquencyTable {
    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}
