//! CSV header normalization and named-column lookup
//!
//! Extract headers arrive with inconsistent casing and stray whitespace, and
//! Excel exports sometimes prefix the first header with a UTF-8 BOM. All
//! lookups go through a normalized header map so loaders can fail with a
//! named column rather than a positional index.

use std::collections::HashMap;

use csv::StringRecord;

use crate::error::SchemaError;

/// Normalize a header: strip BOM, trim, lowercase, whitespace to underscores
pub(crate) fn normalize_header_name(name: &str) -> String {
    let name = name.trim().trim_start_matches('\u{feff}').to_ascii_lowercase();
    name.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Map of normalized header name to column index
pub(crate) fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

/// Index of a required column, or a named lookup failure
pub(crate) fn require_column(
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<usize, SchemaError> {
    header_map
        .get(name)
        .copied()
        .ok_or_else(|| SchemaError::missing(name))
}

/// Trimmed, non-empty field at a column index
pub(crate) fn field<'a>(record: &'a StringRecord, idx: usize) -> Option<&'a str> {
    record.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

/// Parse an optional numeric field; empty cells are `None`
pub(crate) fn parse_opt_f64(s: Option<&str>) -> Option<f64> {
    let v = s?.parse::<f64>().ok()?;
    if v.is_finite() {
        Some(v)
    } else {
        None
    }
}
