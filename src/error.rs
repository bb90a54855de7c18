//! Typed errors for CSV schema problems

use thiserror::Error;

/// Schema-level failures raised while reading an extract
#[derive(Debug, Error)]
pub enum SchemaError {
    /// An expected column is absent from the CSV header row
    #[error("missing expected column `{0}`")]
    MissingColumn(String),

    /// None of the accepted aliases for a column were found
    #[error("cannot find {purpose} column; expected one of: {aliases}")]
    NoColumnAlias {
        purpose: &'static str,
        aliases: String,
    },

    /// A cell failed to parse as the expected type
    #[error("invalid value `{value}` in column `{column}`: {reason}")]
    InvalidValue {
        column: String,
        value: String,
        reason: String,
    },
}

impl SchemaError {
    pub fn missing(column: &str) -> Self {
        SchemaError::MissingColumn(column.to_string())
    }

    pub fn no_alias(purpose: &'static str, aliases: &[&str]) -> Self {
        SchemaError::NoColumnAlias {
            purpose,
            aliases: aliases
                .iter()
                .map(|a| format!("`{a}`"))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}
