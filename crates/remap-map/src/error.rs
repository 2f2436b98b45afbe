//! Error types for mapping operations.

use thiserror::Error;

/// Errors from mapping validation and export.
#[derive(Debug, Error)]
pub enum MappingError {
    /// At least one canonical column has no source column selected.
    #[error("please map all columns before generating (unmapped: {})", .unmapped.join(", "))]
    Incomplete { unmapped: Vec<String> },

    /// The mapping has no canonical columns at all.
    #[error("mapping has no canonical columns")]
    NoColumns,

    /// Selected source column does not exist in the parsed table.
    #[error("column not found: {column} (selected for {canonical})")]
    ColumnNotFound { column: String, canonical: String },

    /// Serializing the output failed.
    #[error("failed to write CSV output: {0}")]
    Csv(#[from] csv::Error),

    /// Serialized output was not UTF-8.
    #[error("generated output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

impl MappingError {
    /// True when the user can fix the error by completing the mapping.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Incomplete { .. } | Self::NoColumns)
    }
}

pub type Result<T> = std::result::Result<T, MappingError>;
