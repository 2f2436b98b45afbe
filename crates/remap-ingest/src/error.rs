//! Error types for upload decoding and parsing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while turning an upload into a table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Upload Errors ===
    /// File name does not carry a delimited-text extension.
    #[error("unsupported file format: {filename} (expected .csv or .tsv)")]
    UnsupportedFormat { filename: String },

    /// File not found on disk.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    /// Content could not be decoded or split into consistent rows.
    #[error("failed to parse {filename}: {source}")]
    Parse {
        filename: String,
        #[source]
        source: ParseFailure,
    },
}

impl IngestError {
    pub(crate) fn parse(filename: &str, source: impl Into<ParseFailure>) -> Self {
        Self::Parse {
            filename: filename.to_string(),
            source: source.into(),
        }
    }

    /// True for failures caused by the uploaded content itself.
    pub fn is_content_error(&self) -> bool {
        matches!(self, Self::UnsupportedFormat { .. } | Self::Parse { .. })
    }
}

/// Underlying cause of an [`IngestError::Parse`].
#[derive(Debug, Error)]
pub enum ParseFailure {
    #[error("upload is not a base64 data URI: {reason}")]
    MalformedDataUri { reason: &'static str },

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("content is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("field separator must not be empty")]
    EmptySeparator,

    #[error("no header row found")]
    MissingHeader,

    #[error("expected {expected} fields in line {line}, saw {found}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
