//! Uploaded file content as delivered by the front end.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

use remap_model::Table;

use crate::csv::parse;
use crate::error::{IngestError, ParseFailure, Result};

/// Raw bytes of one uploaded file plus the name it was uploaded under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    /// Decodes an upload in `data:<mime>;base64,<payload>` form.
    pub fn from_data_uri(contents: &str, filename: impl Into<String>) -> Result<Self> {
        let filename = filename.into();
        let bytes = decode_data_uri(contents).map_err(|e| IngestError::parse(&filename, e))?;
        debug!(filename = %filename, bytes = bytes.len(), "decoded data URI upload");
        Ok(Self { filename, bytes })
    }

    /// Reads an upload straight from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IngestError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                IngestError::FileRead {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { filename, bytes })
    }

    /// Parses the upload with the given field separator.
    pub fn parse(&self, separator: &str) -> Result<Table> {
        parse(&self.bytes, &self.filename, separator)
    }
}

fn decode_data_uri(contents: &str) -> std::result::Result<Vec<u8>, ParseFailure> {
    let (marker, payload) = contents
        .split_once(',')
        .ok_or(ParseFailure::MalformedDataUri {
            reason: "missing ',' between content type and payload",
        })?;
    if !marker.starts_with("data:") {
        return Err(ParseFailure::MalformedDataUri {
            reason: "missing 'data:' prefix",
        });
    }
    if !marker.ends_with(";base64") {
        return Err(ParseFailure::MalformedDataUri {
            reason: "payload is not base64 encoded",
        });
    }
    Ok(STANDARD.decode(payload.trim())?)
}
