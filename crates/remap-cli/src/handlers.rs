//! Stateless handlers for the three user interactions: preview, show the
//! current mapping, generate the regenerated CSV.
//!
//! Every handler takes the configuration explicitly, recomputes from the
//! upload on each call, and converts per-request failures into a message for
//! the user instead of returning an error.

use serde::Serialize;
use tracing::{debug, warn};

use remap_config::RemapConfig;
use remap_ingest::UploadedFile;
use remap_map::{MappingError, MappingSlot, MappingSummary, build_mapping, export, validate};
use remap_model::{ColumnMapping, DEFAULT_PREVIEW_ROWS, OutputDocument};

/// Separator offered by the separator control before the user changes it.
pub const DEFAULT_SEPARATOR: &str = ",";

/// Shown whenever an upload cannot be read as delimited text.
pub const PROCESSING_ERROR_MESSAGE: &str = "Error processing file";

/// Shown when "generate" is triggered with unmapped canonical columns.
pub const INCOMPLETE_MAPPING_MESSAGE: &str =
    "Please map all columns before generating the CSV file";

#[derive(Debug, Clone)]
pub struct PreviewRequest {
    pub upload: Option<UploadedFile>,
    pub separator: String,
    pub rows: usize,
}

impl PreviewRequest {
    pub fn new(upload: Option<UploadedFile>, separator: impl Into<String>) -> Self {
        Self {
            upload,
            separator: separator.into(),
            rows: DEFAULT_PREVIEW_ROWS,
        }
    }

    #[must_use]
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }
}

/// First rows of the upload plus one selection slot per canonical column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub filename: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total_rows: usize,
    pub slots: Vec<MappingSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewResponse {
    /// Nothing uploaded yet.
    Empty,
    Ready(Preview),
    Failed { message: String },
}

/// Parses the upload and offers every source column to every canonical column.
pub fn preview(config: &RemapConfig, request: &PreviewRequest) -> PreviewResponse {
    let Some(upload) = &request.upload else {
        return PreviewResponse::Empty;
    };
    let table = match upload.parse(&request.separator) {
        Ok(table) => table,
        Err(error) => {
            warn!(filename = %upload.filename, %error, "preview failed");
            return PreviewResponse::Failed {
                message: PROCESSING_ERROR_MESSAGE.to_string(),
            };
        }
    };
    let rows = table
        .head(request.rows)
        .iter()
        .map(|row| row.iter().map(|cell| cell.as_str().to_string()).collect())
        .collect();
    let slots = build_mapping(config.expected_columns(), &table);
    debug!(
        filename = %upload.filename,
        columns = table.width(),
        rows = table.height(),
        "preview ready"
    );
    PreviewResponse::Ready(Preview {
        filename: upload.filename.clone(),
        columns: table.columns.clone(),
        rows,
        total_rows: table.height(),
        slots,
    })
}

/// Fresh mapping with every configured canonical column unmapped.
pub fn new_mapping(config: &RemapConfig) -> ColumnMapping {
    ColumnMapping::unmapped(config.expected_columns().iter().cloned())
}

/// Current state of the selection controls, one line per canonical column.
pub fn show_mapping(config: &RemapConfig, mapping: &ColumnMapping) -> MappingSummary {
    MappingSummary::from_mapping(&align_to_config(config, mapping))
}

#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub upload: Option<UploadedFile>,
    pub separator: String,
    pub mapping: ColumnMapping,
}

/// Regenerated CSV ready for the download collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadArtifact {
    pub document: OutputDocument,
    pub data_uri: String,
}

impl DownloadArtifact {
    pub fn new(document: OutputDocument) -> Self {
        let data_uri = document.to_data_uri();
        Self { document, data_uri }
    }

    pub fn filename(&self) -> &str {
        self.document.filename()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateResponse {
    /// Nothing uploaded yet.
    Empty,
    Ready(DownloadArtifact),
    /// Some canonical columns have no source selected; export was not run.
    Incomplete {
        message: String,
        unmapped: Vec<String>,
    },
    Failed { message: String },
}

/// Parses the upload, checks the mapping, and regenerates the CSV.
///
/// The upload is parsed before the mapping is checked, so an unreadable file
/// is reported even when the mapping is also incomplete.
pub fn generate(config: &RemapConfig, request: &GenerateRequest) -> GenerateResponse {
    let Some(upload) = &request.upload else {
        return GenerateResponse::Empty;
    };
    let table = match upload.parse(&request.separator) {
        Ok(table) => table,
        Err(error) => {
            warn!(filename = %upload.filename, %error, "generate failed to parse upload");
            return GenerateResponse::Failed {
                message: PROCESSING_ERROR_MESSAGE.to_string(),
            };
        }
    };

    let complete = match validate(align_to_config(config, &request.mapping)) {
        Ok(complete) => complete,
        Err(MappingError::Incomplete { unmapped }) => {
            debug!(unmapped = unmapped.len(), "mapping incomplete");
            return GenerateResponse::Incomplete {
                message: INCOMPLETE_MAPPING_MESSAGE.to_string(),
                unmapped,
            };
        }
        Err(error) => {
            warn!(%error, "mapping rejected");
            return GenerateResponse::Failed {
                message: PROCESSING_ERROR_MESSAGE.to_string(),
            };
        }
    };

    match export(&table, &complete) {
        Ok(document) => GenerateResponse::Ready(DownloadArtifact::new(document)),
        Err(error) => {
            warn!(filename = %upload.filename, %error, "export failed");
            GenerateResponse::Failed {
                message: PROCESSING_ERROR_MESSAGE.to_string(),
            }
        }
    }
}

/// Rebuilds `mapping` over the configured canonical columns.
///
/// Selections are carried over by canonical name; selections for names the
/// configuration does not know are dropped.
fn align_to_config(config: &RemapConfig, mapping: &ColumnMapping) -> ColumnMapping {
    let mut aligned = new_mapping(config);
    for entry in mapping.entries() {
        let Some(source) = entry.source.as_deref() else {
            continue;
        };
        if aligned.assign(&entry.canonical, source).is_err() {
            warn!(canonical = %entry.canonical, "ignoring selection for unknown canonical column");
        }
    }
    aligned
}
