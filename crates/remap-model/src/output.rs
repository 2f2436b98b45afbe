//! Regenerated delimited-text document handed to the download collaborator.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// File name offered for download when the caller does not choose one.
pub const DEFAULT_OUTPUT_FILENAME: &str = "new_csv_file.csv";

/// MIME type used for the download data URI.
pub const OUTPUT_MIME_TYPE: &str = "text/csv";

/// UTF-8 delimited text with a header row of canonical column names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDocument {
    filename: String,
    content: String,
}

impl OutputDocument {
    pub fn new(content: String) -> Self {
        Self {
            filename: DEFAULT_OUTPUT_FILENAME.to_string(),
            content,
        }
    }

    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.content.as_bytes()
    }

    /// Encodes the document as `data:text/csv;base64,<payload>`.
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{OUTPUT_MIME_TYPE};base64,{}",
            STANDARD.encode(self.content.as_bytes())
        )
    }
}
