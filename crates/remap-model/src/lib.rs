//! Shared data model for the CSV column remapper.
//!
//! - [`Table`]: parsed upload (ordered columns, rows of [`CellValue`])
//! - [`ColumnMapping`]: one [`MappingEntry`] per canonical column
//! - [`OutputDocument`]: regenerated CSV ready for download

#![deny(unsafe_code)]

pub mod error;
pub mod mapping;
pub mod output;
pub mod table;

pub use error::{ModelError, Result};
pub use mapping::{ColumnMapping, MappingEntry};
pub use output::{DEFAULT_OUTPUT_FILENAME, OUTPUT_MIME_TYPE, OutputDocument};
pub use table::{CellValue, DEFAULT_PREVIEW_ROWS, Table};
