//! Upload decoding and delimited-text parsing.
//!
//! This crate turns an uploaded file into a [`remap_model::Table`]: it
//! decodes the front end's data URI transport form, checks that the file is
//! delimited text, and splits it into a header and data rows.
//!
//! # Example
//!
//! ```ignore
//! use remap_ingest::UploadedFile;
//!
//! let upload = UploadedFile::from_data_uri(contents, "orders.csv")?;
//! let table = upload.parse(";")?;
//! println!("{} columns, {} rows", table.width(), table.height());
//! ```

mod csv;
mod error;
mod upload;

// === Error Types ===
pub use error::{IngestError, ParseFailure, Result};

// === Parsing ===
pub use csv::{DELIMITED_TEXT_EXTENSIONS, is_delimited_text, normalize_headers, parse};

// === Uploads ===
pub use upload::UploadedFile;
