//! Delimited-text reading utilities.

mod header;
mod reader;

pub use header::normalize_headers;
pub use reader::{DELIMITED_TEXT_EXTENSIONS, is_delimited_text, parse};
