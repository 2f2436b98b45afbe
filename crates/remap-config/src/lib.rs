//! Expected-column configuration for the CSV column remapper.
//!
//! The configuration is a small JSON (or TOML) document:
//!
//! ```json
//! { "expected_columns": ["id", "value"] }
//! ```

#![deny(unsafe_code)]

pub mod error;
pub mod loader;
pub mod paths;

pub use crate::error::{ConfigError, Result};
pub use crate::loader::{RemapConfig, load_config};
pub use crate::paths::{CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE, config_path};
