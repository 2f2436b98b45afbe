//! Loading and validation of the expected-column configuration.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, Result};

/// On-disk shape of the configuration document.
///
/// Keys other than `expected_columns` are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    expected_columns: Vec<String>,
}

/// Canonical column names every generated CSV must conform to.
///
/// Loaded once at start-up and passed by reference to whatever needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemapConfig {
    expected_columns: Vec<String>,
}

impl RemapConfig {
    /// Validates and wraps a list of canonical column names.
    ///
    /// # Errors
    ///
    /// Fails when the list is empty, a name is blank, or a name repeats.
    pub fn new(expected_columns: Vec<String>) -> Result<Self> {
        if expected_columns.is_empty() {
            return Err(ConfigError::NoExpectedColumns);
        }
        let mut seen = BTreeSet::new();
        for (index, column) in expected_columns.iter().enumerate() {
            if column.trim().is_empty() {
                return Err(ConfigError::BlankColumn { index });
            }
            if !seen.insert(column.as_str()) {
                return Err(ConfigError::DuplicateColumn {
                    column: column.clone(),
                });
            }
        }
        Ok(Self { expected_columns })
    }

    pub fn expected_columns(&self) -> &[String] {
        &self.expected_columns
    }
}

/// Reads the configuration at `path`.
///
/// `.toml` files are parsed as TOML; everything else as JSON.
pub fn load_config(path: &Path) -> Result<RemapConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
    let file = if is_toml(path) {
        parse_toml(path, &contents)?
    } else {
        parse_json(path, &contents)?
    };
    let config = RemapConfig::new(file.expected_columns)?;
    debug!(
        path = %path.display(),
        expected_columns = config.expected_columns.len(),
        "loaded configuration"
    );
    Ok(config)
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

fn parse_json(path: &Path, contents: &str) -> Result<ConfigFile> {
    serde_json::from_str(contents).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_toml(path: &Path, contents: &str) -> Result<ConfigFile> {
    toml::from_str(contents).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })
}
