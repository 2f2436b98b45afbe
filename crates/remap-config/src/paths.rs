//! Configuration path resolution.

use std::path::{Path, PathBuf};

/// Environment variable for overriding the configuration file location.
pub const CONFIG_ENV_VAR: &str = "CSV_REMAP_CONFIG";

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Get the configuration file path.
///
/// Resolution order:
/// 1. `explicit` (e.g. a `--config` flag)
/// 2. `CSV_REMAP_CONFIG` environment variable
/// 3. `config.json` in the working directory
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return PathBuf::from(path);
    }
    PathBuf::from(DEFAULT_CONFIG_FILE)
}
