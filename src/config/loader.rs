// src/config/loader.rs

use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::debug;

use crate::config::model::ConfigFile;
use crate::errors::Result;

/// Default config file name, looked up in the current working directory
/// when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "Waitrun.toml";

/// Load a configuration file from a given path.
///
/// This only performs TOML deserialization; merging with CLI flags and
/// semantic validation happen elsewhere.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading config file at {path:?}"))?;

    let config: ConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Resolve which config file to load, if any.
///
/// - With `--config PATH`, the file must exist.
/// - Otherwise `Waitrun.toml` is loaded when present, and an empty
///   configuration is used when it is not (flags alone are enough to drive
///   the pipeline).
pub fn load_for_args(explicit: Option<&str>) -> Result<ConfigFile> {
    match explicit {
        Some(path) => load_from_path(path),
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if default.exists() {
                debug!(path = DEFAULT_CONFIG_FILE, "loading default config file");
                load_from_path(default)
            } else {
                Ok(ConfigFile::default())
            }
        }
    }
}
