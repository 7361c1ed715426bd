//! Configuration file loading.

use crate::config::types::DevHelperConfig;
use crate::error::DevHelperError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default configuration file name for project-local config.
const LOCAL_CONFIG_NAME: &str = "devhelper.toml";

/// Default configuration file name within the XDG config directory.
const XDG_CONFIG_NAME: &str = "config.toml";

/// Application name for XDG directory lookup.
const APP_NAME: &str = "devhelper";

/// Loads configuration from the default search paths.
///
/// Search order:
/// 1. `./devhelper.toml` (project-local)
/// 2. `~/.config/devhelper/config.toml` (XDG config)
///
/// Returns the default configuration if no config file is found.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be read or parsed.
pub fn load() -> Result<DevHelperConfig, DevHelperError> {
    for path in search_paths() {
        if path.exists() {
            return from_path(&path);
        }
    }

    debug!("no configuration file found, using defaults");
    Ok(DevHelperConfig::default())
}

/// Loads `explicit` if given, otherwise searches the default locations.
///
/// # Errors
///
/// Returns an error if the explicit file is missing, or if the file found
/// cannot be read or parsed.
pub fn load_from(explicit: Option<&Path>) -> Result<DevHelperConfig, DevHelperError> {
    match explicit {
        Some(path) => from_path(path),
        None => load(),
    }
}

/// Loads configuration from a specific file path.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The file contains invalid TOML
/// - The TOML doesn't match the expected schema
pub fn from_path(path: &Path) -> Result<DevHelperConfig, DevHelperError> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        DevHelperError::configuration(
            "config_file",
            format!("failed to read '{}': {}", path.display(), e),
        )
    })?;

    debug!(path = %path.display(), "loading configuration");
    from_str(&contents).map_err(|e| {
        DevHelperError::configuration(
            "config_file",
            format!("failed to parse '{}': {}", path.display(), e),
        )
    })
}

/// Parses configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or doesn't match the schema.
pub fn from_str(toml_str: &str) -> Result<DevHelperConfig, DevHelperError> {
    toml::from_str(toml_str)
        .map_err(|e| DevHelperError::configuration("config", format!("invalid TOML: {e}")))
}

/// Returns the paths that would be searched for configuration files.
#[must_use]
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_NAME)];

    if let Some(config_dir) = xdg_config_dir() {
        paths.push(config_dir.join(XDG_CONFIG_NAME));
    }

    paths
}

/// Returns the path to the XDG config directory for devhelper.
///
/// This is `~/.config/devhelper` on most systems.
#[must_use]
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_NAME))
}
