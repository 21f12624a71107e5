//! Locating the settings and pattern files of a base checkout.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::toml_loader::load_toml_settings;
use crate::types::{SETTINGS_FILE, Settings};

/// Resolve a configured file path against the base root.
///
/// Absolute paths are used as is; anything else is relative to `base_root`.
#[must_use]
pub fn resolve_config_path(base_root: &Path, configured: &str) -> PathBuf {
    let path = Path::new(configured);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_root.join(path)
    }
}

/// Load the settings file of a base checkout, falling back to defaults.
///
/// # Errors
///
/// * If the settings file exists but cannot be read or parsed
pub fn discover_settings(base_root: &Path) -> Result<Settings, ConfigError> {
    let path = base_root.join(SETTINGS_FILE);

    if path.is_file() {
        load_toml_settings(&path)
    } else {
        log::debug!("No settings file at {}, using defaults", path.display());
        Ok(Settings::default())
    }
}
