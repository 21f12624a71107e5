//! Configuration loading for sw.
//!
//! A base checkout opts into worktree provisioning with up to three files at
//! its root:
//!
//! * `.worktreeinclude` - patterns for ignored entries to copy
//! * `.worktreelink` - patterns for ignored entries to symlink
//! * `.sw.toml` - optional settings (alternative pattern file locations and
//!   the collision policy)
//!
//! # Example
//!
//! ```rust,ignore
//! use sw_config::{discover_settings, load_config};
//!
//! let settings = discover_settings(&base_root)?;
//! let loaded = load_config(&base_root, settings)?;
//! println!("{} copy patterns", loaded.copy_patterns.len());
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod discovery;
mod error;
mod pattern_file;
mod toml_loader;
mod types;

pub use discovery::{discover_settings, resolve_config_path};
pub use error::ConfigError;
pub use pattern_file::{load_pattern_file, parse_patterns};
pub use toml_loader::load_toml_settings;
pub use types::{
    CollisionPolicy, DEFAULT_COPY_PATTERNS_FILE, DEFAULT_SYMLINK_PATTERNS_FILE, LoadedConfig,
    Pattern, PatternSet, SETTINGS_FILE, Settings,
};

use std::path::Path;

/// Load both pattern files of a base checkout using the given settings.
///
/// # Arguments
///
/// * `base_root` - Path to the base checkout
/// * `settings` - Effective settings (usually from [`discover_settings`])
///
/// # Errors
///
/// * If a pattern file exists but cannot be read
pub fn load_config(base_root: &Path, settings: Settings) -> Result<LoadedConfig, ConfigError> {
    let copy_path = resolve_config_path(base_root, &settings.copy_patterns_file);
    let symlink_path = resolve_config_path(base_root, &settings.symlink_patterns_file);

    let copy_patterns = load_pattern_file(&copy_path)?;
    let symlink_patterns = load_pattern_file(&symlink_path)?;

    log::info!(
        "Loaded {} copy and {} symlink patterns for {}",
        copy_patterns.len(),
        symlink_patterns.len(),
        base_root.display()
    );

    Ok(LoadedConfig {
        base_root: base_root.to_path_buf(),
        settings,
        copy_patterns,
        symlink_patterns,
    })
}
