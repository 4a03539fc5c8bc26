//! Project settings
//!
//! Reads run defaults from `sygmare.toml`. Lookup order: the path in
//! `SYGMARE_CONFIG`, then `<root>/sygmare.toml`, then the user config
//! directory. Command-line flags always override file values.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::defaults::{APP_NAME, ENV_CONFIG, SETTINGS_FILE};
use crate::error::SettingsError;

/// Settings file contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Run defaults
    #[serde(default)]
    pub run: RunSettings,

    /// Output preferences
    #[serde(default)]
    pub output: OutputSettings,
}

/// Run defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSettings {
    /// Manifest path, relative to the settings file
    pub manifest: Option<PathBuf>,

    /// Dry-run by default
    pub dry_run: Option<bool>,

    /// Stop at the first failure by default
    pub stop_on_failure: Option<bool>,
}

/// Output preferences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Emit JSON reports by default
    pub json: Option<bool>,
}

impl Settings {
    /// Load settings from a specific path
    ///
    /// A missing file yields the defaults; an unreadable or invalid file is
    /// an error. A relative `run.manifest` is resolved against the file's
    /// directory.
    pub fn load_from_path(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| SettingsError::ReadError {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        let mut settings: Self = toml::from_str(&content).map_err(|e| SettingsError::ParseError {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        if let (Some(manifest), Some(dir)) = (settings.run.manifest.take(), path.parent()) {
            settings.run.manifest = Some(if manifest.is_absolute() {
                manifest
            } else {
                dir.join(manifest)
            });
        }

        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Locate and load the settings file for a project root
    ///
    /// A path named by `SYGMARE_CONFIG` must exist.
    pub fn load(root: &Path) -> Result<Self, SettingsError> {
        if let Some(explicit) = std::env::var_os(ENV_CONFIG) {
            return Self::load_required(Path::new(&explicit));
        }
        match Self::locate(root) {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load settings from a path that was asked for explicitly
    pub fn load_required(path: &Path) -> Result<Self, SettingsError> {
        if !path.is_file() {
            return Err(SettingsError::ReadError {
                path: path.display().to_string(),
                error: "file not found".to_string(),
            });
        }
        Self::load_from_path(path)
    }

    /// First existing settings file in the project root or user config dir
    pub fn locate(root: &Path) -> Option<PathBuf> {
        let project = root.join(SETTINGS_FILE);
        if project.is_file() {
            return Some(project);
        }

        dirs::config_dir()
            .map(|dir| dir.join(APP_NAME).join(SETTINGS_FILE))
            .filter(|path| path.is_file())
    }
}
