//! Settings file location and lifecycle.

use crate::config::Settings;
use crate::error::{SettingsError, SettingsResult};
use campkit_core::EditorConfig;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Directory name under the platform config directory.
pub const APP_DIR_NAME: &str = "campkit";
/// File name of the settings file inside [`APP_DIR_NAME`].
pub const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Owns the settings and the file they are persisted to.
#[derive(Debug, Clone)]
pub struct SettingsManager {
    settings: Settings,
    path: PathBuf,
}

impl SettingsManager {
    /// Platform config directory for CampKit, e.g. `~/.config/campkit`.
    pub fn config_dir() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .or_else(dirs::home_dir)
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no config or home directory".to_string())
            })
    }

    /// Default settings file path.
    pub fn config_file_path() -> SettingsResult<PathBuf> {
        Ok(Self::config_dir()?.join(SETTINGS_FILE_NAME))
    }

    /// Creates the config directory if needed and returns it.
    pub fn ensure_config_dir() -> SettingsResult<PathBuf> {
        let dir = Self::config_dir()?;
        std::fs::create_dir_all(&dir)
            .map_err(|e| SettingsError::ConfigDirectory(format!("{}: {}", dir.display(), e)))?;
        Ok(dir)
    }

    /// Default settings bound to `path`; nothing is read.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            settings: Settings::default(),
            path: path.into(),
        }
    }

    /// Load settings from `path`, failing if the file is missing or invalid.
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        Ok(Self {
            settings: Settings::load_from_file(path)?,
            path: path.to_path_buf(),
        })
    }

    /// Load settings from `path`, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            info!("No settings at {}, using defaults", path.display());
            return Self::with_path(path);
        }
        match Self::load_from_file(path) {
            Ok(manager) => manager,
            Err(e) => {
                warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::with_path(path)
            }
        }
    }

    /// Load from the default location.
    pub fn load() -> SettingsResult<Self> {
        Ok(Self::load_or_default(&Self::config_file_path()?))
    }

    /// Write the settings back to their file, creating the parent directory.
    pub fn save(&self) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
            })?;
        }
        self.settings.save_to_file(&self.path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn editor_config(&self) -> &EditorConfig {
        &self.settings.editor
    }

    /// Record a map as most recently opened.
    pub fn add_recent_map(&mut self, path: impl Into<PathBuf>) {
        self.settings.add_recent_map(path.into());
    }

    pub fn recent_maps(&self) -> &[PathBuf] {
        &self.settings.recent_maps
    }
}
