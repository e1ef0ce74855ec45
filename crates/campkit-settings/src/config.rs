//! Persisted editor settings.

use crate::error::{SettingsError, SettingsResult};
use campkit_core::EditorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default length of the recent-maps list.
pub const DEFAULT_RECENT_MAPS_COUNT: usize = 10;

/// Everything the editor remembers between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Number of recent maps to track
    pub max_recent_maps: usize,
    /// Recently opened maps, most recent first
    pub recent_maps: Vec<PathBuf>,
    /// Editor tunables
    pub editor: EditorConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_recent_maps: DEFAULT_RECENT_MAPS_COUNT,
            recent_maps: Vec::new(),
            editor: EditorConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl Settings {
    /// Create new settings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let settings: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        settings.validate()?;
        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Validate settings
    pub fn validate(&self) -> SettingsResult<()> {
        self.editor.validate()?;

        if self.max_recent_maps == 0 {
            return Err(SettingsError::invalid_setting(
                "max_recent_maps",
                "must be > 0",
            ));
        }

        Ok(())
    }

    /// Add map to recent maps list
    pub fn add_recent_map(&mut self, path: PathBuf) {
        // Remove if already in list
        self.recent_maps.retain(|p| p != &path);

        self.recent_maps.insert(0, path);
        self.recent_maps.truncate(self.max_recent_maps);
    }

    /// Drop recent entries whose files no longer exist. Returns how many went.
    pub fn prune_missing_recent_maps(&mut self) -> usize {
        let before = self.recent_maps.len();
        self.recent_maps.retain(|p| p.exists());
        before - self.recent_maps.len()
    }
}
