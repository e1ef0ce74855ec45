//! Map file persistence.
//!
//! Maps are stored as pretty-printed JSON in the same shape the model
//! serializes to.

use crate::editor::MapEditor;
use crate::model::CampsiteMap;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

/// Save a map to a JSON file
pub fn save_map(map: &CampsiteMap, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(map).context("Failed to serialize map")?;

    std::fs::write(path, json)
        .with_context(|| format!("Failed to write map file {}", path.display()))?;

    info!("Saved map '{}' to {}", map.name, path.display());
    Ok(())
}

/// Load a map from a JSON file
pub fn load_map(path: impl AsRef<Path>) -> Result<CampsiteMap> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read map file {}", path.display()))?;

    let map: CampsiteMap = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse map file {}", path.display()))?;

    debug!("Loaded map '{}' ({} modules)", map.name, map.len());
    Ok(map)
}

impl MapEditor {
    /// Save the live map and clear the modified flag.
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        save_map(self.map(), path)?;
        self.mark_saved();
        Ok(())
    }

    /// Load a map from file, resetting history and selection.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let map = load_map(path)?;
        self.load_map(map);
        Ok(())
    }
}
