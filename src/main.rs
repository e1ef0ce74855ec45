use anyhow::Context;
use campkit::{
    init_logging, load_map, MapEditor, ModuleType, SettingsManager, BUILD_COMMIT, BUILD_DATE,
    VERSION,
};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{info, warn};

const USAGE: &str = "usage: campkit <map.json> [--write]";

fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;
    info!("CampKit {} ({} built {})", VERSION, BUILD_COMMIT, BUILD_DATE);

    let mut map_path: Option<PathBuf> = None;
    let mut write_back = false;
    for arg in std::env::args_os().skip(1) {
        if arg == "--write" {
            write_back = true;
        } else if map_path.is_none() {
            map_path = Some(PathBuf::from(arg));
        } else {
            anyhow::bail!(USAGE);
        }
    }
    let map_path = map_path.context(USAGE)?;

    let mut settings = match SettingsManager::load() {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Settings unavailable, using defaults: {}", e);
            SettingsManager::with_path("campkit-settings.toml")
        }
    };

    let map = load_map(&map_path)?;
    let mut editor = MapEditor::new(map, settings.editor_config().clone());

    let moved = editor.normalize()?;
    if moved > 0 {
        warn!("Clamped {} out-of-bounds modules into the map", moved);
    }

    let map = editor.map();
    info!(
        "Map '{}': {} modules, {}x{} image, scale {}",
        map.name,
        map.len(),
        map.image_size.width,
        map.image_size.height,
        map.scale
    );

    let mut per_kind: BTreeMap<ModuleType, usize> = BTreeMap::new();
    for module in &map.modules {
        *per_kind.entry(module.module_type()).or_default() += 1;
    }
    for (kind, count) in &per_kind {
        info!("  {:<14} {}", kind.display_name(), count);
    }

    if !map.is_empty() {
        let bounds = map.content_bounds();
        info!(
            "Content bounds: ({}, {}) {}x{}",
            bounds.x, bounds.y, bounds.width, bounds.height
        );
    }

    if write_back && editor.is_modified() {
        editor
            .save_to_file(&map_path)
            .with_context(|| format!("Failed to write back {}", map_path.display()))?;
    }

    settings.add_recent_map(map_path);
    let pruned = settings.settings_mut().prune_missing_recent_maps();
    if pruned > 0 {
        info!("Dropped {} missing maps from the recent list", pruned);
    }
    if let Err(e) = settings.save() {
        warn!("Failed to save settings: {}", e);
    }

    Ok(())
}
