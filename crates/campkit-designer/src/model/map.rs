//! The campsite map aggregate.

use super::module::Module;
use crate::error::{EditorError, EditorResult};
use crate::transform::{calculate_bounding_box, clamp_position, ModuleTransform};
use campkit_core::{Bounds, MapBounds, Size};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Free-form descriptive data about a map.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapMetadata {
    pub description: Option<String>,
    pub version: u32,
    pub tags: Vec<String>,
}

/// A site plan with the modules placed on it.
///
/// `modules` keeps insertion order; paint order comes from each module's
/// `z_index`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampsiteMap {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub image_size: Size,
    /// Pixels per meter.
    pub scale: f64,
    pub bounds: MapBounds,
    #[serde(default)]
    pub modules: Vec<Module>,
    #[serde(default)]
    pub metadata: MapMetadata,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CampsiteMap {
    /// Creates an empty map whose bounds cover the background image.
    pub fn new(name: impl Into<String>, image_size: Size) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            image_url: None,
            image_size,
            scale: 1.0,
            bounds: MapBounds::from_size(image_size),
            modules: Vec::new(),
            metadata: MapMetadata::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn get_module(&self, id: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == id)
    }

    pub fn get_module_mut(&mut self, id: &str) -> Option<&mut Module> {
        self.modules.iter_mut().find(|m| m.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get_module(id).is_some()
    }

    /// Adds a module on top of everything else, clamped into the map bounds.
    pub fn add_module(&mut self, mut module: Module) -> EditorResult<()> {
        if self.contains(&module.id) {
            return Err(EditorError::DuplicateModule(module.id));
        }
        module.z_index = self.next_z_index();
        module.position = clamp_position(module.position, module.size, &self.bounds);
        self.modules.push(module);
        self.touch();
        Ok(())
    }

    pub fn remove_module(&mut self, id: &str) -> EditorResult<Module> {
        let index = self
            .modules
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| EditorError::ModuleNotFound(id.to_string()))?;
        let removed = self.modules.remove(index);
        self.touch();
        Ok(removed)
    }

    /// One above the highest `z_index` in use.
    pub fn next_z_index(&self) -> i32 {
        self.modules
            .iter()
            .map(|m| m.z_index)
            .max()
            .map_or(0, |z| z + 1)
    }

    /// Modules in paint order, ties broken by insertion order.
    pub fn paint_order(&self) -> Vec<&Module> {
        let mut ordered: Vec<&Module> = self.modules.iter().collect();
        ordered.sort_by_key(|m| m.z_index);
        ordered
    }

    pub fn bring_to_front(&mut self, id: &str) -> EditorResult<()> {
        let z = self.next_z_index();
        let module = self
            .get_module_mut(id)
            .ok_or_else(|| EditorError::ModuleNotFound(id.to_string()))?;
        module.z_index = z;
        module.touch();
        self.touch();
        Ok(())
    }

    pub fn send_to_back(&mut self, id: &str) -> EditorResult<()> {
        let z = self
            .modules
            .iter()
            .map(|m| m.z_index)
            .min()
            .map_or(0, |z| z - 1);
        let module = self
            .get_module_mut(id)
            .ok_or_else(|| EditorError::ModuleNotFound(id.to_string()))?;
        module.z_index = z;
        module.touch();
        self.touch();
        Ok(())
    }

    /// Clamps a module's position into the map bounds. Returns true if it moved.
    pub fn clamp_module(&mut self, id: &str) -> EditorResult<bool> {
        let bounds = self.bounds;
        let module = self
            .get_module_mut(id)
            .ok_or_else(|| EditorError::ModuleNotFound(id.to_string()))?;
        let clamped = clamp_position(module.position, module.size, &bounds);
        if clamped == module.position {
            return Ok(false);
        }
        module.position = clamped;
        module.touch();
        Ok(true)
    }

    /// Clamps every module into the map bounds and returns how many moved.
    pub fn normalize(&mut self) -> usize {
        let bounds = self.bounds;
        let mut moved = 0;
        for module in &mut self.modules {
            let clamped = clamp_position(module.position, module.size, &bounds);
            if clamped != module.position {
                warn!(
                    "Module {} outside the map at ({}, {}), moved to ({}, {})",
                    module.id, module.position.x, module.position.y, clamped.x, clamped.y
                );
                module.position = clamped;
                module.touch();
                moved += 1;
            }
            if !bounds.contains_bounds(&module.bounds()) {
                warn!(
                    "Module {} ({}x{}) is larger than the map and overflows it",
                    module.id, module.size.width, module.size.height
                );
            }
        }
        if moved > 0 {
            self.touch();
        }
        moved
    }

    /// Union of every module's unrotated rectangle.
    pub fn content_bounds(&self) -> Bounds {
        let transforms: Vec<ModuleTransform> = self.modules.iter().map(Module::transform).collect();
        calculate_bounding_box(&transforms)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
