//! Editor configuration shared by the designer and settings crates.

use crate::error::{Error, Result};
use crate::geometry::Size;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default depth of the undo stack.
pub const DEFAULT_MAX_HISTORY_SIZE: usize = 50;
/// Default grid spacing in map pixels.
pub const DEFAULT_GRID_SIZE: f64 = 10.0;
/// Default rotation snap increment in degrees.
pub const DEFAULT_SNAP_ANGLE: f64 = 15.0;
/// Smallest size a module can be resized to unless configured otherwise.
pub const DEFAULT_MIN_MODULE_SIZE: Size = Size {
    width: 20.0,
    height: 20.0,
};

/// Tunables for the map editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of entries kept on the undo stack
    pub max_history_size: usize,
    /// Grid spacing used when snapping
    pub grid_size: f64,
    /// Snap resize and move results to the grid
    pub snap_to_grid: bool,
    /// Rotation snap increment in degrees
    pub snap_angle: f64,
    /// Floor applied to resized modules
    pub min_module_size: Size,
    /// Optional ceiling applied to resized modules
    pub max_module_size: Option<Size>,
    /// Lock aspect ratio while resizing
    pub preserve_aspect_ratio: bool,
    /// Arrow-key move distance
    pub nudge_step: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_history_size: DEFAULT_MAX_HISTORY_SIZE,
            grid_size: DEFAULT_GRID_SIZE,
            snap_to_grid: false,
            snap_angle: DEFAULT_SNAP_ANGLE,
            min_module_size: DEFAULT_MIN_MODULE_SIZE,
            max_module_size: None,
            preserve_aspect_ratio: false,
            nudge_step: 1.0,
        }
    }
}

impl EditorConfig {
    /// Validate configuration
    ///
    /// `min_module_size > max_module_size` is accepted: the minimum wins at
    /// clamp time.
    pub fn validate(&self) -> Result<()> {
        if self.max_history_size == 0 {
            return Err(Error::invalid_config("max_history_size", "must be > 0"));
        }
        if !(self.grid_size > 0.0) {
            return Err(Error::invalid_config("grid_size", "must be > 0"));
        }
        if !(self.snap_angle > 0.0) {
            return Err(Error::invalid_config("snap_angle", "must be > 0"));
        }
        if !(self.nudge_step > 0.0) {
            return Err(Error::invalid_config("nudge_step", "must be > 0"));
        }
        if !(self.min_module_size.width > 0.0 && self.min_module_size.height > 0.0) {
            return Err(Error::invalid_config("min_module_size", "must be > 0"));
        }
        if let Some(max) = self.max_module_size {
            if !(max.width > 0.0 && max.height > 0.0) {
                return Err(Error::invalid_config("max_module_size", "must be > 0"));
            }
            if max.width < self.min_module_size.width || max.height < self.min_module_size.height {
                warn!(
                    "max_module_size {}x{} is below min_module_size {}x{}; the minimum wins",
                    max.width, max.height, self.min_module_size.width, self.min_module_size.height
                );
            }
        }
        Ok(())
    }
}
