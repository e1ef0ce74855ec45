//! # CampKit Designer
//!
//! Geometry and history engine for the campsite map editor. Modules (pitches,
//! buildings, roads, utility points) sit on a bounded map and are moved,
//! resized and rotated by pointer gestures; every committed edit is recorded
//! as a whole-map snapshot for undo/redo.
//!
//! ## Core Components
//!
//! - **Transform**: pure resize, rotation, snapping and clamping math
//! - **Model**: modules with kind-specific metadata, and the map that owns them
//! - **History**: bounded undo/redo over deep-copied map snapshots
//! - **Transform State**: one in-flight gesture over any number of modules
//! - **Editor**: the session tying map, selection, input and history together
//!
//! ## Architecture
//!
//! ```text
//! MapEditor
//!   ├── CampsiteMap (modules, bounds)
//!   ├── TransformState (in-flight gesture)
//!   │     └── transform (calculate_resize, calculate_rotation, snapping)
//!   ├── InputState (held keys)
//!   └── HistoryManager (undo/redo snapshots)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use campkit_designer::{CampsiteMap, MapEditor, Module, ModuleType, TransformKind};
//!
//! let mut editor = MapEditor::new(map, EditorConfig::default());
//! editor.select([site_id]);
//! editor.begin_transform(TransformKind::Move)?;
//! editor.update_move(pointer, press)?;
//! editor.commit_transform()?;
//! editor.undo();
//! ```

pub mod editor;
pub mod error;
pub mod history;
pub mod input;
pub mod io;
pub mod model;
pub mod transform;
pub mod transform_state;

pub use editor::MapEditor;
pub use error::{EditorError, EditorResult};
pub use history::{
    create_history_manager, deep_clone, json_clone, HistoryAction, HistoryActionType,
    HistoryConfig, HistoryManager, HistorySnapshot, HistoryState,
};
pub use input::{InputState, KEY_SHIFT};
pub use io::{load_map, save_map};
pub use model::{
    BuildingMetadata, CampsiteMap, CampsiteMetadata, Hookups, MapMetadata, Module,
    ModuleMetadata, ModuleType, ParkingMetadata, PitchSurface, PlaygroundMetadata,
    PowerHookupMetadata, ReceptionMetadata, RoadMetadata, RoadSurface, ShowerBlockMetadata,
    ToiletBlockMetadata, WasteStationMetadata, WaterPointMetadata,
};
pub use transform::{
    calculate_bounding_box, calculate_resize, calculate_rotation, clamp_position, clamp_size,
    normalize_angle, preserve_aspect_ratio, snap_angle, snap_size_to_grid, snap_to_grid,
    AspectAxis, ModuleTransform, ResizeHandle, ResizeOptions, ResizeResult, RotationOptions,
    RotationResult,
};
pub use transform_state::{TransformKind, TransformState};

pub use campkit_core::{Bounds, EditorConfig, MapBounds, Position, Size};
