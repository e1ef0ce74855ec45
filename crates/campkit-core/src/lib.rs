//! # CampKit Core
//!
//! Core types shared by the CampKit map editor crates:
//! geometry primitives for the map plane, the editor configuration,
//! and the core error type.

pub mod config;
pub mod error;
pub mod geometry;

pub use config::{
    EditorConfig, DEFAULT_GRID_SIZE, DEFAULT_MAX_HISTORY_SIZE, DEFAULT_MIN_MODULE_SIZE,
    DEFAULT_SNAP_ANGLE,
};
pub use error::{Error, Result};
pub use geometry::{distance, get_bounds_center, rotate_point, Bounds, MapBounds, Position, Size};
