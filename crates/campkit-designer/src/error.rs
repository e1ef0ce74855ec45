//! Error types for the map editor crate.
//!
//! Transform math and history never fail; these errors come from editing
//! operations that name a module or a gesture that does not exist.

use thiserror::Error;

/// Errors that can occur during editor operations.
#[derive(Error, Debug)]
pub enum EditorError {
    /// No module with this id exists on the map.
    #[error("Module not found: {0}")]
    ModuleNotFound(String),

    /// A module with this id already exists on the map.
    #[error("Duplicate module id: {0}")]
    DuplicateModule(String),

    /// The module is locked against edits.
    #[error("Module is locked: {0}")]
    ModuleLocked(String),

    /// The operation needs at least one selected, unlocked module.
    #[error("Nothing selected")]
    EmptySelection,

    /// A gesture is already in flight.
    #[error("A {0} transform is already in progress")]
    TransformInProgress(String),

    /// No gesture is in flight.
    #[error("No transform in progress")]
    NoActiveTransform,

    /// The update does not match the kind of the in-flight gesture.
    #[error("Transform kind mismatch: expected {expected}, got {actual}")]
    TransformKindMismatch { expected: String, actual: String },

    /// A snapshot could not be produced by any clone strategy.
    #[error("Snapshot clone failed: {0}")]
    SnapshotClone(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;
