//! Undo/redo history over whole-map snapshots.
//!
//! Every recorded action stores an independent deep copy of the complete map.
//! This trades memory for an undo that is correct regardless of what the
//! action did; the stack depth bounds the worst case.
//!
//! The bottom entry of the undo stack is the base state. Undo is only possible
//! while there are at least two entries, because undoing returns the state
//! *below* the popped one.

use crate::error::{EditorError, EditorResult};
use crate::model::CampsiteMap;
use campkit_core::{EditorConfig, DEFAULT_MAX_HISTORY_SIZE};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error, warn};

/// Kind of edit a history entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryActionType {
    ModuleAdd,
    ModuleDelete,
    ModuleMove,
    ModuleResize,
    ModuleRotate,
    ModuleUpdate,
    BulkOperation,
}

impl HistoryActionType {
    fn label(self) -> &'static str {
        match self {
            HistoryActionType::ModuleAdd => "Add module",
            HistoryActionType::ModuleDelete => "Delete module",
            HistoryActionType::ModuleMove => "Move module",
            HistoryActionType::ModuleResize => "Resize module",
            HistoryActionType::ModuleRotate => "Rotate module",
            HistoryActionType::ModuleUpdate => "Update module",
            HistoryActionType::BulkOperation => "Bulk operation",
        }
    }
}

/// Descriptor attached to each snapshot. Only used for labels and debugging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryAction {
    #[serde(rename = "type")]
    pub action_type: HistoryActionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl HistoryAction {
    pub fn new(action_type: HistoryActionType) -> Self {
        Self {
            action_type,
            module_id: None,
            module_ids: None,
            count: None,
            description: None,
        }
    }

    /// Action touching a single module.
    pub fn for_module(action_type: HistoryActionType, module_id: impl Into<String>) -> Self {
        Self {
            module_id: Some(module_id.into()),
            ..Self::new(action_type)
        }
    }

    /// `bulk_operation` over several modules.
    pub fn bulk(module_ids: Vec<String>) -> Self {
        Self {
            count: Some(module_ids.len()),
            module_ids: Some(module_ids),
            ..Self::new(HistoryActionType::BulkOperation)
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Text for menu items such as "Undo rotate module".
    pub fn label(&self) -> String {
        if let Some(description) = &self.description {
            return description.clone();
        }
        match (self.action_type, self.count) {
            (HistoryActionType::BulkOperation, Some(count)) => {
                format!("{} ({} modules)", self.action_type.label(), count)
            }
            (action_type, _) => action_type.label().to_string(),
        }
    }
}

/// One immutable history entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryState<T = CampsiteMap> {
    pub map_state: T,
    pub timestamp: DateTime<Utc>,
    pub action: HistoryAction,
}

/// Diagnostics view of a [`HistoryManager`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySnapshot {
    pub undo_stack_size: usize,
    pub redo_stack_size: usize,
    pub last_action: Option<HistoryAction>,
    pub next_action: Option<HistoryAction>,
}

/// Configuration for [`HistoryManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryConfig {
    pub max_history_size: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_history_size: DEFAULT_MAX_HISTORY_SIZE,
        }
    }
}

impl From<&EditorConfig> for HistoryConfig {
    fn from(config: &EditorConfig) -> Self {
        Self {
            max_history_size: config.max_history_size,
        }
    }
}

/// Deep-copies a value, falling back to a JSON round trip if `Clone` panics.
///
/// The fallback drops anything that does not survive JSON.
pub fn deep_clone<T>(value: &T) -> EditorResult<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    match panic::catch_unwind(AssertUnwindSafe(|| value.clone())) {
        Ok(copy) => Ok(copy),
        Err(_) => {
            warn!("Structural clone failed, falling back to JSON clone");
            json_clone(value).map_err(|e| EditorError::SnapshotClone(e.to_string()))
        }
    }
}

/// Deep-copies a value through `serde_json`.
pub fn json_clone<T>(value: &T) -> EditorResult<T>
where
    T: Serialize + DeserializeOwned,
{
    let json = serde_json::to_value(value)?;
    serde_json::from_value(json).map_err(EditorError::from)
}

/// Bounded undo/redo stack of whole-map snapshots.
#[derive(Debug, Clone)]
pub struct HistoryManager<T = CampsiteMap> {
    undo_stack: VecDeque<HistoryState<T>>,
    redo_stack: Vec<HistoryState<T>>,
    max_history_size: usize,
}

/// Creates a history manager, using defaults when no config is given.
pub fn create_history_manager(config: Option<HistoryConfig>) -> HistoryManager {
    HistoryManager::with_config(config.unwrap_or_default())
}

impl<T> HistoryManager<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    /// Creates a manager with the default depth (50).
    pub fn new() -> Self {
        Self::with_config(HistoryConfig::default())
    }

    /// Creates a manager with a custom depth. A depth of zero is raised to one.
    pub fn with_config(config: HistoryConfig) -> Self {
        let max_history_size = config.max_history_size.max(1);
        Self {
            undo_stack: VecDeque::with_capacity(max_history_size + 1),
            redo_stack: Vec::new(),
            max_history_size,
        }
    }

    pub fn max_history_size(&self) -> usize {
        self.max_history_size
    }

    /// Records a deep copy of `map_state` and destroys any pending redo branch.
    ///
    /// When the stack grows past its bound, the oldest entry is dropped.
    pub fn push_state(&mut self, map_state: &T, action: HistoryAction) {
        let snapshot = match deep_clone(map_state) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!("Dropping history entry {:?}: {}", action.action_type, e);
                return;
            }
        };

        self.undo_stack.push_back(HistoryState {
            map_state: snapshot,
            timestamp: Utc::now(),
            action,
        });
        if self.undo_stack.len() > self.max_history_size {
            self.undo_stack.pop_front();
        }
        self.redo_stack.clear();

        debug!(
            undo = self.undo_stack.len(),
            "Recorded history entry {}",
            self.last_action().map(HistoryAction::label).unwrap_or_default()
        );
    }

    /// Steps back one entry and returns a copy of the state before it.
    ///
    /// Returns `None` when fewer than two entries exist.
    pub fn undo(&mut self) -> Option<T> {
        let len = self.undo_stack.len();
        if len <= 1 {
            return None;
        }
        let restored = self.clone_or_log(&self.undo_stack[len - 2].map_state)?;
        let popped = self.undo_stack.pop_back()?;
        debug!("Undo {}", popped.action.label());
        self.redo_stack.push(popped);
        Some(restored)
    }

    /// Re-applies the most recently undone entry and returns a copy of it.
    pub fn redo(&mut self) -> Option<T> {
        let restored = self.clone_or_log(&self.redo_stack.last()?.map_state)?;
        let entry = self.redo_stack.pop()?;
        debug!("Redo {}", entry.action.label());
        self.undo_stack.push_back(entry);
        Some(restored)
    }

    fn clone_or_log(&self, state: &T) -> Option<T> {
        match deep_clone(state) {
            Ok(copy) => Some(copy),
            Err(e) => {
                error!("Failed to restore history snapshot: {}", e);
                None
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Empties both stacks.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Action at the top of the undo stack.
    pub fn last_action(&self) -> Option<&HistoryAction> {
        self.undo_stack.back().map(|s| &s.action)
    }

    /// Action that `redo` would re-apply.
    pub fn next_action(&self) -> Option<&HistoryAction> {
        self.redo_stack.last().map(|s| &s.action)
    }

    /// The most recent snapshot, without copying it.
    pub fn current_state(&self) -> Option<&HistoryState<T>> {
        self.undo_stack.back()
    }

    pub fn undo_stack_size(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_stack_size(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            undo_stack_size: self.undo_stack_size(),
            redo_stack_size: self.redo_stack_size(),
            last_action: self.last_action().cloned(),
            next_action: self.next_action().cloned(),
        }
    }
}

impl<T> Default for HistoryManager<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    fn default() -> Self {
        Self::new()
    }
}
