//! Map editor session.
//!
//! Owns the live map, its history, the selection, the held keys and any
//! in-flight gesture. Pointer moves only update the gesture; history is
//! recorded once per discrete edit or committed gesture.

use crate::error::{EditorError, EditorResult};
use crate::history::{HistoryAction, HistoryActionType, HistoryConfig, HistoryManager};
use crate::input::InputState;
use crate::model::{CampsiteMap, Module};
use crate::transform::{
    calculate_bounding_box, clamp_position, clamp_size, normalize_angle, ModuleTransform,
    ResizeHandle, ResizeOptions, RotationOptions,
};
use crate::transform_state::{TransformKind, TransformState};
use campkit_core::{Bounds, EditorConfig, Position};
use tracing::{debug, info, warn};

/// One editing session over a single map.
#[derive(Debug)]
pub struct MapEditor {
    map: CampsiteMap,
    history: HistoryManager,
    config: EditorConfig,
    selection: Vec<String>,
    input: InputState,
    transform: Option<TransformState>,
    is_modified: bool,
}

impl MapEditor {
    /// Starts a session on `map`, recording it as the base history entry.
    pub fn new(map: CampsiteMap, config: EditorConfig) -> Self {
        let mut editor = Self {
            history: HistoryManager::with_config(HistoryConfig::from(&config)),
            map,
            config,
            selection: Vec::new(),
            input: InputState::new(),
            transform: None,
            is_modified: false,
        };
        editor.record_base();
        editor
    }

    /// Replaces the live map and resets history and selection.
    pub fn load_map(&mut self, map: CampsiteMap) {
        info!("Loading map '{}' with {} modules", map.name, map.len());
        self.map = map;
        self.transform = None;
        self.selection.clear();
        self.history.clear();
        self.record_base();
        self.is_modified = false;
    }

    fn record_base(&mut self) {
        let ids = self.map.modules.iter().map(|m| m.id.clone()).collect();
        self.history
            .push_state(&self.map, HistoryAction::bulk(ids).with_description("Load map"));
    }

    fn record(&mut self, action: HistoryAction) {
        self.history.push_state(&self.map, action);
        self.is_modified = true;
    }

    pub fn map(&self) -> &CampsiteMap {
        &self.map
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn transform(&self) -> Option<&TransformState> {
        self.transform.as_ref()
    }

    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    /// Mark as unmodified (after save)
    pub fn mark_saved(&mut self) {
        self.is_modified = false;
    }

    // ---- discrete edits -------------------------------------------------

    /// Adds a module and returns its id.
    pub fn add_module(&mut self, module: Module) -> EditorResult<String> {
        let id = module.id.clone();
        self.map.add_module(module)?;
        self.record(HistoryAction::for_module(HistoryActionType::ModuleAdd, id.clone()));
        Ok(id)
    }

    pub fn delete_module(&mut self, id: &str) -> EditorResult<Module> {
        self.ensure_idle()?;
        self.ensure_unlocked(id)?;
        let removed = self.map.remove_module(id)?;
        self.selection.retain(|s| s != id);
        self.record(HistoryAction::for_module(HistoryActionType::ModuleDelete, id));
        Ok(removed)
    }

    /// Deletes every unlocked selected module as one history entry.
    pub fn delete_selected(&mut self) -> EditorResult<usize> {
        self.ensure_idle()?;
        let ids: Vec<String> = self
            .selected_modules()
            .filter(|m| !m.locked)
            .map(|m| m.id.clone())
            .collect();
        if ids.is_empty() {
            return Err(EditorError::EmptySelection);
        }
        for id in &ids {
            self.map.remove_module(id)?;
        }
        self.selection.retain(|s| !ids.contains(s));

        let count = ids.len();
        let action = if count == 1 {
            HistoryAction::for_module(HistoryActionType::ModuleDelete, ids[0].clone())
        } else {
            HistoryAction::bulk(ids).with_description(format!("Delete {} modules", count))
        };
        self.record(action);
        Ok(count)
    }

    /// Edits a module in place. The id cannot be changed. Afterwards the
    /// rotation is normalized, the size clamped to the configured limits and
    /// the position clamped back into the map.
    pub fn update_module<F>(&mut self, id: &str, edit: F) -> EditorResult<()>
    where
        F: FnOnce(&mut Module),
    {
        self.ensure_idle()?;
        let module = self
            .map
            .get_module_mut(id)
            .ok_or_else(|| EditorError::ModuleNotFound(id.to_string()))?;
        edit(module);
        if module.id != id {
            warn!("Ignoring id change on module {}", id);
            module.id = id.to_string();
        }
        module.rotation = normalize_angle(module.rotation);
        module.size = clamp_size(
            module.size,
            self.config.min_module_size,
            self.config.max_module_size,
        );
        module.touch();
        self.map.clamp_module(id)?;
        self.map.touch();
        self.record(HistoryAction::for_module(HistoryActionType::ModuleUpdate, id));
        Ok(())
    }

    pub fn set_locked(&mut self, id: &str, locked: bool) -> EditorResult<()> {
        self.update_module(id, |m| m.locked = locked)
    }

    pub fn bring_to_front(&mut self, id: &str) -> EditorResult<()> {
        self.ensure_idle()?;
        self.map.bring_to_front(id)?;
        self.record(
            HistoryAction::for_module(HistoryActionType::ModuleUpdate, id)
                .with_description("Bring to front"),
        );
        Ok(())
    }

    pub fn send_to_back(&mut self, id: &str) -> EditorResult<()> {
        self.ensure_idle()?;
        self.map.send_to_back(id)?;
        self.record(
            HistoryAction::for_module(HistoryActionType::ModuleUpdate, id)
                .with_description("Send to back"),
        );
        Ok(())
    }

    /// Moves the unlocked selection by a number of steps. A step is the
    /// grid size while Shift is held, the nudge step otherwise.
    ///
    /// Returns `false` without recording anything when the map edge keeps
    /// every module where it was.
    pub fn nudge_selected(&mut self, steps_x: f64, steps_y: f64) -> EditorResult<bool> {
        self.ensure_idle()?;
        let step = if self.input.shift() {
            self.config.grid_size
        } else {
            self.config.nudge_step
        };
        let mut state = TransformState::begin(
            TransformKind::Move,
            self.selected_modules().filter(|m| !m.locked),
        )
        .ok_or(EditorError::EmptySelection)?;
        state.apply_move(steps_x * step, steps_y * step, None);
        self.clamp_into_map(&mut state);
        if !state.is_dirty() {
            debug!("Nudge blocked by the map edge");
            return Ok(false);
        }
        self.apply_transform_state(&state);
        self.record(state.history_action());
        Ok(true)
    }

    /// Clamps every module into the map bounds. Records one entry when
    /// anything moved and returns how many modules did.
    pub fn normalize(&mut self) -> EditorResult<usize> {
        self.ensure_idle()?;
        let moved = self.map.normalize();
        if moved > 0 {
            let mut action = HistoryAction::new(HistoryActionType::BulkOperation)
                .with_description("Clamp into map bounds");
            action.count = Some(moved);
            self.record(action);
        }
        Ok(moved)
    }

    // ---- selection ------------------------------------------------------

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    /// Replaces the selection; unknown ids are ignored.
    pub fn select<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection.clear();
        for id in ids {
            let id = id.into();
            if self.map.contains(&id) && !self.selection.contains(&id) {
                self.selection.push(id);
            }
        }
    }

    /// Adds or removes one module from the selection.
    pub fn toggle_selection(&mut self, id: &str) {
        if let Some(index) = self.selection.iter().position(|s| s == id) {
            self.selection.remove(index);
        } else if self.map.contains(id) {
            self.selection.push(id.to_string());
        }
    }

    pub fn select_all(&mut self) {
        self.selection = self.map.modules.iter().map(|m| m.id.clone()).collect();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selected_modules(&self) -> impl Iterator<Item = &Module> {
        self.selection
            .iter()
            .filter_map(move |id| self.map.get_module(id))
    }

    /// Bounding box of the selection, ignoring rotation.
    pub fn selection_bounds(&self) -> Bounds {
        let transforms: Vec<ModuleTransform> =
            self.selected_modules().map(Module::transform).collect();
        calculate_bounding_box(&transforms)
    }

    // ---- gestures -------------------------------------------------------

    /// Starts a gesture over the unlocked selected modules.
    pub fn begin_transform(&mut self, kind: TransformKind) -> EditorResult<()> {
        if let Some(active) = &self.transform {
            return Err(EditorError::TransformInProgress(active.kind.to_string()));
        }
        let state = TransformState::begin(kind, self.selected_modules().filter(|m| !m.locked))
            .ok_or(EditorError::EmptySelection)?;
        debug!("Begin {} of {} modules", kind, state.len());
        self.transform = Some(state);
        Ok(())
    }

    pub fn update_move(
        &mut self,
        mouse_position: Position,
        start_mouse_position: Position,
    ) -> EditorResult<()> {
        let grid = self.config.snap_to_grid.then_some(self.config.grid_size);
        let state = self.active_transform_mut(TransformKind::Move)?;
        state.apply_move(
            mouse_position.x - start_mouse_position.x,
            mouse_position.y - start_mouse_position.y,
            grid,
        );
        Ok(())
    }

    /// Shift held locks the aspect ratio.
    pub fn update_resize(
        &mut self,
        handle: ResizeHandle,
        mouse_position: Position,
        start_mouse_position: Position,
    ) -> EditorResult<()> {
        let mut options = ResizeOptions::from(&self.config);
        options.preserve_aspect_ratio |= self.input.shift();
        let state = self.active_transform_mut(TransformKind::Resize)?;
        state.apply_resize(handle, mouse_position, start_mouse_position, &options);
        Ok(())
    }

    /// Shift held snaps to the configured angle.
    pub fn update_rotate(
        &mut self,
        mouse_position: Position,
        start_mouse_position: Position,
    ) -> EditorResult<()> {
        let options = RotationOptions {
            snap_angle: self.input.shift().then_some(self.config.snap_angle),
            current_rotation: None,
        };
        let state = self.active_transform_mut(TransformKind::Rotate)?;
        state.apply_rotation(mouse_position, start_mouse_position, &options);
        Ok(())
    }

    /// Applies the gesture to the map and records one history entry.
    ///
    /// Returns `false` when the gesture changed nothing; no entry is recorded
    /// in that case.
    pub fn commit_transform(&mut self) -> EditorResult<bool> {
        let mut state = self.transform.take().ok_or(EditorError::NoActiveTransform)?;
        self.clamp_into_map(&mut state);
        if !state.is_dirty() {
            debug!("Discarding no-op {}", state.kind);
            return Ok(false);
        }
        self.apply_transform_state(&state);
        self.record(state.history_action());
        let settled = state.current_bounding_box();
        debug!(
            "Committed {} of {} modules, selection now {}x{} at ({}, {})",
            state.kind,
            state.len(),
            settled.width,
            settled.height,
            settled.x,
            settled.y
        );
        if !self.map.bounds.contains_bounds(&settled) {
            debug!("Selection is larger than the map and overflows its bounds");
        }
        Ok(true)
    }

    /// Drops the in-flight gesture without touching the map or history.
    pub fn cancel_transform(&mut self) -> bool {
        let cancelled = self.transform.take();
        if let Some(state) = &cancelled {
            debug!("Cancelled {}", state.kind);
        }
        cancelled.is_some()
    }

    fn active_transform_mut(&mut self, kind: TransformKind) -> EditorResult<&mut TransformState> {
        let state = self
            .transform
            .as_mut()
            .ok_or(EditorError::NoActiveTransform)?;
        if state.kind != kind {
            return Err(EditorError::TransformKindMismatch {
                expected: state.kind.to_string(),
                actual: kind.to_string(),
            });
        }
        Ok(state)
    }

    /// Pulls every target position of the gesture back inside the map.
    fn clamp_into_map(&self, state: &mut TransformState) {
        let bounds = self.map.bounds;
        for target in state.current_bounds.values_mut() {
            target.position = clamp_position(target.position, target.size, &bounds);
        }
    }

    fn apply_transform_state(&mut self, state: &TransformState) {
        for id in &state.module_ids {
            let (Some(target), Some(module)) =
                (state.current_bounds.get(id), self.map.get_module_mut(id))
            else {
                warn!("Module {} vanished during transform", id);
                continue;
            };
            module.apply_transform(target);
        }
        self.map.touch();
    }

    fn ensure_idle(&self) -> EditorResult<()> {
        match &self.transform {
            Some(active) => Err(EditorError::TransformInProgress(active.kind.to_string())),
            None => Ok(()),
        }
    }

    fn ensure_unlocked(&self, id: &str) -> EditorResult<()> {
        let module = self
            .map
            .get_module(id)
            .ok_or_else(|| EditorError::ModuleNotFound(id.to_string()))?;
        if module.locked {
            return Err(EditorError::ModuleLocked(id.to_string()));
        }
        Ok(())
    }

    // ---- history --------------------------------------------------------

    /// Steps back one entry. Any in-flight gesture is cancelled first.
    pub fn undo(&mut self) -> bool {
        self.cancel_transform();
        match self.history.undo() {
            Some(map) => {
                self.install(map);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        self.cancel_transform();
        match self.history.redo() {
            Some(map) => {
                self.install(map);
                true
            }
            None => false,
        }
    }

    fn install(&mut self, map: CampsiteMap) {
        self.map = map;
        let map = &self.map;
        self.selection.retain(|id| map.contains(id));
        self.is_modified = true;
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Menu text such as "Undo Rotate module".
    pub fn undo_label(&self) -> Option<String> {
        if !self.can_undo() {
            return None;
        }
        self.history
            .last_action()
            .map(|a| format!("Undo {}", a.label()))
    }

    pub fn redo_label(&self) -> Option<String> {
        self.history
            .next_action()
            .map(|a| format!("Redo {}", a.label()))
    }
}
