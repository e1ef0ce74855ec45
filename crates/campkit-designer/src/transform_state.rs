//! In-flight multi-module transform.
//!
//! Holds each selected module's start placement and the placement computed for
//! the latest pointer position, so one gesture can drive any number of
//! modules. Nothing here records history; the caller commits once when the
//! gesture ends.

use crate::history::{HistoryAction, HistoryActionType};
use crate::model::Module;
use crate::transform::{
    calculate_bounding_box, calculate_resize, calculate_rotation, normalize_angle, snap_angle,
    snap_to_grid, ModuleTransform, ResizeHandle, ResizeOptions, RotationOptions,
};
use campkit_core::{get_bounds_center, rotate_point, Bounds, Position};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::trace;

/// What a gesture does to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformKind {
    Move,
    Resize,
    Rotate,
}

impl TransformKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransformKind::Move => "move",
            TransformKind::Resize => "resize",
            TransformKind::Rotate => "rotate",
        }
    }

    fn action_type(self) -> HistoryActionType {
        match self {
            TransformKind::Move => HistoryActionType::ModuleMove,
            TransformKind::Resize => HistoryActionType::ModuleResize,
            TransformKind::Rotate => HistoryActionType::ModuleRotate,
        }
    }
}

impl std::fmt::Display for TransformKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransformState {
    pub kind: TransformKind,
    /// Ids in selection order.
    pub module_ids: Vec<String>,
    pub start_bounds: HashMap<String, ModuleTransform>,
    pub current_bounds: HashMap<String, ModuleTransform>,
    /// Shared reference point, the selection's bounding-box center at gesture start.
    pub pivot: Position,
}

impl TransformState {
    /// Starts a gesture over `modules`. Returns `None` for an empty selection.
    pub fn begin<'a, I>(kind: TransformKind, modules: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Module>,
    {
        let mut module_ids = Vec::new();
        let mut start_bounds = HashMap::new();
        for module in modules {
            if start_bounds
                .insert(module.id.clone(), module.transform())
                .is_none()
            {
                module_ids.push(module.id.clone());
            }
        }
        if module_ids.is_empty() {
            return None;
        }

        let pivot = get_bounds_center(&calculate_bounding_box(start_bounds.values()));
        Some(Self {
            kind,
            module_ids,
            current_bounds: start_bounds.clone(),
            start_bounds,
            pivot,
        })
    }

    pub fn len(&self) -> usize {
        self.module_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.module_ids.is_empty()
    }

    /// Bounding box of the selection at gesture start.
    pub fn start_bounding_box(&self) -> Bounds {
        calculate_bounding_box(self.start_bounds.values())
    }

    /// Bounding box of the selection at the latest pointer position.
    pub fn current_bounding_box(&self) -> Bounds {
        calculate_bounding_box(self.current_bounds.values())
    }

    /// Translates every module by the pointer delta, optionally snapping each
    /// resulting position to the grid.
    pub fn apply_move(&mut self, dx: f64, dy: f64, grid_size: Option<f64>) {
        for id in &self.module_ids {
            let Some(start) = self.start_bounds.get(id) else {
                continue;
            };
            let mut position = start.position.offset(dx, dy);
            if let Some(grid) = grid_size {
                position = snap_to_grid(position, grid);
            }
            self.current_bounds.insert(
                id.clone(),
                ModuleTransform::new(position, start.size, start.rotation),
            );
        }
        trace!(dx, dy, modules = self.module_ids.len(), "move");
    }

    /// Resizes each module independently from its own start bounds.
    pub fn apply_resize(
        &mut self,
        handle: ResizeHandle,
        mouse_position: Position,
        start_mouse_position: Position,
        options: &ResizeOptions,
    ) {
        for id in &self.module_ids {
            let Some(start) = self.start_bounds.get(id) else {
                continue;
            };
            let result = calculate_resize(
                handle,
                &start.bounds(),
                mouse_position,
                start_mouse_position,
                options,
            );
            self.current_bounds.insert(
                id.clone(),
                ModuleTransform::new(result.position, result.size, start.rotation),
            );
        }
    }

    /// Rotates the selection about the pivot by the angle swept since
    /// `start_mouse_position`.
    ///
    /// With a snap angle, a single module snaps its absolute rotation while a
    /// multi-selection snaps the swept angle so relative rotations survive.
    pub fn apply_rotation(
        &mut self,
        mouse_position: Position,
        start_mouse_position: Position,
        options: &RotationOptions,
    ) {
        let free = RotationOptions::default();
        let start_angle = calculate_rotation(self.pivot, start_mouse_position, &free).angle;
        let angle = calculate_rotation(self.pivot, mouse_position, &free).angle;
        let swept = angle - start_angle;
        let step = options.snap_angle.filter(|s| *s > 0.0);
        let single = self.module_ids.len() == 1;

        for id in &self.module_ids {
            let Some(start) = self.start_bounds.get(id) else {
                continue;
            };
            let (delta, rotation) = match step {
                Some(step) if single => {
                    let rotation = snap_angle(start.rotation + swept, step);
                    (rotation - start.rotation, rotation)
                }
                Some(step) => {
                    let delta = snap_angle(swept, step);
                    (delta, normalize_angle(start.rotation + delta))
                }
                None => (swept, normalize_angle(start.rotation + swept)),
            };

            let center = rotate_point(get_bounds_center(&start.bounds()), self.pivot, delta);
            let position = Position::new(
                center.x - start.size.width / 2.0,
                center.y - start.size.height / 2.0,
            );
            self.current_bounds.insert(
                id.clone(),
                ModuleTransform::new(position, start.size, rotation),
            );
        }
        trace!(swept, "rotate");
    }

    /// Ids whose current placement differs from the start.
    pub fn changed_ids(&self) -> Vec<&str> {
        self.module_ids
            .iter()
            .filter(|id| self.start_bounds.get(*id) != self.current_bounds.get(*id))
            .map(String::as_str)
            .collect()
    }

    pub fn is_dirty(&self) -> bool {
        !self.changed_ids().is_empty()
    }

    /// The single history entry this gesture commits as.
    pub fn history_action(&self) -> HistoryAction {
        match self.module_ids.as_slice() {
            [id] => HistoryAction::for_module(self.kind.action_type(), id.clone()),
            ids => {
                let count = ids.len();
                HistoryAction::bulk(ids.to_vec())
                    .with_description(format!("{} {} modules", capitalize(self.kind.as_str()), count))
            }
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
