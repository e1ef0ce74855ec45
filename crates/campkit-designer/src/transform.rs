//! Transform math for placed modules: resize by handle, rotate by drag,
//! grid snapping, clamping and selection bounding boxes.
//!
//! Every function here is pure. They are called at pointer-move frequency and
//! never touch history.

use campkit_core::{Bounds, MapBounds, Position, Size, DEFAULT_MIN_MODULE_SIZE};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// One of the eight drag points around a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeHandle {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::TopLeft,
        ResizeHandle::TopCenter,
        ResizeHandle::TopRight,
        ResizeHandle::MiddleLeft,
        ResizeHandle::MiddleRight,
        ResizeHandle::BottomLeft,
        ResizeHandle::BottomCenter,
        ResizeHandle::BottomRight,
    ];

    /// Handle drags the left edge.
    pub fn moves_left(self) -> bool {
        matches!(
            self,
            ResizeHandle::TopLeft | ResizeHandle::MiddleLeft | ResizeHandle::BottomLeft
        )
    }

    /// Handle drags the top edge.
    pub fn moves_top(self) -> bool {
        matches!(
            self,
            ResizeHandle::TopLeft | ResizeHandle::TopCenter | ResizeHandle::TopRight
        )
    }

    /// Handle changes the width.
    pub fn affects_width(self) -> bool {
        !matches!(self, ResizeHandle::TopCenter | ResizeHandle::BottomCenter)
    }

    /// Handle changes the height.
    pub fn affects_height(self) -> bool {
        !matches!(self, ResizeHandle::MiddleLeft | ResizeHandle::MiddleRight)
    }

    pub fn is_corner(self) -> bool {
        self.affects_width() && self.affects_height()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResizeHandle::TopLeft => "top-left",
            ResizeHandle::TopCenter => "top-center",
            ResizeHandle::TopRight => "top-right",
            ResizeHandle::MiddleLeft => "middle-left",
            ResizeHandle::MiddleRight => "middle-right",
            ResizeHandle::BottomLeft => "bottom-left",
            ResizeHandle::BottomCenter => "bottom-center",
            ResizeHandle::BottomRight => "bottom-right",
        }
    }
}

impl std::fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for [`calculate_resize`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeOptions {
    pub preserve_aspect_ratio: bool,
    pub snap_to_grid: bool,
    pub grid_size: f64,
    pub min_size: Size,
    pub max_size: Option<Size>,
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            preserve_aspect_ratio: false,
            snap_to_grid: false,
            grid_size: campkit_core::DEFAULT_GRID_SIZE,
            min_size: DEFAULT_MIN_MODULE_SIZE,
            max_size: None,
        }
    }
}

impl From<&campkit_core::EditorConfig> for ResizeOptions {
    fn from(config: &campkit_core::EditorConfig) -> Self {
        Self {
            preserve_aspect_ratio: config.preserve_aspect_ratio,
            snap_to_grid: config.snap_to_grid,
            grid_size: config.grid_size,
            min_size: config.min_module_size,
            max_size: config.max_module_size,
        }
    }
}

/// New placement of a resized rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeResult {
    pub position: Position,
    pub size: Size,
}

impl ResizeResult {
    pub fn bounds(&self) -> Bounds {
        Bounds::from_parts(self.position, self.size)
    }
}

/// Computes new bounds for a rectangle dragged by `handle`.
///
/// Order of operations: raw handle deltas, optional aspect-ratio lock, min/max
/// clamp, re-anchoring so the edge opposite the handle stays put, then grid
/// snapping. Snapping runs last and may leave the result up to one grid step
/// away from `min_size`/`max_size`.
pub fn calculate_resize(
    handle: ResizeHandle,
    current_bounds: &Bounds,
    mouse_position: Position,
    start_mouse_position: Position,
    options: &ResizeOptions,
) -> ResizeResult {
    let dx = mouse_position.x - start_mouse_position.x;
    let dy = mouse_position.y - start_mouse_position.y;

    // Growth of each dimension; dragging a near edge outwards is a negative delta.
    let grow_w = if !handle.affects_width() {
        0.0
    } else if handle.moves_left() {
        -dx
    } else {
        dx
    };
    let grow_h = if !handle.affects_height() {
        0.0
    } else if handle.moves_top() {
        -dy
    } else {
        dy
    };

    let original = current_bounds.size();
    let mut width = original.width + grow_w;
    let mut height = original.height + grow_h;

    if options.preserve_aspect_ratio {
        if let Some(ratio) = original.aspect_ratio().filter(|r| *r > 0.0) {
            if handle.is_corner() {
                let magnitude = (dx.abs() + dy.abs()) / 2.0;
                let dominant = if grow_w.abs() >= grow_h.abs() {
                    grow_w
                } else {
                    grow_h
                };
                let sign = if dominant < 0.0 { -1.0 } else { 1.0 };
                width = original.width + sign * magnitude;
                height = width / ratio;
            } else if handle.affects_width() {
                height = width / ratio;
            } else {
                width = height * ratio;
            }
        }
    }

    let clamped = clamp_size(Size::new(width, height), options.min_size, options.max_size);

    let x = if handle.moves_left() {
        current_bounds.right() - clamped.width
    } else {
        current_bounds.x
    };
    let y = if handle.moves_top() {
        current_bounds.bottom() - clamped.height
    } else {
        current_bounds.y
    };

    let mut position = Position::new(x, y);
    let mut size = clamped;
    if options.snap_to_grid {
        position = snap_to_grid(position, options.grid_size);
        size = snap_size_to_grid(size, options.grid_size);
    }

    trace!(
        handle = handle.as_str(),
        dx,
        dy,
        x = position.x,
        y = position.y,
        width = size.width,
        height = size.height,
        "resize"
    );

    ResizeResult { position, size }
}

/// Options for [`calculate_rotation`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationOptions {
    pub snap_angle: Option<f64>,
    /// Rotation before the gesture; informational only, the result is absolute.
    pub current_rotation: Option<f64>,
}

/// Result of [`calculate_rotation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationResult {
    /// Angle in degrees, in `[0, 360)`.
    pub angle: f64,
}

/// Absolute angle of the vector from `center` to `mouse_position`.
///
/// 0° points right and angles grow clockwise on screen (90° points down).
pub fn calculate_rotation(
    center: Position,
    mouse_position: Position,
    options: &RotationOptions,
) -> RotationResult {
    let dx = mouse_position.x - center.x;
    let dy = mouse_position.y - center.y;
    let mut angle = normalize_angle(dy.atan2(dx).to_degrees());

    if let Some(step) = options.snap_angle.filter(|s| *s > 0.0) {
        angle = snap_angle(angle, step);
    }

    trace!(angle, current = ?options.current_rotation, "rotation");
    RotationResult { angle }
}

/// Wraps an angle in degrees into `[0, 360)`.
pub fn normalize_angle(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Rounds an angle to the nearest multiple of `step` and re-normalizes it.
pub fn snap_angle(degrees: f64, step: f64) -> f64 {
    normalize_angle((degrees / step).round() * step)
}

fn snap_value(value: f64, grid_size: f64) -> f64 {
    if grid_size > 0.0 {
        (value / grid_size).round() * grid_size
    } else {
        value
    }
}

/// Rounds each coordinate to the nearest multiple of `grid_size`.
pub fn snap_to_grid(position: Position, grid_size: f64) -> Position {
    Position::new(
        snap_value(position.x, grid_size),
        snap_value(position.y, grid_size),
    )
}

/// Rounds each dimension to the nearest multiple of `grid_size`.
pub fn snap_size_to_grid(size: Size, grid_size: f64) -> Size {
    Size::new(
        snap_value(size.width, grid_size),
        snap_value(size.height, grid_size),
    )
}

/// Keeps a module's top-left corner inside `bounds`.
///
/// A module wider or taller than the map lands on `min_x`/`min_y` and is
/// allowed to overflow on the far side.
pub fn clamp_position(position: Position, size: Size, bounds: &MapBounds) -> Position {
    Position::new(
        position.x.min(bounds.max_x - size.width).max(bounds.min_x),
        position.y.min(bounds.max_y - size.height).max(bounds.min_y),
    )
}

/// Clamps each dimension into `[min_size, max_size]`; `min_size` wins on conflict.
pub fn clamp_size(size: Size, min_size: Size, max_size: Option<Size>) -> Size {
    let (mut width, mut height) = (size.width, size.height);
    if let Some(max) = max_size {
        width = width.min(max.width);
        height = height.min(max.height);
    }
    Size::new(width.max(min_size.width), height.max(min_size.height))
}

/// Which dimension drives [`preserve_aspect_ratio`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectAxis {
    Width,
    Height,
    Both,
}

/// Re-derives a size so it keeps `original_size`'s aspect ratio.
///
/// `AspectAxis::Both` scales by the larger of the two ratios, so the result
/// always contains the requested size.
pub fn preserve_aspect_ratio(size: Size, original_size: Size, axis: AspectAxis) -> Size {
    if original_size.width <= 0.0 || original_size.height <= 0.0 {
        return size;
    }
    match axis {
        AspectAxis::Width => Size::new(
            size.width,
            size.width * original_size.height / original_size.width,
        ),
        AspectAxis::Height => Size::new(
            size.height * original_size.width / original_size.height,
            size.height,
        ),
        AspectAxis::Both => {
            let ratio = (size.width / original_size.width).max(size.height / original_size.height);
            Size::new(original_size.width * ratio, original_size.height * ratio)
        }
    }
}

/// Position, size and rotation of one module.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ModuleTransform {
    pub position: Position,
    pub size: Size,
    pub rotation: f64,
}

impl ModuleTransform {
    pub fn new(position: Position, size: Size, rotation: f64) -> Self {
        Self {
            position,
            size,
            rotation,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_parts(self.position, self.size)
    }
}

/// Axis-aligned union of the unrotated rectangles; empty input yields a zero rect.
pub fn calculate_bounding_box<'a, I>(modules: I) -> Bounds
where
    I: IntoIterator<Item = &'a ModuleTransform>,
{
    modules
        .into_iter()
        .map(ModuleTransform::bounds)
        .reduce(|acc, b| acc.union(&b))
        .unwrap_or_default()
}
