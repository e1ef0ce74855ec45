//! Geometry primitives for the map plane.
//!
//! All coordinates are map-local floats with the origin at the top-left corner
//! and the y axis pointing down. Rotation is never folded into [`Bounds`]; it is
//! stored alongside and only applied for rendering and hit-testing.

use serde::{Deserialize, Serialize};

/// A point on the map plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Creates a new position.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this position shifted by `(dx, dy)`.
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Width and height of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Creates a new size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width divided by height, or `None` for a flat rectangle.
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.height.abs() > f64::EPSILON {
            Some(self.width / self.height)
        } else {
            None
        }
    }
}

/// Axis-aligned rectangle; `x`/`y` is the unrotated top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Creates bounds from corner and extent.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates bounds from a position and a size.
    pub fn from_parts(position: Position, size: Size) -> Self {
        Self::new(position.x, position.y, size.width, size.height)
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn union(&self, other: &Bounds) -> Bounds {
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        let max_x = self.right().max(other.right());
        let max_y = self.bottom().max(other.bottom());
        Bounds::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }
}

/// Min/max extents of the map area that modules are clamped into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl MapBounds {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Map bounds starting at the origin with the given extent.
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Returns true if the rectangle lies fully inside these bounds.
    pub fn contains_bounds(&self, bounds: &Bounds) -> bool {
        bounds.x >= self.min_x
            && bounds.y >= self.min_y
            && bounds.right() <= self.max_x
            && bounds.bottom() <= self.max_y
    }
}

impl Default for MapBounds {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1000.0, 1000.0)
    }
}

/// Euclidean distance between two points.
pub fn distance(p1: Position, p2: Position) -> f64 {
    (p2.x - p1.x).hypot(p2.y - p1.y)
}

/// Rotates `point` about `center` by `angle_degrees` (clockwise on screen, since y points down).
pub fn rotate_point(point: Position, center: Position, angle_degrees: f64) -> Position {
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    Position::new(
        center.x + dx * cos - dy * sin,
        center.y + dx * sin + dy * cos,
    )
}

/// Center point of a rectangle.
pub fn get_bounds_center(bounds: &Bounds) -> Position {
    Position::new(bounds.x + bounds.width / 2.0, bounds.y + bounds.height / 2.0)
}
