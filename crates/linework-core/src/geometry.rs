//! Integer bounding boxes and overlap tests.

use kurbo::Rect;
use serde::{Deserialize, Serialize};

const SNAP_EPSILON: f64 = 1e-6;

/// Axis-aligned bounding box in canvas coordinates.
///
/// Always normalized: `min_x <= max_x` and `min_y <= max_y`. A box may be
/// degenerate (zero width or height), which is how horizontal/vertical lines
/// and zero-area selection rectangles are represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl BoundingBox {
    /// Build a box from two corners given in any order.
    pub fn from_corners(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min_x: x0.min(x1),
            min_y: y0.min(y1),
            max_x: x0.max(x1),
            max_y: y0.max(y1),
        }
    }

    /// Smallest integer box that contains a floating-point rectangle.
    ///
    /// Values within `SNAP_EPSILON` of an integer are snapped first so that
    /// curve-fitting noise does not grow the box by a whole unit.
    pub fn enclosing(rect: Rect) -> Self {
        let snap = |v: f64| {
            let rounded = v.round();
            if (v - rounded).abs() < SNAP_EPSILON { rounded } else { v }
        };
        Self::from_corners(
            snap(rect.x0).floor() as i32,
            snap(rect.y0).floor() as i32,
            snap(rect.x1).ceil() as i32,
            snap(rect.y1).ceil() as i32,
        )
    }

    pub fn width(&self) -> u32 {
        self.max_x.abs_diff(self.min_x)
    }

    pub fn height(&self) -> u32 {
        self.max_y.abs_diff(self.min_y)
    }

    /// True when the box has no area.
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Inclusive overlap test: boxes that only touch along an edge or a
    /// corner overlap.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    /// Check whether a point lies inside or on the edge of this box.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Offset the box, clamping at the `i32` range like shape moves do.
    pub fn translated(&self, dx: i32, dy: i32) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x.saturating_add(dx),
            min_y: self.min_y.saturating_add(dy),
            max_x: self.max_x.saturating_add(dx),
            max_y: self.max_y.saturating_add(dy),
        }
    }
}
