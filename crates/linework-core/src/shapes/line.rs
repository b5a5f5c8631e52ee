//! Line shape.

use super::{DEFAULT_COLOR, ShapeId, ShapeKind, ShapeTrait};
use crate::geometry::BoundingBox;
use kurbo::{BezPath, Line as KurboLine, Point, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A straight line segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub(crate) id: ShapeId,
    /// Start point x.
    pub x0: i32,
    /// Start point y.
    pub y0: i32,
    /// End point x.
    pub x1: i32,
    /// End point y.
    pub y1: i32,
    /// Stroke color (named or hex).
    pub color: String,
}

impl Line {
    /// Create a new black line.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            x0,
            y0,
            x1,
            y1,
            color: DEFAULT_COLOR.to_string(),
        }
    }

    /// Replace the color; an empty color falls back to the default.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.set_color(color.into());
        self
    }

    pub fn start(&self) -> Point {
        Point::new(f64::from(self.x0), f64::from(self.y0))
    }

    pub fn end(&self) -> Point {
        Point::new(f64::from(self.x1), f64::from(self.y1))
    }

    /// Get the length of the line.
    pub fn length(&self) -> f64 {
        self.as_kurbo().length()
    }

    /// Get as a kurbo Line.
    pub fn as_kurbo(&self) -> KurboLine {
        KurboLine::new(self.start(), self.end())
    }
}

impl ShapeTrait for Line {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Line
    }

    fn coords(&self) -> (i32, i32, i32, i32) {
        (self.x0, self.y0, self.x1, self.y1)
    }

    fn bounds(&self) -> BoundingBox {
        BoundingBox::from_corners(self.x0, self.y0, self.x1, self.y1)
    }

    fn to_path(&self) -> BezPath {
        self.as_kurbo().to_path(0.1)
    }

    fn color(&self) -> &str {
        &self.color
    }

    fn set_color(&mut self, color: String) {
        self.color = if color.is_empty() {
            DEFAULT_COLOR.to_string()
        } else {
            color
        };
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.x0 = self.x0.saturating_add(dx);
        self.y0 = self.y0.saturating_add(dy);
        self.x1 = self.x1.saturating_add(dx);
        self.y1 = self.y1.saturating_add(dy);
    }
}
