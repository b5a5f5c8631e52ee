//! Shape definitions for the drawing.

mod group;
mod line;
mod rectangle;

pub use group::{Group, GroupId};
pub use line::Line;
pub use rectangle::Rectangle;

use crate::geometry::BoundingBox;
use kurbo::BezPath;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Color given to shapes drawn without an explicit one.
pub const DEFAULT_COLOR: &str = "black";

/// The kind tag of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Line,
    Rectangle,
}

impl ShapeKind {
    /// Lowercase name used by both file formats.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Line => "line",
            ShapeKind::Rectangle => "rectangle",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line" => Ok(ShapeKind::Line),
            "rectangle" => Ok(ShapeKind::Rectangle),
            other => Err(format!("unknown shape kind {other:?}")),
        }
    }
}

/// Corner style for rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CornerStyle {
    #[default]
    Square,
    Rounded,
}

impl CornerStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            CornerStyle::Square => "square",
            CornerStyle::Rounded => "rounded",
        }
    }
}

impl fmt::Display for CornerStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CornerStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "square" => Ok(CornerStyle::Square),
            "rounded" => Ok(CornerStyle::Rounded),
            other => Err(format!("unknown corner style {other:?}")),
        }
    }
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Get the kind tag.
    fn kind(&self) -> ShapeKind;

    /// Coordinates as drawn: `(x0, y0, x1, y1)`, not normalized.
    fn coords(&self) -> (i32, i32, i32, i32);

    /// Axis-aligned bounding box used for selection.
    fn bounds(&self) -> BoundingBox;

    /// Get the path representation for rendering.
    fn to_path(&self) -> BezPath;

    /// Stroke color.
    fn color(&self) -> &str;

    fn set_color(&mut self, color: String);

    /// Translate all coordinates by `(dx, dy)`.
    fn translate(&mut self, dx: i32, dy: i32);
}

/// Enum wrapper for all shape types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Line(Line),
    Rectangle(Rectangle),
}

impl Shape {
    /// Build a shape of the given kind. Rectangles get square corners.
    pub fn new(kind: ShapeKind, x0: i32, y0: i32, x1: i32, y1: i32, color: impl Into<String>) -> Self {
        match kind {
            ShapeKind::Line => Shape::Line(Line::new(x0, y0, x1, y1).with_color(color)),
            ShapeKind::Rectangle => {
                Shape::Rectangle(Rectangle::new(x0, y0, x1, y1).with_color(color))
            }
        }
    }

    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Line(s) => s.id(),
            Shape::Rectangle(s) => s.id(),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Line(s) => s.kind(),
            Shape::Rectangle(s) => s.kind(),
        }
    }

    pub fn coords(&self) -> (i32, i32, i32, i32) {
        match self {
            Shape::Line(s) => s.coords(),
            Shape::Rectangle(s) => s.coords(),
        }
    }

    pub fn bounds(&self) -> BoundingBox {
        match self {
            Shape::Line(s) => s.bounds(),
            Shape::Rectangle(s) => s.bounds(),
        }
    }

    pub fn to_path(&self) -> BezPath {
        match self {
            Shape::Line(s) => s.to_path(),
            Shape::Rectangle(s) => s.to_path(),
        }
    }

    pub fn color(&self) -> &str {
        match self {
            Shape::Line(s) => s.color(),
            Shape::Rectangle(s) => s.color(),
        }
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        let color = color.into();
        match self {
            Shape::Line(s) => s.set_color(color),
            Shape::Rectangle(s) => s.set_color(color),
        }
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        match self {
            Shape::Line(s) => s.translate(dx, dy),
            Shape::Rectangle(s) => s.translate(dx, dy),
        }
    }

    /// Corner style, present only on rectangles.
    pub fn corner_style(&self) -> Option<CornerStyle> {
        match self {
            Shape::Rectangle(r) => Some(r.corner_style),
            Shape::Line(_) => None,
        }
    }

    /// Set the corner style. Returns false (and does nothing) for lines.
    pub fn set_corner_style(&mut self, style: CornerStyle) -> bool {
        match self {
            Shape::Rectangle(r) => {
                r.corner_style = style;
                true
            }
            Shape::Line(_) => false,
        }
    }

    /// Test if this shape's bounding box overlaps a query box.
    pub fn intersects_box(&self, query: &BoundingBox) -> bool {
        self.bounds().overlaps(query)
    }

    /// Regenerate the shape's ID with a new unique identifier.
    pub fn regenerate_id(&mut self) {
        let new_id = Uuid::new_v4();
        match self {
            Shape::Line(s) => s.id = new_id,
            Shape::Rectangle(s) => s.id = new_id,
        }
    }

    /// Compare everything except the id.
    pub fn same_content(&self, other: &Shape) -> bool {
        self.kind() == other.kind()
            && self.coords() == other.coords()
            && self.color() == other.color()
            && self.corner_style() == other.corner_style()
    }
}
