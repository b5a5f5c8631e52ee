//! Rectangle shape.

use super::{CornerStyle, DEFAULT_COLOR, ShapeId, ShapeKind, ShapeTrait};
use crate::geometry::BoundingBox;
use kurbo::{BezPath, Rect, RoundedRect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A rectangle given by two opposite corners, with square or rounded corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// First corner x, as drawn.
    pub x0: i32,
    /// First corner y, as drawn.
    pub y0: i32,
    /// Opposite corner x, as drawn.
    pub x1: i32,
    /// Opposite corner y, as drawn.
    pub y1: i32,
    /// Stroke color (named or hex).
    pub color: String,
    /// Corner style.
    #[serde(default)]
    pub corner_style: CornerStyle,
}

impl Rectangle {
    /// Corner radius used when drawing rounded rectangles.
    pub const ROUNDED_CORNER_RADIUS: f64 = 10.0;

    /// Tolerance used when flattening rounded corners.
    const PATH_TOLERANCE: f64 = 0.1;

    /// Create a new black rectangle with square corners.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            x0,
            y0,
            x1,
            y1,
            color: DEFAULT_COLOR.to_string(),
            corner_style: CornerStyle::Square,
        }
    }

    /// Replace the color; an empty color falls back to the default.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.set_color(color.into());
        self
    }

    pub fn with_corner_style(mut self, corner_style: CornerStyle) -> Self {
        self.corner_style = corner_style;
        self
    }

    /// Get the rectangle as a normalized kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            f64::from(self.x0),
            f64::from(self.y0),
            f64::from(self.x1),
            f64::from(self.y1),
        )
        .abs()
    }

    /// Radius actually applied to rounded corners, clamped for small rectangles.
    pub fn corner_radius(&self) -> f64 {
        match self.corner_style {
            CornerStyle::Square => 0.0,
            CornerStyle::Rounded => {
                let rect = self.as_rect();
                Self::ROUNDED_CORNER_RADIUS
                    .min(rect.width() / 2.0)
                    .min(rect.height() / 2.0)
            }
        }
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Rectangle
    }

    fn coords(&self) -> (i32, i32, i32, i32) {
        (self.x0, self.y0, self.x1, self.y1)
    }

    fn bounds(&self) -> BoundingBox {
        match self.corner_style {
            CornerStyle::Square => BoundingBox::from_corners(self.x0, self.y0, self.x1, self.y1),
            // Rounded corners are rendered as a flattened outline; select on
            // the box of that outline.
            CornerStyle::Rounded => BoundingBox::enclosing(self.to_path().bounding_box()),
        }
    }

    fn to_path(&self) -> BezPath {
        let radius = self.corner_radius();
        if radius > 0.0 {
            RoundedRect::from_rect(self.as_rect(), radius).to_path(Self::PATH_TOLERANCE)
        } else {
            self.as_rect().to_path(Self::PATH_TOLERANCE)
        }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_creation() {
        let rect = Rectangle::new(10, 20, 110, 70);
        assert_eq!(rect.coords(), (10, 20, 110, 70));
        assert_eq!(rect.corner_style, CornerStyle::Square);
        assert_eq!(rect.color, "black");
    }

    #[test]
    fn test_as_rect_normalizes() {
        let rect = Rectangle::new(100, 100, 50, 50);
        let r = rect.as_rect();
        assert!((r.x0 - 50.0).abs() < f64::EPSILON);
        assert!((r.y0 - 50.0).abs() < f64::EPSILON);
        assert!((r.width() - 50.0).abs() < f64::EPSILON);
        assert!((r.height() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounds() {
        let rect = Rectangle::new(110, 70, 10, 20);
        assert_eq!(rect.bounds(), BoundingBox::from_corners(10, 20, 110, 70));
    }

    #[test]
    fn test_rounded_bounds_stay_within_corners() {
        let rect = Rectangle::new(0, 0, 100, 60).with_corner_style(CornerStyle::Rounded);
        let bounds = rect.bounds();
        let square = BoundingBox::from_corners(0, 0, 100, 60);
        assert_eq!(bounds.union(&square), square);
        // The outline still reaches every edge midpoint.
        assert!(bounds.contains(50, 0));
        assert!(bounds.contains(100, 30));
    }

    #[test]
    fn test_corner_radius_clamped() {
        let small = Rectangle::new(0, 0, 6, 40).with_corner_style(CornerStyle::Rounded);
        assert!((small.corner_radius() - 3.0).abs() < f64::EPSILON);

        let square = Rectangle::new(0, 0, 100, 100);
        assert_eq!(square.corner_radius(), 0.0);
    }
}
