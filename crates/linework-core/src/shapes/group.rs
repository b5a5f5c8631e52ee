//! Groups: the unit of selection, move and deletion.

use super::{Shape, ShapeId};
use crate::geometry::BoundingBox;
use serde::Serialize;
use uuid::Uuid;

/// Unique identifier for groups.
pub type GroupId = Uuid;

/// An ordered, non-empty run of shapes manipulated as a single unit.
///
/// A group of one shape is how an ungrouped shape is represented.
/// Only serialized (for debug dumps); groups are built through [`Group::new`]
/// so the non-empty invariant holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub(crate) id: GroupId,
    shapes: Vec<Shape>,
}

impl Group {
    /// Create a new group from a list of shapes. Returns `None` if the list is empty.
    pub fn new(shapes: Vec<Shape>) -> Option<Self> {
        if shapes.is_empty() {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            shapes,
        })
    }

    /// Wrap a single shape.
    pub fn singleton(shape: Shape) -> Self {
        Self {
            id: Uuid::new_v4(),
            shapes: vec![shape],
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Member shapes, in order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Mutable access to members. The slice cannot change length, so the
    /// group stays non-empty.
    pub(crate) fn shapes_mut(&mut self) -> &mut [Shape] {
        &mut self.shapes
    }

    /// Number of shapes in this group (always at least 1).
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Groups are never empty; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// True for a group that stands for one ungrouped shape.
    pub fn is_singleton(&self) -> bool {
        self.shapes.len() == 1
    }

    /// Dissolve this group and return its shapes.
    pub fn into_shapes(self) -> Vec<Shape> {
        self.shapes
    }

    /// Get all shape IDs in this group, in order.
    pub fn shape_ids(&self) -> Vec<ShapeId> {
        self.shapes.iter().map(Shape::id).collect()
    }

    pub fn contains_shape(&self, id: ShapeId) -> bool {
        self.shapes.iter().any(|s| s.id() == id)
    }

    /// Find a shape by ID within this group.
    pub fn find_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    /// Union of member bounds.
    pub fn bounds(&self) -> BoundingBox {
        let mut bounds = self.shapes[0].bounds();
        for shape in &self.shapes[1..] {
            bounds = bounds.union(&shape.bounds());
        }
        bounds
    }

    /// A group intersects a query box if any member does.
    pub fn intersects_box(&self, query: &BoundingBox) -> bool {
        self.shapes.iter().any(|s| s.intersects_box(query))
    }

    /// Translate every member.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        for shape in &mut self.shapes {
            shape.translate(dx, dy);
        }
    }
}
