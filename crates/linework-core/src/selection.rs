//! Rectangle selection and highlight state.

use crate::canvas::Document;
use crate::config::{EditorConfig, Stroke};
use crate::geometry::BoundingBox;
use crate::shapes::{GroupId, Shape};

/// The groups currently marked selected, in the order they were selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    groups: Vec<GroupId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection wholesale. Duplicates are dropped.
    pub fn replace(&mut self, groups: impl IntoIterator<Item = GroupId>) {
        self.groups.clear();
        for id in groups {
            self.insert(id);
        }
    }

    /// Add a group if not already selected.
    pub fn insert(&mut self, id: GroupId) {
        if !self.groups.contains(&id) {
            self.groups.push(id);
        }
    }

    /// Clear the selection, returning what was selected.
    pub fn take(&mut self) -> Vec<GroupId> {
        std::mem::take(&mut self.groups)
    }

    pub fn clear(&mut self) {
        self.groups.clear();
    }

    pub fn contains(&self, id: GroupId) -> bool {
        self.groups.contains(&id)
    }

    pub fn groups(&self) -> &[GroupId] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Find every group with at least one shape whose bounding box overlaps the
/// query rectangle. Corners may be given in any order; touching edges count.
/// Results follow document order.
pub fn select_in_rect(document: &Document, x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<GroupId> {
    let query = BoundingBox::from_corners(x0, y0, x1, y1);
    document
        .groups()
        .iter()
        .filter(|group| group.intersects_box(&query))
        .map(|group| group.id())
        .collect()
}

/// Stroke a shape should be drawn with, given whether its group is selected.
pub fn stroke_for(shape: &Shape, selected: bool, config: &EditorConfig) -> Stroke {
    if selected {
        config.highlight.clone()
    } else {
        Stroke::new(shape.color(), config.normal_width)
    }
}
