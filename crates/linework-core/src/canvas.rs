//! Canvas document and editor state management.

use crate::config::{EditorConfig, Stroke};
use crate::geometry::BoundingBox;
use crate::selection::{self, Selection};
use crate::shapes::{CornerStyle, Group, GroupId, Shape, ShapeId, ShapeKind};
use crate::storage::{self, StorageResult};
use crate::tools::{ToolKind, ToolManager, ToolOutcome};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

/// Errors from editing operations. These are user-recoverable warnings:
/// the document is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("Group not found: {0}")]
    UnknownGroup(GroupId),
}

/// Shape ids touched by an operation, for the host to re-sync its rendered
/// primitives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Shapes that need a new primitive.
    pub added: Vec<ShapeId>,
    /// Shapes whose primitive must be destroyed.
    pub removed: Vec<ShapeId>,
    /// Shapes whose geometry or stroke changed.
    pub updated: Vec<ShapeId>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }

    /// Record updated shapes, skipping ones already listed anywhere.
    pub fn mark_updated(&mut self, ids: impl IntoIterator<Item = ShapeId>) {
        for id in ids {
            if !self.updated.contains(&id) && !self.added.contains(&id) && !self.removed.contains(&id) {
                self.updated.push(id);
            }
        }
    }

    /// Fold another change set into this one.
    pub fn merge(&mut self, other: ChangeSet) {
        for id in other.removed {
            self.added.retain(|&a| a != id);
            self.updated.retain(|&u| u != id);
            if !self.removed.contains(&id) {
                self.removed.push(id);
            }
        }
        for id in other.added {
            if !self.added.contains(&id) {
                self.added.push(id);
            }
        }
        self.mark_updated(other.updated);
    }
}

/// A drawing: an ordered sequence of groups of shapes.
///
/// Every shape belongs to exactly one group. Group order is creation/load
/// order and determines save and export order.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    /// Document name.
    pub name: String,
    groups: Vec<Group>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            name: "Untitled".to_string(),
            groups: Vec::new(),
        }
    }

    /// Build a document from already-formed groups.
    pub fn from_groups(groups: Vec<Group>) -> Self {
        Self {
            name: "Untitled".to_string(),
            groups,
        }
    }

    /// Create a shape wrapped in a new singleton group at the end.
    pub fn add_shape(
        &mut self,
        kind: ShapeKind,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: impl Into<String>,
    ) -> ShapeId {
        let shape = Shape::new(kind, x0, y0, x1, y1, color);
        let id = shape.id();
        self.push_shape(shape);
        id
    }

    /// Append a pre-built shape as a new singleton group.
    pub fn push_shape(&mut self, shape: Shape) -> GroupId {
        self.push_group(Group::singleton(shape))
    }

    /// Append a group at the end.
    pub fn push_group(&mut self, group: Group) -> GroupId {
        let id = group.id();
        log::debug!("Adding group {} with {} shape(s)", id, group.len());
        self.groups.push(group);
        id
    }

    /// Remove every listed group and its shapes. Unknown ids are ignored.
    /// Returns the ids of the removed shapes.
    pub fn delete_groups(&mut self, ids: &[GroupId]) -> Vec<ShapeId> {
        let mut removed = Vec::new();
        self.groups.retain(|group| {
            if ids.contains(&group.id()) {
                removed.extend(group.shape_ids());
                false
            } else {
                true
            }
        });
        if !removed.is_empty() {
            log::debug!("Deleted {} shape(s)", removed.len());
        }
        removed
    }

    /// Translate every shape of the listed groups. Unknown ids are ignored,
    /// and a group listed twice moves once. Coordinates clamp at the `i32`
    /// range. Returns the moved shape ids.
    pub fn move_groups(&mut self, ids: &[GroupId], dx: i32, dy: i32) -> Vec<ShapeId> {
        let mut moved = Vec::new();
        for group in self.groups.iter_mut().filter(|g| ids.contains(&g.id())) {
            group.translate(dx, dy);
            moved.extend(group.shape_ids());
        }
        moved
    }

    /// Merge the listed groups, in the given order, into one new group
    /// appended at the end. At least two distinct existing groups are needed.
    pub fn group_together(&mut self, ids: &[GroupId]) -> Result<GroupId, EditError> {
        let mut members: Vec<GroupId> = Vec::with_capacity(ids.len());
        for &id in ids {
            if self.contains_group(id) && !members.contains(&id) {
                members.push(id);
            }
        }
        if members.len() < 2 {
            return Err(EditError::InvalidOperation(
                "select at least two items to group".to_string(),
            ));
        }

        let mut shapes = Vec::new();
        for id in &members {
            if let Some(pos) = self.position(*id) {
                shapes.extend(self.groups.remove(pos).into_shapes());
            }
        }

        let group = Group::new(shapes).ok_or_else(|| {
            EditError::InvalidOperation("cannot create an empty group".to_string())
        })?;
        log::debug!("Grouped {} groups into {}", members.len(), group.id());
        Ok(self.push_group(group))
    }

    /// Split a group into singleton groups appended at the end, preserving
    /// shape order. Returns the new group ids.
    pub fn ungroup(&mut self, id: GroupId) -> Result<Vec<GroupId>, EditError> {
        let pos = self.position(id).ok_or(EditError::UnknownGroup(id))?;
        let group = self.groups.remove(pos);
        let new_ids = group
            .into_shapes()
            .into_iter()
            .map(|shape| self.push_group(Group::singleton(shape)))
            .collect::<Vec<_>>();
        log::debug!("Ungrouped {} into {} group(s)", id, new_ids.len());
        Ok(new_ids)
    }

    /// Set the color of every shape in the listed groups.
    pub fn recolor_groups(&mut self, ids: &[GroupId], color: &str) -> Vec<ShapeId> {
        let mut changed = Vec::new();
        for group in self.groups.iter_mut().filter(|g| ids.contains(&g.id())) {
            for shape in group.shapes_mut() {
                shape.set_color(color);
                changed.push(shape.id());
            }
        }
        changed
    }

    /// Set the corner style of every rectangle in the listed groups.
    /// Lines are left untouched and not reported.
    pub fn set_corner_style(&mut self, ids: &[GroupId], style: CornerStyle) -> Vec<ShapeId> {
        let mut changed = Vec::new();
        for group in self.groups.iter_mut().filter(|g| ids.contains(&g.id())) {
            for shape in group.shapes_mut() {
                if shape.set_corner_style(style) {
                    changed.push(shape.id());
                }
            }
        }
        changed
    }

    /// Groups in document order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id() == id)
    }

    pub fn contains_group(&self, id: GroupId) -> bool {
        self.position(id).is_some()
    }

    /// The group a shape belongs to.
    pub fn group_of(&self, shape_id: ShapeId) -> Option<GroupId> {
        self.groups
            .iter()
            .find(|g| g.contains_shape(shape_id))
            .map(Group::id)
    }

    /// Get a shape by ID.
    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.groups.iter().find_map(|g| g.find_shape(id))
    }

    /// All shapes in document order.
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.groups.iter().flat_map(|g| g.shapes().iter())
    }

    /// All shape ids in document order.
    pub fn shape_ids(&self) -> Vec<ShapeId> {
        self.shapes().map(Shape::id).collect()
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn shape_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Remove all groups.
    pub fn clear(&mut self) {
        self.groups.clear();
    }

    /// Get the bounding box of all shapes.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.groups
            .iter()
            .map(Group::bounds)
            .reduce(|acc, b| acc.union(&b))
    }

    /// Serialize the document to JSON (for debugging and tooling).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    fn position(&self, id: GroupId) -> Option<usize> {
        self.groups.iter().position(|g| g.id() == id)
    }
}

/// Editor context: the document, its selection, the active tool and the
/// visual policy. The host shell routes every operation through this.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    document: Document,
    selection: Selection,
    /// Tool manager.
    pub tool_manager: ToolManager,
    config: EditorConfig,
}

impl Canvas {
    /// Create a new canvas with an empty document.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Create a canvas using the given configuration for new shapes and strokes.
    pub fn with_config(config: EditorConfig) -> Self {
        let mut tool_manager = ToolManager::new();
        tool_manager.current_color = config.default_color.clone();
        tool_manager.corner_style = config.default_corner_style;
        Self {
            document: Document::new(),
            selection: Selection::new(),
            tool_manager,
            config,
        }
    }

    /// Create a canvas with an existing document.
    pub fn with_document(document: Document) -> Self {
        let mut canvas = Self::new();
        canvas.document = document;
        canvas
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn tool(&self) -> ToolKind {
        self.tool_manager.current_tool
    }

    /// Switch mode, cancelling any gesture. Entering a drawing mode clears the
    /// selection; select and move share it so a selection can be dragged.
    pub fn set_tool(&mut self, tool: ToolKind) -> ChangeSet {
        self.tool_manager.set_tool(tool);
        if tool.is_drawing() {
            self.clear_selection()
        } else {
            ChangeSet::new()
        }
    }

    /// Color used for the next drawn shape.
    pub fn set_current_color(&mut self, color: impl Into<String>) {
        self.tool_manager.current_color = color.into();
    }

    /// Corner style used for the next drawn rectangle.
    pub fn set_current_corner_style(&mut self, style: CornerStyle) {
        self.tool_manager.corner_style = style;
    }

    /// Pointer pressed. A new selection gesture first clears the old highlight.
    pub fn pointer_down(&mut self, x: i32, y: i32) -> ChangeSet {
        let changes = if self.tool() == ToolKind::Select {
            self.clear_selection()
        } else {
            ChangeSet::new()
        };
        self.tool_manager.begin((x, y));
        changes
    }

    /// Pointer dragged. In move mode the selection follows the pointer.
    pub fn pointer_drag(&mut self, x: i32, y: i32) -> ChangeSet {
        let mut changes = ChangeSet::new();
        if let Some((dx, dy)) = self.tool_manager.update((x, y)) {
            changes.mark_updated(self.translate_selection(dx, dy));
        }
        changes
    }

    /// Pointer released: completes the active gesture.
    pub fn pointer_up(&mut self, x: i32, y: i32) -> ChangeSet {
        match self.tool_manager.end((x, y)) {
            ToolOutcome::None => ChangeSet::new(),
            ToolOutcome::Shape(shape) => {
                let mut changes = ChangeSet::new();
                changes.added.push(shape.id());
                self.document.push_shape(shape);
                changes
            }
            ToolOutcome::Region(region) => {
                self.select_in_rect(region.min_x, region.min_y, region.max_x, region.max_y)
            }
            ToolOutcome::MoveFinished { dx, dy } => {
                let mut changes = ChangeSet::new();
                changes.mark_updated(self.translate_selection(dx, dy));
                changes.merge(self.clear_selection());
                changes
            }
        }
    }

    /// Create a shape directly, bypassing the draw gesture.
    pub fn add_shape(
        &mut self,
        kind: ShapeKind,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: impl Into<String>,
    ) -> ShapeId {
        self.document.add_shape(kind, x0, y0, x1, y1, color)
    }

    /// Replace the selection with every group overlapping the rectangle.
    /// Reports both the de-highlighted and newly highlighted shapes.
    pub fn select_in_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> ChangeSet {
        let mut changes = self.clear_selection();
        let hits = selection::select_in_rect(&self.document, x0, y0, x1, y1);
        log::debug!("Selected {} group(s)", hits.len());
        changes.mark_updated(self.shapes_of(&hits));
        self.selection.replace(hits);
        changes
    }

    /// Deselect everything.
    pub fn clear_selection(&mut self) -> ChangeSet {
        let previous = self.selection.take();
        let mut changes = ChangeSet::new();
        changes.mark_updated(self.shapes_of(&previous));
        changes
    }

    pub fn is_group_selected(&self, id: GroupId) -> bool {
        self.selection.contains(id)
    }

    pub fn is_shape_selected(&self, id: ShapeId) -> bool {
        self.document
            .group_of(id)
            .is_some_and(|group| self.selection.contains(group))
    }

    /// Stroke the host should use for a shape right now.
    pub fn stroke_for(&self, id: ShapeId) -> Option<Stroke> {
        let shape = self.document.shape(id)?;
        Some(selection::stroke_for(shape, self.is_shape_selected(id), &self.config))
    }

    /// Delete the selected groups.
    pub fn delete_selected(&mut self) -> ChangeSet {
        let selected = self.selection.take();
        ChangeSet {
            removed: self.document.delete_groups(&selected),
            ..ChangeSet::default()
        }
    }

    /// Translate the selection as one completed move, then deselect.
    pub fn move_selected(&mut self, dx: i32, dy: i32) -> ChangeSet {
        let mut changes = ChangeSet::new();
        changes.mark_updated(self.translate_selection(dx, dy));
        changes.merge(self.clear_selection());
        changes
    }

    /// Group the selected groups, in selection order.
    pub fn group_selected(&mut self) -> Result<(GroupId, ChangeSet), EditError> {
        let selected = self.selection.groups().to_vec();
        let group_id = self.document.group_together(&selected).inspect_err(|e| {
            log::warn!("Group rejected: {e}");
        })?;
        self.selection.clear();
        let mut changes = ChangeSet::new();
        changes.mark_updated(self.shapes_of(&[group_id]));
        Ok((group_id, changes))
    }

    /// Split every selected group into singletons.
    pub fn ungroup_selected(&mut self) -> Result<(Vec<GroupId>, ChangeSet), EditError> {
        self.require_selection("ungroup")?;
        let selected = self.selection.take();
        let mut new_groups = Vec::new();
        for id in selected {
            new_groups.extend(self.document.ungroup(id)?);
        }
        let mut changes = ChangeSet::new();
        changes.mark_updated(self.shapes_of(&new_groups));
        Ok((new_groups, changes))
    }

    /// Recolor every shape of the selected groups.
    pub fn recolor_selected(&mut self, color: &str) -> Result<ChangeSet, EditError> {
        self.require_selection("recolor")?;
        let mut changes = ChangeSet::new();
        changes.mark_updated(self.document.recolor_groups(self.selection.groups(), color));
        Ok(changes)
    }

    /// Restyle the corners of every selected rectangle.
    pub fn set_corner_style_selected(&mut self, style: CornerStyle) -> Result<ChangeSet, EditError> {
        self.require_selection("change corner style")?;
        let mut changes = ChangeSet::new();
        changes.mark_updated(self.document.set_corner_style(self.selection.groups(), style));
        Ok(changes)
    }

    /// Swap in another document wholesale.
    pub fn replace_document(&mut self, document: Document) -> ChangeSet {
        self.tool_manager.cancel();
        self.selection.clear();
        let old = std::mem::replace(&mut self.document, document);
        ChangeSet {
            added: self.document.shape_ids(),
            removed: old.shape_ids(),
            updated: Vec::new(),
        }
    }

    /// Start over with an empty document.
    pub fn new_document(&mut self) -> ChangeSet {
        self.replace_document(Document::new())
    }

    /// Load a drawing file. The current document is only replaced once the
    /// whole file has parsed.
    pub fn open(&mut self, path: &Path) -> StorageResult<ChangeSet> {
        let document = storage::load_drawing(path)?;
        Ok(self.replace_document(document))
    }

    /// Save the document in the native text format.
    pub fn save(&self, path: &Path) -> StorageResult<()> {
        storage::save_drawing(path, &self.document)
    }

    /// Export the document as XML.
    pub fn export(&self, path: &Path) -> StorageResult<()> {
        storage::export_xml(path, &self.document)
    }

    fn translate_selection(&mut self, dx: i32, dy: i32) -> Vec<ShapeId> {
        if dx == 0 && dy == 0 {
            return Vec::new();
        }
        self.document.move_groups(self.selection.groups(), dx, dy)
    }

    fn require_selection(&self, action: &str) -> Result<(), EditError> {
        if self.selection.is_empty() {
            let err = EditError::InvalidOperation(format!("nothing selected to {action}"));
            log::warn!("{err}");
            return Err(err);
        }
        Ok(())
    }

    fn shapes_of(&self, groups: &[GroupId]) -> Vec<ShapeId> {
        groups
            .iter()
            .filter_map(|&id| self.document.group(id))
            .flat_map(Group::shape_ids)
            .collect()
    }
}
