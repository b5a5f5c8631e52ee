//! Bookkeeping between logical shapes and a host's rendered primitives.
//!
//! The document never stores renderer handles. A host keeps a [`RenderIds`]
//! next to its scene and feeds it every [`ChangeSet`] the canvas returns.

use crate::canvas::{ChangeSet, Document};
use crate::shapes::{Shape, ShapeId};
use std::collections::HashMap;

/// Map from shape ids to host render handles.
#[derive(Debug, Clone)]
pub struct RenderIds<H> {
    handles: HashMap<ShapeId, H>,
}

impl<H> Default for RenderIds<H> {
    fn default() -> Self {
        Self {
            handles: HashMap::new(),
        }
    }
}

impl<H> RenderIds<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the handle for a shape, returning any handle it replaces.
    pub fn bind(&mut self, id: ShapeId, handle: H) -> Option<H> {
        self.handles.insert(id, handle)
    }

    pub fn get(&self, id: ShapeId) -> Option<&H> {
        self.handles.get(&id)
    }

    pub fn unbind(&mut self, id: ShapeId) -> Option<H> {
        self.handles.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn clear(&mut self) {
        self.handles.clear();
    }

    /// Sync with a change set: destroy handles of removed shapes and create
    /// handles for added ones. Updated shapes keep their handle; the host
    /// redraws them via [`RenderIds::get`].
    ///
    /// Removals run first, so a change set from loading a new document frees
    /// the old scene before building the new one.
    pub fn apply<C, D>(&mut self, changes: &ChangeSet, document: &Document, mut create: C, mut destroy: D)
    where
        C: FnMut(&Shape) -> H,
        D: FnMut(H),
    {
        for id in &changes.removed {
            if let Some(handle) = self.handles.remove(id) {
                destroy(handle);
            }
        }
        for id in &changes.added {
            let Some(shape) = document.shape(*id) else {
                log::warn!("Change set names unknown shape {id}");
                continue;
            };
            if let Some(old) = self.handles.insert(*id, create(shape)) {
                destroy(old);
            }
        }
    }
}

impl<H: PartialEq> RenderIds<H> {
    /// Reverse lookup, for hosts that hit-test in their own scene.
    pub fn shape_for(&self, handle: &H) -> Option<ShapeId> {
        self.handles
            .iter()
            .find(|(_, h)| *h == handle)
            .map(|(id, _)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::shapes::ShapeKind;
    use crate::tools::ToolKind;

    #[test]
    fn test_bind_and_lookup() {
        let mut ids = RenderIds::new();
        let shape = uuid::Uuid::new_v4();
        assert!(ids.bind(shape, 7u32).is_none());
        assert_eq!(ids.get(shape), Some(&7));
        assert_eq!(ids.shape_for(&7), Some(shape));
        assert_eq!(ids.bind(shape, 9), Some(7));
        assert_eq!(ids.unbind(shape), Some(9));
        assert!(ids.is_empty());
    }

    #[test]
    fn test_apply_tracks_canvas_changes() {
        let mut canvas = Canvas::new();
        let mut ids: RenderIds<usize> = RenderIds::new();
        let mut next = 0;
        let mut destroyed = Vec::new();

        canvas.set_tool(ToolKind::Line);
        canvas.pointer_down(0, 0);
        let changes = canvas.pointer_up(10, 10);
        ids.apply(&changes, canvas.document(), |_| { next += 1; next }, |h| destroyed.push(h));
        assert_eq!(ids.len(), 1);

        canvas.set_tool(ToolKind::Select);
        canvas.pointer_down(-1, -1);
        canvas.pointer_up(1, 1);
        let changes = canvas.delete_selected();
        ids.apply(&changes, canvas.document(), |_| { next += 1; next }, |h| destroyed.push(h));
        assert!(ids.is_empty());
        assert_eq!(destroyed, vec![1]);
    }

    #[test]
    fn test_apply_on_document_replace() {
        let mut canvas = Canvas::new();
        let first = canvas.add_shape(ShapeKind::Line, 0, 0, 1, 1, "black");
        let mut ids: RenderIds<ShapeId> = RenderIds::new();
        ids.bind(first, first);

        let changes = canvas.new_document();
        let mut destroyed = Vec::new();
        ids.apply(&changes, canvas.document(), |s| s.id(), |h| destroyed.push(h));
        assert_eq!(destroyed, vec![first]);
        assert!(ids.is_empty());
    }
}
