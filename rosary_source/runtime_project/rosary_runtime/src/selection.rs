use crate::{FocusableItem, SequenceModel};
use ahash::AHashSet;
use rosary_ids::{ItemID, NodeID};
use rosary_scene::Scene;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    Idle,
    /// A camera transition is in flight.
    Transitioning,
}

/// What is focused right now. Only the runtime controller writes it.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    current: ItemID,
    highlighted: AHashSet<NodeID>,
    zoom: u32,
}

impl SelectionState {
    pub fn new(zoom: u32) -> Self {
        Self {
            current: ItemID(0),
            highlighted: AHashSet::default(),
            zoom,
        }
    }

    pub fn current(&self) -> ItemID {
        self.current
    }

    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    pub fn highlighted(&self) -> &AHashSet<NodeID> {
        &self.highlighted
    }

    pub fn is_highlighted(&self, node: NodeID) -> bool {
        self.highlighted.contains(&node)
    }

    /// Restores base colours on every highlighted object and empties the set.
    pub(crate) fn clear_highlight(&mut self, scene: &mut Scene, sequence: &SequenceModel) {
        for node in self.highlighted.drain() {
            let base = sequence
                .index_of_scene_object(node)
                .and_then(|id| sequence.get(id))
                .map(|item| item.base_color);
            if let Some(color) = base {
                scene.set_color(node, color);
            }
        }
    }

    /// Empties the set without touching the scene (its nodes are already gone).
    pub(crate) fn forget_highlight(&mut self) {
        self.highlighted.clear();
    }

    pub(crate) fn focus(&mut self, scene: &mut Scene, item: &FocusableItem) {
        self.current = item.id;
        for &node in item.scene_objects() {
            scene.set_color(node, item.highlight_color);
            self.highlighted.insert(node);
        }
    }

    pub(crate) fn set_zoom(&mut self, zoom: u32) {
        self.zoom = zoom;
    }
}

/// `min(current + 1, len - 1)`.
pub fn next_index(current: ItemID, len: usize) -> usize {
    (current.index() + 1).min(len.saturating_sub(1))
}

/// `max(current - 1, 0)`.
pub fn previous_index(current: ItemID) -> usize {
    current.index().saturating_sub(1)
}
