//! Pointer ray / direct index to item resolution.

use crate::{NavigationError, SequenceModel};
use rosary_ids::ItemID;
use rosary_scene::{GeometryClass, Scene, SceneNode};
use rosary_structs::Ray;

/// Path geometry (chain, loops) never selects anything.
pub fn is_selectable(class: GeometryClass) -> bool {
    match class {
        GeometryClass::Sphere | GeometryClass::Box => true,
        GeometryClass::Cylinder | GeometryClass::Tube => false,
    }
}

pub struct HitResolver;

impl HitResolver {
    /// Nearest hit only. A non-selectable nearest hit is a miss, not a fall-through.
    pub fn resolve_ray(scene: &Scene, sequence: &SequenceModel, ray: &Ray) -> Option<ItemID> {
        let hit = scene.raycast(ray)?;
        if !is_selectable(hit.class) {
            log::trace!("hit {:?} on non-selectable {:?}", hit.node, hit.class);
            return None;
        }
        let owner = match scene.parent_of(hit.node) {
            Some(parent) if scene.get(parent).is_some_and(SceneNode::is_group) => parent,
            _ => hit.node,
        };
        sequence.index_of_scene_object(owner)
    }

    pub fn resolve_index(sequence: &SequenceModel, index: usize) -> Result<ItemID, NavigationError> {
        let len = sequence.item_count();
        if index >= len {
            return Err(NavigationError::IndexOutOfRange { index, len });
        }
        ItemID::from_index(index).ok_or(NavigationError::IndexOutOfRange { index, len })
    }
}
