//! Ordered, immutable catalog of focusable items built from the path layout.

use ahash::AHashMap;
use rosary_bridge::ChimeCue;
use rosary_ids::{ItemID, NodeID};
use rosary_project::{Palette, PromptTable};
use rosary_scene::{BeadRole, LayoutColors, PathSlot, SlotKind};
use rosary_structs::Color;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    Single(NodeID),
    /// Parts highlight together; hits on any part resolve to the item.
    Group { root: NodeID, parts: Vec<NodeID> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FocusableItem {
    pub id: ItemID,
    pub kind: ItemKind,
    pub role: BeadRole,
    pub base_color: Color,
    pub highlight_color: Color,
    /// Never empty.
    pub prompts: Vec<String>,
    pub chime: ChimeCue,
}

impl FocusableItem {
    /// Renderable objects whose colour this item controls.
    pub fn scene_objects(&self) -> &[NodeID] {
        match &self.kind {
            ItemKind::Single(node) => std::slice::from_ref(node),
            ItemKind::Group { parts, .. } => parts,
        }
    }

    /// Node whose subtree bounds frame this item.
    pub fn bounds_node(&self) -> NodeID {
        match &self.kind {
            ItemKind::Single(node) => *node,
            ItemKind::Group { root, .. } => *root,
        }
    }
}

pub fn layout_colors(palette: &Palette) -> LayoutColors {
    LayoutColors {
        chain: palette.chain,
        small_bead: palette.small_bead,
        large_bead: palette.large_bead,
        cross: palette.cross,
        center: palette.center,
    }
}

pub fn chime_for(role: BeadRole) -> ChimeCue {
    match role {
        BeadRole::OurFather => ChimeCue::Single,
        BeadRole::HailHolyQueen => ChimeCue::Double,
        BeadRole::Cross | BeadRole::HailMary => ChimeCue::None,
    }
}

fn prompts_for(role: BeadRole, position: u32, prompts: &PromptTable) -> Vec<String> {
    if let Some(labels) = prompts.override_for(position).filter(|l| !l.is_empty()) {
        return labels.to_vec();
    }
    let labels = match role {
        BeadRole::Cross => &prompts.cross,
        BeadRole::OurFather => &prompts.our_father,
        BeadRole::HailMary => &prompts.hail_mary,
        BeadRole::HailHolyQueen => &prompts.hail_holy_queen,
    };
    if labels.is_empty() {
        vec![format!("{role:?}")]
    } else {
        labels.clone()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SequenceModel {
    items: Vec<FocusableItem>,
    owners: AHashMap<NodeID, ItemID>,
}

impl SequenceModel {
    /// One item per slot, in slot order. Slot 0 becomes item 0.
    pub fn build(slots: &[PathSlot], prompts: &PromptTable, palette: &Palette) -> Self {
        let colors = layout_colors(palette);
        let mut items = Vec::with_capacity(slots.len());
        let mut owners = AHashMap::with_capacity(slots.len() + 2);

        for (position, slot) in slots.iter().enumerate() {
            let Some(id) = ItemID::from_index(position) else {
                log::error!("path has more than u32::MAX slots; truncating at {position}");
                break;
            };
            let kind = match &slot.kind {
                SlotKind::Single(node) => {
                    owners.insert(*node, id);
                    ItemKind::Single(*node)
                }
                SlotKind::Group { root, parts } => {
                    owners.insert(*root, id);
                    for part in parts {
                        owners.insert(*part, id);
                    }
                    ItemKind::Group {
                        root: *root,
                        parts: parts.clone(),
                    }
                }
            };
            items.push(FocusableItem {
                id,
                kind,
                role: slot.role,
                base_color: colors.for_role(slot.role),
                highlight_color: palette.highlight,
                prompts: prompts_for(slot.role, id.0, prompts),
                chime: chime_for(slot.role),
            });
        }

        Self { items, owners }
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Panics when `id` is out of range; callers clamp first.
    pub fn item_at(&self, id: ItemID) -> &FocusableItem {
        &self.items[id.index()]
    }

    pub fn get(&self, id: ItemID) -> Option<&FocusableItem> {
        self.items.get(id.index())
    }

    pub fn index_of_scene_object(&self, node: NodeID) -> Option<ItemID> {
        self.owners.get(&node).copied()
    }

    pub fn items(&self) -> &[FocusableItem] {
        &self.items
    }

    pub fn last(&self) -> Option<ItemID> {
        self.items.last().map(|item| item.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosary_scene::{Scene, build_rosary};

    fn rosary() -> (Scene, SequenceModel) {
        let palette = Palette::default();
        let mut scene = Scene::new();
        let slots = build_rosary(&mut scene, &layout_colors(&palette));
        let sequence = SequenceModel::build(&slots, &PromptTable::default(), &palette);
        (scene, sequence)
    }

    #[test]
    fn ids_match_positions() {
        let (_, sequence) = rosary();
        assert_eq!(sequence.item_count(), 61);
        for (position, item) in sequence.items().iter().enumerate() {
            assert_eq!(item.id.index(), position);
            assert!(!item.prompts.is_empty());
        }
    }

    #[test]
    fn cross_is_a_group_at_zero() {
        let (scene, sequence) = rosary();
        let cross = sequence.item_at(ItemID(0));
        assert_eq!(cross.role, BeadRole::Cross);
        let ItemKind::Group { root, parts } = &cross.kind else {
            panic!("cross must be a group");
        };
        assert_eq!(parts.len(), 2);
        assert_eq!(sequence.index_of_scene_object(*root), Some(ItemID(0)));
        for part in parts {
            assert_eq!(sequence.index_of_scene_object(*part), Some(ItemID(0)));
            assert_eq!(scene.parent_of(*part), Some(*root));
        }
        assert_eq!(cross.scene_objects(), parts.as_slice());
        assert_eq!(cross.prompts, vec!["Apostles Creed".to_string()]);
    }

    #[test]
    fn default_prompt_table_applies_overrides() {
        let (_, sequence) = rosary();
        assert_eq!(
            sequence.item_at(ItemID(4)).prompts,
            vec!["Hail Mary".to_string(), "Glory Be".to_string()]
        );
        for id in [15, 26, 37, 48, 59] {
            assert_eq!(sequence.item_at(ItemID(id)).prompts.len(), 3, "item {id}");
        }
        assert_eq!(sequence.item_at(ItemID(16)).prompts, vec!["Our Father".to_string()]);
        assert_eq!(sequence.item_at(ItemID(7)).prompts, vec!["Hail Mary".to_string()]);
    }

    #[test]
    fn chimes_follow_roles() {
        let (_, sequence) = rosary();
        assert_eq!(sequence.item_at(ItemID(1)).chime, ChimeCue::Single);
        assert_eq!(sequence.item_at(ItemID(2)).chime, ChimeCue::None);
        assert_eq!(sequence.item_at(ItemID(60)).chime, ChimeCue::Double);
        assert_eq!(sequence.item_at(ItemID(0)).chime, ChimeCue::None);
    }

    #[test]
    fn chain_nodes_have_no_owner() {
        let (scene, sequence) = rosary();
        let chain = scene
            .iter()
            .find(|(_, node)| node.name == "chain")
            .map(|(id, _)| id)
            .unwrap();
        assert_eq!(sequence.index_of_scene_object(chain), None);
    }

    #[test]
    #[should_panic]
    fn item_at_out_of_range_panics() {
        let (_, sequence) = rosary();
        let _ = sequence.item_at(ItemID(61));
    }

    #[test]
    fn get_out_of_range_is_none() {
        let (_, sequence) = rosary();
        assert!(sequence.get(ItemID(61)).is_none());
        assert_eq!(sequence.last(), Some(ItemID(60)));
    }
}
