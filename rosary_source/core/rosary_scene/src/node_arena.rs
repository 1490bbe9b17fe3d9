use crate::SceneNode;
use rosary_ids::NodeID;

/// Generational slot storage for scene nodes. Index 0 is reserved as nil.
pub struct NodeArena {
    nodes: Vec<Option<SceneNode>>,
    generations: Vec<u32>,
    free_indices: Vec<usize>,
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeArena {
    pub fn new() -> Self {
        Self::with_capacity(1)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.saturating_add(1));
        let mut generations = Vec::with_capacity(capacity.saturating_add(1));
        nodes.push(None);
        generations.push(0);
        Self {
            nodes,
            generations,
            free_indices: Vec::new(),
        }
    }

    pub fn insert(&mut self, node: SceneNode) -> NodeID {
        if let Some(index) = self.free_indices.pop() {
            self.nodes[index] = Some(node);
            return NodeID::from_parts(index as u32, self.generations[index]);
        }

        let index = self.nodes.len();
        self.nodes.push(Some(node));
        self.generations.push(0);
        NodeID::from_parts(index as u32, 0)
    }

    fn slot(&self, id: NodeID) -> Option<usize> {
        let index = id.index() as usize;
        (index != 0 && index < self.nodes.len() && self.generations[index] == id.generation())
            .then_some(index)
    }

    /// `None` when the generation does not match.
    pub fn get(&self, id: NodeID) -> Option<&SceneNode> {
        self.slot(id).and_then(|index| self.nodes[index].as_ref())
    }

    pub fn get_mut(&mut self, id: NodeID) -> Option<&mut SceneNode> {
        self.slot(id).and_then(|index| self.nodes[index].as_mut())
    }

    pub fn contains(&self, id: NodeID) -> bool {
        self.get(id).is_some()
    }

    /// Live nodes in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeID, &SceneNode)> {
        self.nodes
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(index, node)| {
                node.as_ref()
                    .map(|n| (NodeID::from_parts(index as u32, self.generations[index]), n))
            })
    }

    /// Empty arena that continues this one's generations, so none of the IDs
    /// issued here resolve in it. Slots are reused from index 1 upward.
    pub fn successor(&self) -> Self {
        let generations: Vec<u32> = self
            .generations
            .iter()
            .enumerate()
            .map(|(index, generation)| {
                if index == 0 {
                    0
                } else {
                    generation.wrapping_add(1)
                }
            })
            .collect();
        let mut nodes = Vec::with_capacity(generations.len());
        nodes.resize_with(generations.len(), || None);
        Self {
            nodes,
            free_indices: (1..generations.len()).rev().collect(),
            generations,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.iter().all(|n| n.is_none())
    }
}
