use crate::raycast::intersect_shape;
use crate::{GeometryClass, Material, MeshInstance3D, NodeArena, SceneNode, SceneNodeData, Shape};
use glam::{Mat4, Vec3};
use rosary_ids::NodeID;
use rosary_structs::{Aabb, Color, Ray, Transform3D, Vector3};
use std::borrow::Cow;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub node: NodeID,
    /// World-space distance along the ray.
    pub distance: f32,
    pub point: Vector3,
    pub class: GeometryClass,
}

/// Node hierarchy of one assembled scene.
#[derive(Default)]
pub struct Scene {
    nodes: NodeArena,
    roots: Vec<NodeID>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `node` under `parent` (nil = root).
    pub fn add_node(&mut self, parent: NodeID, mut node: SceneNode) -> NodeID {
        let parent = if self.nodes.contains(parent) {
            parent
        } else {
            NodeID::nil()
        };
        node.parent = parent;
        let id = self.nodes.insert(node);
        match self.nodes.get_mut(parent) {
            Some(parent_node) => parent_node.children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    pub fn add_group(
        &mut self,
        parent: NodeID,
        name: impl Into<Cow<'static, str>>,
        transform: Transform3D,
    ) -> NodeID {
        self.add_node(parent, SceneNode::new(name, transform, SceneNodeData::Group))
    }

    pub fn add_mesh(
        &mut self,
        parent: NodeID,
        name: impl Into<Cow<'static, str>>,
        transform: Transform3D,
        shape: Shape,
        color: Color,
    ) -> NodeID {
        let mesh = MeshInstance3D {
            shape,
            material: Material::new(color),
        };
        self.add_node(parent, SceneNode::new(name, transform, SceneNodeData::Mesh(mesh)))
    }

    /// Empty scene for a rebuild. IDs handed out by `self` never resolve in it.
    pub fn successor(&self) -> Self {
        Self {
            nodes: self.nodes.successor(),
            roots: Vec::new(),
        }
    }

    pub fn get(&self, id: NodeID) -> Option<&SceneNode> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeID) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id)
    }

    pub fn contains(&self, id: NodeID) -> bool {
        self.nodes.contains(id)
    }

    pub fn roots(&self) -> &[NodeID] {
        &self.roots
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeID, &SceneNode)> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent_of(&self, id: NodeID) -> Option<NodeID> {
        self.nodes
            .get(id)
            .map(|node| node.parent)
            .filter(|parent| !parent.is_nil())
    }

    pub fn geometry_class(&self, id: NodeID) -> Option<GeometryClass> {
        self.nodes.get(id)?.mesh().map(|mesh| mesh.shape.class())
    }

    pub fn color(&self, id: NodeID) -> Option<Color> {
        self.nodes.get(id)?.mesh().map(|mesh| mesh.material.color)
    }

    /// Returns false when `id` is stale or not a mesh.
    pub fn set_color(&mut self, id: NodeID, color: Color) -> bool {
        match self.nodes.get_mut(id).and_then(SceneNode::mesh_mut) {
            Some(mesh) => {
                mesh.material.color = color;
                true
            }
            None => false,
        }
    }

    pub fn world_matrix(&self, id: NodeID) -> Option<Mat4> {
        let mut node = self.nodes.get(id)?;
        let mut matrix = node.transform.to_mat4();
        while let Some(parent) = self.nodes.get(node.parent) {
            matrix = parent.transform.to_mat4() * matrix;
            node = parent;
        }
        Some(matrix)
    }

    pub fn world_position(&self, id: NodeID) -> Option<Vector3> {
        self.world_matrix(id)
            .map(|m| m.transform_point3(Vec3::ZERO).into())
    }

    /// World AABB of every mesh in the subtree rooted at `id`. Empty if there are none.
    pub fn world_bounds(&self, id: NodeID) -> Aabb {
        let Some(root_matrix) = self.world_matrix(id) else {
            return Aabb::EMPTY;
        };
        let mut bounds = Aabb::EMPTY;
        let mut stack = vec![(id, root_matrix)];
        while let Some((current, matrix)) = stack.pop() {
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            if let Some(mesh) = node.mesh() {
                bounds = bounds.union(mesh.shape.local_bounds().transformed(&matrix));
            }
            for &child in &node.children {
                if let Some(child_node) = self.nodes.get(child) {
                    stack.push((child, matrix * child_node.transform.to_mat4()));
                }
            }
        }
        bounds
    }

    fn is_visible(&self, node: &SceneNode) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if !n.visible {
                return false;
            }
            current = self.nodes.get(n.parent);
        }
        true
    }

    /// Nearest visible mesh hit. Equal distances keep the earlier node.
    pub fn raycast(&self, ray: &Ray) -> Option<RayHit> {
        let mut nearest: Option<RayHit> = None;
        for (id, node) in self.nodes.iter() {
            let Some(mesh) = node.mesh() else {
                continue;
            };
            if !self.is_visible(node) {
                continue;
            }
            let Some(distance) = self.intersect_node(id, &mesh.shape, ray) else {
                continue;
            };
            if nearest.is_none_or(|hit| distance < hit.distance) {
                nearest = Some(RayHit {
                    node: id,
                    distance,
                    point: ray.at(distance),
                    class: mesh.shape.class(),
                });
            }
        }
        nearest
    }

    fn intersect_node(&self, id: NodeID, shape: &Shape, ray: &Ray) -> Option<f32> {
        let inverse = self.world_matrix(id)?.inverse();
        if !inverse.is_finite() {
            return None;
        }
        let origin = inverse.transform_point3(ray.origin.into());
        let direction = inverse.transform_vector3(ray.direction.into());
        let scale = direction.length();
        if scale <= f32::EPSILON {
            return None;
        }
        let t = intersect_shape(shape, origin.into(), (direction / scale).into())?;
        Some(t / scale)
    }
}
