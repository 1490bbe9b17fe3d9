use rosary_ids::NodeID;
use rosary_structs::{Aabb, Color, Transform3D, Vector3};
use std::borrow::Cow;

/// Broad geometry family of a mesh, used by hit filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryClass {
    Sphere,
    Box,
    Cylinder,
    Tube,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Sphere { radius: f32 },
    /// Full edge lengths, centred on the origin.
    Box { size: Vector3 },
    /// Y-aligned, centred on the origin.
    Cylinder { radius: f32, height: f32 },
    /// Swept circle along a polyline.
    Tube { points: Vec<Vector3>, radius: f32 },
}

impl Shape {
    pub fn class(&self) -> GeometryClass {
        match self {
            Shape::Sphere { .. } => GeometryClass::Sphere,
            Shape::Box { .. } => GeometryClass::Box,
            Shape::Cylinder { .. } => GeometryClass::Cylinder,
            Shape::Tube { .. } => GeometryClass::Tube,
        }
    }

    pub fn local_bounds(&self) -> Aabb {
        match self {
            Shape::Sphere { radius } => {
                Aabb::from_center_half_extents(Vector3::ZERO, Vector3::splat(*radius))
            }
            Shape::Box { size } => Aabb::from_center_half_extents(Vector3::ZERO, *size * 0.5),
            Shape::Cylinder { radius, height } => Aabb::from_center_half_extents(
                Vector3::ZERO,
                Vector3::new(*radius, height * 0.5, *radius),
            ),
            Shape::Tube { points, radius } => {
                let core = Aabb::from_points(points.iter().copied());
                if core.is_empty() {
                    return core;
                }
                Aabb::new(
                    core.min - Vector3::splat(*radius),
                    core.max + Vector3::splat(*radius),
                )
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: Color,
    pub roughness: f32,
}

impl Material {
    pub const fn new(color: Color) -> Self {
        Self {
            color,
            roughness: 0.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MeshInstance3D {
    pub shape: Shape,
    pub material: Material,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SceneNodeData {
    /// Transform-only parent of other nodes.
    Group,
    Mesh(MeshInstance3D),
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    pub name: Cow<'static, str>,
    pub transform: Transform3D,
    pub visible: bool,
    pub parent: NodeID,
    pub children: Vec<NodeID>,
    pub data: SceneNodeData,
}

impl SceneNode {
    pub fn new(name: impl Into<Cow<'static, str>>, transform: Transform3D, data: SceneNodeData) -> Self {
        Self {
            name: name.into(),
            transform,
            visible: true,
            parent: NodeID::nil(),
            children: Vec::new(),
            data,
        }
    }

    pub fn mesh(&self) -> Option<&MeshInstance3D> {
        match &self.data {
            SceneNodeData::Mesh(mesh) => Some(mesh),
            SceneNodeData::Group => None,
        }
    }

    pub fn mesh_mut(&mut self) -> Option<&mut MeshInstance3D> {
        match &mut self.data {
            SceneNodeData::Mesh(mesh) => Some(mesh),
            SceneNodeData::Group => None,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.data, SceneNodeData::Group)
    }
}
