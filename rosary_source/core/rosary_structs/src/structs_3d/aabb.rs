use crate::Vector3;
use glam::{Mat4, Vec3};

/// World- or local-space axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vector3,
    pub max: Vector3,
}

impl Aabb {
    /// Contains nothing; the identity for [`Aabb::union`].
    pub const EMPTY: Self = Self {
        min: Vector3::splat(f32::INFINITY),
        max: Vector3::splat(f32::NEG_INFINITY),
    };

    pub const fn new(min: Vector3, max: Vector3) -> Self {
        Self { min, max }
    }

    pub fn from_center_half_extents(center: Vector3, half: Vector3) -> Self {
        Self::new(center - half, center + half)
    }

    pub fn from_points(points: impl IntoIterator<Item = Vector3>) -> Self {
        points
            .into_iter()
            .fold(Self::EMPTY, |acc, p| acc.including(p))
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn including(self, p: Vector3) -> Self {
        Self::new(self.min.min(p), self.max.max(p))
    }

    pub fn union(self, other: Self) -> Self {
        if other.is_empty() {
            return self;
        }
        if self.is_empty() {
            return other;
        }
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    pub fn center(&self) -> Vector3 {
        Vector3::lerp(self.min, self.max, 0.5)
    }

    pub fn size(&self) -> Vector3 {
        if self.is_empty() {
            return Vector3::ZERO;
        }
        self.max - self.min
    }

    /// Largest dimension; zero for empty boxes.
    pub fn largest_extent(&self) -> f32 {
        self.size().max_element()
    }

    pub fn corners(&self) -> [Vector3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vector3::new(a.x, a.y, a.z),
            Vector3::new(b.x, a.y, a.z),
            Vector3::new(a.x, b.y, a.z),
            Vector3::new(b.x, b.y, a.z),
            Vector3::new(a.x, a.y, b.z),
            Vector3::new(b.x, a.y, b.z),
            Vector3::new(a.x, b.y, b.z),
            Vector3::new(b.x, b.y, b.z),
        ]
    }

    /// Bounds of this box after `matrix`, re-aligned to the axes.
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        if self.is_empty() {
            return *self;
        }
        Self::from_points(
            self.corners()
                .into_iter()
                .map(|c| Vector3::from(matrix.transform_point3(Vec3::from(c)))),
        )
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}
