use crate::Vector3;
use glam::{Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A quaternion representing rotation in 3D space. Serialized as `[x, y, z, w]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl std::fmt::Display for Quaternion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Quaternion({}, {}, {}, {})",
            self.x, self.y, self.z, self.w
        )
    }
}

impl Quaternion {
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    #[inline]
    pub fn to_quat(self) -> Quat {
        Quat::from_xyzw(self.x, self.y, self.z, self.w)
    }

    #[inline]
    pub fn from_quat(quat: Quat) -> Self {
        Self {
            x: quat.x,
            y: quat.y,
            z: quat.z,
            w: quat.w,
        }
    }

    /// Orientation of a camera at `eye` looking at `target` (camera looks down local -Z).
    ///
    /// Falls back to an alternate up axis when the view direction is parallel to `up`,
    /// and to identity when `eye == target`.
    pub fn looking_at(eye: Vector3, target: Vector3, up: Vector3) -> Self {
        let Some(forward) = Vec3::from(target - eye).try_normalize() else {
            return Self::IDENTITY;
        };
        let mut up = Vec3::from(up).try_normalize().unwrap_or(Vec3::Y);
        if forward.cross(up).length_squared() < 1.0e-10 {
            up = if forward.z.abs() < 0.9 { Vec3::Z } else { Vec3::X };
        }
        let right = forward.cross(up).normalize();
        let up = right.cross(forward);
        let basis = Mat3::from_cols(right, up, -forward);
        Self::from_quat(Quat::from_mat3(&basis).normalize())
    }

    /// Spherical interpolation along the shortest arc.
    pub fn slerp(a: Self, b: Self, t: f32) -> Self {
        Self::from_quat(a.to_quat().slerp(b.to_quat(), t))
    }

    pub fn normalized(self) -> Self {
        Self::from_quat(self.to_quat().normalize())
    }

    pub fn rotate(self, v: Vector3) -> Vector3 {
        (self.to_quat() * Vec3::from(v)).into()
    }

    /// Local -Z rotated into world space.
    pub fn forward(self) -> Vector3 {
        self.rotate(Vector3::new(0.0, 0.0, -1.0))
    }

    pub fn is_finite(self) -> bool {
        self.to_quat().is_finite()
    }

    pub fn is_normalized(self) -> bool {
        self.to_quat().is_normalized()
    }

    /// True when both represent the same rotation (q and -q included).
    pub fn same_rotation(self, other: Self, max_abs_diff: f32) -> bool {
        let a = self.to_quat();
        let b = other.to_quat();
        a.abs_diff_eq(b, max_abs_diff) || a.abs_diff_eq(-b, max_abs_diff)
    }
}

impl From<Quat> for Quaternion {
    #[inline]
    fn from(quat: Quat) -> Self {
        Self::from_quat(quat)
    }
}

impl From<Quaternion> for Quat {
    #[inline]
    fn from(q: Quaternion) -> Self {
        q.to_quat()
    }
}

impl From<[f32; 4]> for Quaternion {
    #[inline]
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Quaternion> for [f32; 4] {
    #[inline]
    fn from(q: Quaternion) -> Self {
        [q.x, q.y, q.z, q.w]
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}
