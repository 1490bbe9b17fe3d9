use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// 3D vector. Serialized as `[x, y, z]`.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector3({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Vector3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    /// Camera-space backward (+Z); the default viewing direction looks down -Z.
    pub const BACK: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    #[inline(always)]
    const fn to_glam(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    #[inline(always)]
    const fn from_glam(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    pub fn dot(self, rhs: Self) -> f32 {
        self.to_glam().dot(rhs.to_glam())
    }

    pub fn cross(self, rhs: Self) -> Self {
        Self::from_glam(self.to_glam().cross(rhs.to_glam()))
    }

    pub fn length_squared(&self) -> f32 {
        self.to_glam().length_squared()
    }

    pub fn length(&self) -> f32 {
        self.to_glam().length()
    }

    /// Unit vector in the same direction, or zero for a zero-length input.
    pub fn normalized(&self) -> Self {
        Self::from_glam(self.to_glam().normalize_or_zero())
    }

    /// Unit vector, or `None` when the length is zero or not finite.
    pub fn try_normalized(&self) -> Option<Self> {
        self.to_glam().try_normalize().map(Self::from_glam)
    }

    pub fn distance(a: Self, b: Self) -> f32 {
        a.to_glam().distance(b.to_glam())
    }

    pub fn lerp(a: Self, b: Self, t: f32) -> Self {
        Self::from_glam(a.to_glam().lerp(b.to_glam(), t))
    }

    pub fn min(self, rhs: Self) -> Self {
        Self::from_glam(self.to_glam().min(rhs.to_glam()))
    }

    pub fn max(self, rhs: Self) -> Self {
        Self::from_glam(self.to_glam().max(rhs.to_glam()))
    }

    pub fn max_element(self) -> f32 {
        self.to_glam().max_element()
    }

    pub fn is_finite(self) -> bool {
        self.to_glam().is_finite()
    }

    pub fn abs_diff_eq(self, rhs: Self, max_abs_diff: f32) -> bool {
        self.to_glam().abs_diff_eq(rhs.to_glam(), max_abs_diff)
    }
}

impl Add for Vector3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::from_glam(self.to_glam() + rhs.to_glam())
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vector3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::from_glam(self.to_glam() - rhs.to_glam())
    }
}

impl Mul<f32> for Vector3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::from_glam(self.to_glam() * rhs)
    }
}

impl Neg for Vector3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl From<Vector3> for Vec3 {
    #[inline]
    fn from(v: Vector3) -> Self {
        v.to_glam()
    }
}

impl From<Vec3> for Vector3 {
    #[inline]
    fn from(v: Vec3) -> Self {
        Self::from_glam(v)
    }
}

impl From<[f32; 3]> for Vector3 {
    #[inline]
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Vector3> for [f32; 3] {
    #[inline]
    fn from(v: Vector3) -> Self {
        [v.x, v.y, v.z]
    }
}
