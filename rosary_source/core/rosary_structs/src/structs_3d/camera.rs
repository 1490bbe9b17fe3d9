use crate::{Quaternion, Vector3};
use glam::Mat4;
use serde::{Deserialize, Serialize};

/// Animated part of the camera: where it is, where it looks, what it orbits.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vector3,
    pub orientation: Quaternion,
    pub pivot: Vector3,
}

impl CameraPose {
    pub const fn new(position: Vector3, orientation: Quaternion, pivot: Vector3) -> Self {
        Self {
            position,
            orientation,
            pivot,
        }
    }

    /// Pose at `position` looking at `pivot` with +Y up.
    pub fn looking_at(position: Vector3, pivot: Vector3) -> Self {
        Self::new(
            position,
            Quaternion::looking_at(position, pivot, Vector3::UP),
            pivot,
        )
    }

    pub fn distance_to_pivot(&self) -> f32 {
        Vector3::distance(self.position, self.pivot)
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.orientation.is_finite() && self.pivot.is_finite()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation.into(), self.position.into()).inverse()
    }

    pub fn approx_eq(&self, other: &Self, eps: f32) -> bool {
        self.position.abs_diff_eq(other.position, eps)
            && self.pivot.abs_diff_eq(other.pivot, eps)
            && self.orientation.same_rotation(other.orientation, eps)
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::looking_at(Vector3::new(0.0, 0.0, 50.0), Vector3::ZERO)
    }
}

/// Static perspective parameters; never animated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Vertical field of view.
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub const fn new(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_degrees,
            aspect,
            near,
            far,
        }
    }

    /// Copy with a new aspect ratio; non-positive or non-finite ratios keep the old one.
    pub fn with_aspect(self, aspect: f32) -> Self {
        if aspect.is_finite() && aspect > 0.0 {
            Self { aspect, ..self }
        } else {
            self
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(20.0, 1.0, 0.05, 400.0)
    }
}
