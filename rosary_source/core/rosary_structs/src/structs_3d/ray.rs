use crate::{CameraPose, Projection, Vector3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vector3,
    /// Unit length.
    pub direction: Vector3,
}

impl Ray {
    /// Returns `None` for a zero or non-finite direction.
    pub fn new(origin: Vector3, direction: Vector3) -> Option<Self> {
        let direction = direction.try_normalized()?;
        origin.is_finite().then_some(Self { origin, direction })
    }

    pub fn at(&self, t: f32) -> Vector3 {
        self.origin + self.direction * t
    }

    /// Pick ray through normalized device coordinates (`-1..1`, +y up).
    pub fn from_ndc(
        pose: &CameraPose,
        projection: &Projection,
        ndc_x: f32,
        ndc_y: f32,
    ) -> Option<Self> {
        let half_height = (projection.fov_degrees.to_radians() * 0.5).tan();
        let half_width = half_height * projection.aspect;
        let local = Vector3::new(ndc_x * half_width, ndc_y * half_height, -1.0);
        Self::new(pose.position, pose.orientation.rotate(local))
    }
}
