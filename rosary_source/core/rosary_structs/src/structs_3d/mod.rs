pub mod aabb;
pub mod bezier;
pub mod camera;
pub mod quaternion;
pub mod ray;
pub mod transform_3d;
pub mod vector3;

pub use aabb::*;
pub use bezier::*;
pub use camera::*;
pub use quaternion::*;
pub use ray::*;
pub use transform_3d::*;
pub use vector3::*;
