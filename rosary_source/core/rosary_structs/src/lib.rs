pub mod color;
pub mod structs_3d;

pub use color::*;
pub use structs_3d::*;
