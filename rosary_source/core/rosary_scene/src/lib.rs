pub mod layout;
pub mod node;
pub mod node_arena;
pub mod raycast;
pub mod scene;

pub use layout::{BeadRole, LayoutColors, PathSlot, SlotKind, build_rosary};
pub use node::*;
pub use node_arena::NodeArena;
pub use scene::{RayHit, Scene};
