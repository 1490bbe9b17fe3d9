pub mod framing;
pub mod transition;

pub use framing::{FramingInput, FramingParams, FramingTarget, fit_distance, frame_item, framing_distance};
pub use transition::{CameraEngine, TransitionHandle, ease_in_out_cubic, interpolate_pose};
