pub mod camera;
pub mod clock;
pub mod error;
pub mod hit;
pub mod runtime;
pub mod selection;
pub mod sequence;
pub mod session;

pub use camera::{CameraEngine, FramingInput, FramingParams, FramingTarget, TransitionHandle};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{NavigationError, RuntimeError, SessionError};
pub use hit::{HitResolver, is_selectable};
pub use runtime::{LayoutFn, Runtime};
pub use selection::{SelectionPhase, SelectionState};
pub use sequence::{FocusableItem, ItemKind, SequenceModel, chime_for, layout_colors};
pub use session::{LoadOutcome, SCHEMA_VERSION, SessionExpectations, SessionRecord, SessionStore};
