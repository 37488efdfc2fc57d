//! Foundation input handling for Peekmenu
//!
//! Pointer events as delivered by the host, velocity tracking and the tap
//! and pan recognisers the menu builds its gestures on.

pub mod gesture_constants;
pub mod gestures;
mod pointer;
pub mod velocity_tracker;

pub use gestures::{PanEvent, PanEvents, PanGesture, TapEvent, TapGesture};
pub use pointer::{PointerEvent, PointerEventKind, PointerId};
pub use velocity_tracker::{Velocity, VelocityTracker, VelocityTracker1D};

pub mod prelude {
    pub use crate::gesture_constants::{DRAG_THRESHOLD, MIN_FLING_VELOCITY, TAP_SLOP};
    pub use crate::gestures::{PanEvent, PanGesture, TapEvent, TapGesture};
    pub use crate::pointer::{PointerEvent, PointerEventKind};
    pub use crate::velocity_tracker::Velocity;
}
