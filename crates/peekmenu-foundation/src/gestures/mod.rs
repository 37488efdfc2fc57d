//! Gesture recognisers.
//!
//! Each recogniser consumes raw [`PointerEvent`](crate::PointerEvent)s and
//! reports higher-level events. They hold no callbacks: the owner matches on
//! the returned event.

mod pan;
mod tap;

pub use pan::{PanEvent, PanEvents, PanGesture};
pub use tap::{TapEvent, TapGesture};
