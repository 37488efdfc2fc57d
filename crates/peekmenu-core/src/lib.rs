//! Core runtime for Peekmenu
//!
//! A single-threaded, frame-driven runtime: frame callbacks run at the start
//! of a frame, post-frame callbacks after the host has rendered it.

mod runtime;
mod state;

pub use runtime::{Runtime, RuntimeHandle};
pub use state::{MutableState, State, Subscription};

pub type FrameCallbackId = u64;

/// Nanoseconds in one millisecond.
pub const NANOS_PER_MILLI: u64 = 1_000_000;

pub mod prelude {
    pub use crate::runtime::{Runtime, RuntimeHandle};
    pub use crate::state::{MutableState, State};
}
