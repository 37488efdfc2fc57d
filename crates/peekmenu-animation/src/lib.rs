//! Animation system for Peekmenu
//!
//! Provides easing curves, interpolating tweens and a frame-ticked
//! animation controller.

pub mod controller;
pub mod easing;
pub mod tween;

pub use controller::{AnimationController, AnimationStatus, Tick};
pub use easing::Easing;
pub use tween::{CurveTween, Lerp, Tween, TweenSequence, TweenSequenceItem};

pub mod prelude {
    pub use crate::controller::{AnimationController, AnimationStatus};
    pub use crate::easing::Easing;
    pub use crate::tween::{Lerp, Tween, TweenSequence};
}
