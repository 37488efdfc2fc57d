//! Long-press timer.
//!
//! A forward animation over `[0, open_fraction]` that takes the whole hold
//! duration. Crossing the midpoint while not reversing accepts the press;
//! reaching the upper bound hands off to the route.

use peekmenu_animation::{AnimationController, AnimationStatus};
use peekmenu_foundation::{PointerEvent, TapEvent, TapGesture};

use crate::config::open_fraction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PressInput {
    Down,
    Released,
    Ignored,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct PressTick {
    /// The press crossed the midpoint during this tick.
    pub accepted: bool,
    /// The timer reached `open_fraction`.
    pub completed: bool,
    /// The timer reversed all the way back to zero.
    pub dismissed: bool,
}

pub(crate) struct PressController {
    controller: AnimationController,
    tap: TapGesture,
    open_fraction: f32,
    accepted: bool,
}

impl PressController {
    pub fn new(hold_millis: u64, transition_millis: u64) -> Self {
        let open_fraction = open_fraction(hold_millis, transition_millis);
        Self {
            controller: AnimationController::with_bounds(hold_millis, 0.0, open_fraction),
            tap: TapGesture::new(),
            open_fraction,
            accepted: false,
        }
    }

    pub fn value(&self) -> f32 {
        self.controller.value()
    }

    pub fn open_fraction(&self) -> f32 {
        self.open_fraction
    }

    pub fn midpoint(&self) -> f32 {
        self.open_fraction / 2.0
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// The timer is away from zero or the pointer is still down.
    pub fn is_active(&self) -> bool {
        !self.controller.is_dismissed() || self.tap.is_pressed()
    }

    pub fn needs_tick(&self) -> bool {
        self.controller.needs_tick()
    }

    pub fn on_pointer(&mut self, event: &PointerEvent) -> PressInput {
        match self.tap.on_event(event) {
            Some(TapEvent::Down(_)) => {
                if !self.accepted {
                    self.controller.forward();
                }
                PressInput::Down
            }
            Some(TapEvent::Up(_)) | Some(TapEvent::Cancel) => {
                self.release();
                PressInput::Released
            }
            None => PressInput::Ignored,
        }
    }

    /// Pointer left before acceptance: fall back below the midpoint, carry on
    /// past it.
    fn release(&mut self) {
        if self.controller.is_animating() && self.controller.value() < self.midpoint() {
            log::debug!("press released at {:.3}, reversing", self.controller.value());
            self.controller.reverse();
        }
    }

    /// Stops the press outright, as if it never started.
    pub fn cancel(&mut self) {
        self.tap.reset();
        if !self.controller.is_dismissed() && !self.accepted {
            self.controller.reverse();
        }
    }

    pub fn reset(&mut self) {
        self.tap.reset();
        self.controller.reset();
        self.accepted = false;
    }

    pub fn tick(&mut self, frame_time_nanos: u64) -> PressTick {
        let tick = self.controller.tick(frame_time_nanos);
        let mut result = PressTick {
            completed: tick.completed(),
            dismissed: tick.dismissed(),
            accepted: false,
        };
        if !self.accepted
            && self.controller.status() != AnimationStatus::Reverse
            && self.controller.value() >= self.midpoint()
        {
            self.accepted = true;
            result.accepted = true;
            log::debug!("press accepted at {:.3}", self.controller.value());
        }
        result
    }
}

#[cfg(test)]
#[path = "tests/press_tests.rs"]
mod tests;
