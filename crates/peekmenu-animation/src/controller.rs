//! Frame-ticked animation controller.
//!
//! An [`AnimationController`] owns a value between a lower and an upper
//! bound and moves it over time. It does not schedule frames itself: the
//! owner calls [`AnimationController::tick`] with each frame timestamp for as
//! long as [`AnimationController::needs_tick`] is true, and reacts to the
//! returned [`Tick`].

use crate::Easing;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationStatus {
    /// Stopped at the lower bound.
    Dismissed,
    /// Running towards the upper bound.
    Forward,
    /// Running towards the lower bound.
    Reverse,
    /// Stopped at the upper bound, or at the target of a forward
    /// `animate_to`.
    Completed,
}

impl AnimationStatus {
    pub fn is_animating(self) -> bool {
        matches!(self, AnimationStatus::Forward | AnimationStatus::Reverse)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum AnimationDirection {
    Forward,
    Reverse,
}

/// What changed during one call to [`AnimationController::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tick {
    /// The new status, if it changed since the previous tick.
    pub status: Option<AnimationStatus>,
}

impl Tick {
    pub fn completed(&self) -> bool {
        self.status == Some(AnimationStatus::Completed)
    }

    pub fn dismissed(&self) -> bool {
        self.status == Some(AnimationStatus::Dismissed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Interpolation {
    from: f32,
    to: f32,
    duration_nanos: u64,
    easing: Easing,
}

#[derive(Debug, Clone)]
pub struct AnimationController {
    value: f32,
    lower_bound: f32,
    upper_bound: f32,
    duration_millis: u64,
    reverse_duration_millis: Option<u64>,
    status: AnimationStatus,
    reported_status: AnimationStatus,
    direction: AnimationDirection,
    simulation: Option<Interpolation>,
    start_time_nanos: Option<u64>,
}

impl AnimationController {
    /// Creates a controller spanning `[0, 1]`.
    pub fn new(duration_millis: u64) -> Self {
        Self::with_bounds(duration_millis, 0.0, 1.0)
    }

    pub fn with_bounds(duration_millis: u64, lower_bound: f32, upper_bound: f32) -> Self {
        debug_assert!(lower_bound < upper_bound, "controller bounds must be ordered");
        Self {
            value: lower_bound,
            lower_bound,
            upper_bound,
            duration_millis,
            reverse_duration_millis: None,
            status: AnimationStatus::Dismissed,
            reported_status: AnimationStatus::Dismissed,
            direction: AnimationDirection::Forward,
            simulation: None,
            start_time_nanos: None,
        }
    }

    pub fn with_reverse_duration(mut self, reverse_duration_millis: u64) -> Self {
        self.reverse_duration_millis = Some(reverse_duration_millis);
        self
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn status(&self) -> AnimationStatus {
        self.status
    }

    /// True while a simulation is running.
    pub fn is_animating(&self) -> bool {
        self.simulation.is_some()
    }

    /// True while the owner has to keep calling [`tick`](Self::tick): a
    /// simulation is running or a status change is still unreported.
    pub fn needs_tick(&self) -> bool {
        self.simulation.is_some() || self.status != self.reported_status
    }

    pub fn is_completed(&self) -> bool {
        self.status == AnimationStatus::Completed
    }

    pub fn is_dismissed(&self) -> bool {
        self.status == AnimationStatus::Dismissed
    }

    /// Jumps to `value` (clamped to the bounds), stopping any simulation.
    pub fn set_value(&mut self, value: f32) {
        self.stop();
        self.value = value.clamp(self.lower_bound, self.upper_bound);
        self.status = if self.value == self.lower_bound {
            AnimationStatus::Dismissed
        } else if self.value == self.upper_bound {
            AnimationStatus::Completed
        } else {
            match self.direction {
                AnimationDirection::Forward => AnimationStatus::Forward,
                AnimationDirection::Reverse => AnimationStatus::Reverse,
            }
        };
    }

    /// Jumps back to the lower bound.
    pub fn reset(&mut self) {
        self.direction = AnimationDirection::Forward;
        self.set_value(self.lower_bound);
    }

    pub fn stop(&mut self) {
        self.simulation = None;
        self.start_time_nanos = None;
    }

    pub fn forward(&mut self) {
        self.direction = AnimationDirection::Forward;
        self.animate_internal(self.upper_bound, None, Easing::LinearEasing);
    }

    pub fn reverse(&mut self) {
        self.direction = AnimationDirection::Reverse;
        self.animate_internal(self.lower_bound, None, Easing::LinearEasing);
    }

    /// Animates towards `target` as a forward animation; completes with
    /// [`AnimationStatus::Completed`] even if `target` is below the upper
    /// bound.
    pub fn animate_to(&mut self, target: f32, duration_millis: Option<u64>, easing: Easing) {
        self.direction = AnimationDirection::Forward;
        self.animate_internal(target, duration_millis, easing);
    }

    /// Animates towards `target` as a reverse animation.
    pub fn animate_back(&mut self, target: f32, duration_millis: Option<u64>, easing: Easing) {
        self.direction = AnimationDirection::Reverse;
        self.animate_internal(target, duration_millis, easing);
    }

    fn animate_internal(&mut self, target: f32, duration_millis: Option<u64>, easing: Easing) {
        self.stop();
        let target = target.clamp(self.lower_bound, self.upper_bound);
        let duration_nanos = match duration_millis {
            Some(millis) => millis * 1_000_000,
            None => {
                let range = self.upper_bound - self.lower_bound;
                let remaining = ((target - self.value).abs() / range) as f64;
                let base = match self.direction {
                    AnimationDirection::Forward => self.duration_millis,
                    AnimationDirection::Reverse => self
                        .reverse_duration_millis
                        .unwrap_or(self.duration_millis),
                };
                (base as f64 * 1_000_000.0 * remaining) as u64
            }
        };

        if duration_nanos == 0 || (target - self.value).abs() < f32::EPSILON {
            self.value = target;
            self.status = self.terminal_status();
            return;
        }

        self.status = match self.direction {
            AnimationDirection::Forward => AnimationStatus::Forward,
            AnimationDirection::Reverse => AnimationStatus::Reverse,
        };
        self.simulation = Some(Interpolation {
            from: self.value,
            to: target,
            duration_nanos,
            easing,
        });
    }

    fn terminal_status(&self) -> AnimationStatus {
        match self.direction {
            AnimationDirection::Forward => AnimationStatus::Completed,
            AnimationDirection::Reverse => AnimationStatus::Dismissed,
        }
    }

    /// Advances the running simulation to `frame_time_nanos`. The first tick
    /// after starting a simulation pins its start time.
    pub fn tick(&mut self, frame_time_nanos: u64) -> Tick {
        if let Some(simulation) = self.simulation {
            let start_time = *self.start_time_nanos.get_or_insert(frame_time_nanos);
            let elapsed = frame_time_nanos.saturating_sub(start_time);
            let linear = (elapsed as f64 / simulation.duration_nanos.max(1) as f64).clamp(0.0, 1.0)
                as f32;
            if linear >= 1.0 {
                self.value = simulation.to;
                self.stop();
                self.status = self.terminal_status();
            } else {
                let progress = simulation.easing.transform(linear);
                self.value = simulation.from + (simulation.to - simulation.from) * progress;
            }
        }

        let status = if self.status != self.reported_status {
            log::trace!(
                "animation status {:?} -> {:?} at {:.3}",
                self.reported_status,
                self.status,
                self.value
            );
            self.reported_status = self.status;
            Some(self.status)
        } else {
            None
        };
        Tick { status }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
