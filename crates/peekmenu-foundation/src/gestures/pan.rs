//! Pan recogniser with a start threshold and release velocity.

use crate::gesture_constants::{DRAG_THRESHOLD, MAX_FLING_VELOCITY};
use crate::{PointerEvent, PointerEventKind, Velocity, VelocityTracker};
use peekmenu_ui_graphics::Point;
use smallvec::{smallvec, SmallVec};

pub type PanEvents = SmallVec<[PanEvent; 2]>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanEvent {
    /// The pointer crossed the threshold.
    Start { position: Point },
    /// `delta` is the movement since the previous update; the first update
    /// carries everything since the pointer went down. `offset` is the total
    /// movement since then.
    Update { delta: Point, offset: Point },
    End { velocity: Velocity },
    Cancel,
}

#[derive(Debug, Clone)]
pub struct PanGesture {
    threshold: f32,
    origin: Option<Point>,
    last: Point,
    active: bool,
    tracker: VelocityTracker,
}

impl Default for PanGesture {
    fn default() -> Self {
        Self::new()
    }
}

impl PanGesture {
    pub fn new() -> Self {
        Self::with_threshold(DRAG_THRESHOLD)
    }

    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            threshold,
            origin: None,
            last: Point::ZERO,
            active: false,
            tracker: VelocityTracker::new(),
        }
    }

    /// True once the pointer has crossed the threshold.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_tracking(&self) -> bool {
        self.origin.is_some()
    }

    /// Handles one event and returns what it produced, in order. A
    /// threshold crossing yields `Start` followed by the first `Update`.
    pub fn on_event(&mut self, event: &PointerEvent) -> PanEvents {
        match event.kind {
            PointerEventKind::Down => {
                if self.origin.is_none() {
                    self.origin = Some(event.position);
                    self.last = event.position;
                    self.active = false;
                    self.tracker.reset();
                    self.tracker.add_position(event.time_ms, event.position);
                }
                PanEvents::new()
            }
            PointerEventKind::Move => {
                let Some(origin) = self.origin else {
                    return PanEvents::new();
                };
                self.tracker.add_position(event.time_ms, event.position);
                let mut events = PanEvents::new();
                if !self.active {
                    if (event.position - origin).distance() <= self.threshold {
                        return events;
                    }
                    self.active = true;
                    log::trace!("pan started at {:?}", event.position);
                    events.push(PanEvent::Start {
                        position: event.position,
                    });
                }
                let delta = event.position - self.last;
                self.last = event.position;
                events.push(PanEvent::Update {
                    delta,
                    offset: event.position - origin,
                });
                events
            }
            PointerEventKind::Up => {
                let was_active = self.active;
                if self.origin.is_some() {
                    self.tracker.add_position(event.time_ms, event.position);
                }
                let velocity = self.tracker.velocity_with_max(MAX_FLING_VELOCITY);
                self.reset();
                if was_active {
                    smallvec![PanEvent::End { velocity }]
                } else {
                    PanEvents::new()
                }
            }
            PointerEventKind::Cancel => {
                let was_active = self.active;
                self.reset();
                if was_active {
                    smallvec![PanEvent::Cancel]
                } else {
                    PanEvents::new()
                }
            }
        }
    }

    pub fn reset(&mut self) {
        self.origin = None;
        self.active = false;
        self.tracker.reset();
    }
}

#[cfg(test)]
#[path = "../tests/pan_tests.rs"]
mod tests;
