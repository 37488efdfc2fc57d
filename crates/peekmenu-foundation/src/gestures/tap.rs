//! Tap recogniser tolerant of small movement.

use crate::gesture_constants::TAP_SLOP;
use crate::{PointerEvent, PointerEventKind};
use peekmenu_ui_graphics::Point;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TapEvent {
    Down(Point),
    Up(Point),
    /// The pointer was cancelled or left the slop.
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapGesture {
    slop: f32,
    down_position: Option<Point>,
}

impl Default for TapGesture {
    fn default() -> Self {
        Self::new()
    }
}

impl TapGesture {
    pub fn new() -> Self {
        Self::with_slop(TAP_SLOP)
    }

    pub fn with_slop(slop: f32) -> Self {
        Self {
            slop,
            down_position: None,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.down_position.is_some()
    }

    pub fn on_event(&mut self, event: &PointerEvent) -> Option<TapEvent> {
        match event.kind {
            PointerEventKind::Down => {
                if self.down_position.is_some() {
                    return None;
                }
                self.down_position = Some(event.position);
                Some(TapEvent::Down(event.position))
            }
            PointerEventKind::Move => {
                let origin = self.down_position?;
                if (event.position - origin).distance() > self.slop {
                    self.down_position = None;
                    Some(TapEvent::Cancel)
                } else {
                    None
                }
            }
            PointerEventKind::Up => self
                .down_position
                .take()
                .map(|_| TapEvent::Up(event.position)),
            PointerEventKind::Cancel => self.down_position.take().map(|_| TapEvent::Cancel),
        }
    }

    pub fn reset(&mut self) {
        self.down_position = None;
    }
}

#[cfg(test)]
#[path = "../tests/tap_tests.rs"]
mod tests;
