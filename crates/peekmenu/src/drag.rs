//! Drag-to-dismiss on the settled menu.
//!
//! Horizontal and upward movement is damped, downward movement is not. The
//! preview shrinks with the vertical offset down to `min_scale`. The sheet
//! and the top widget hide once the scale drops past the sheet threshold.
//! This state never closes the route itself: releases that should dismiss
//! are reported as a [`DragOutcome`].

use peekmenu_animation::{AnimationController, AnimationStatus, Easing, Tween};
use peekmenu_foundation::Velocity;
use peekmenu_ui_graphics::Point;

use crate::config::DragConfig;

/// Where the open menu was when it was dismissed. The exit transition starts
/// from here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExitState {
    pub scale: f32,
    pub sheet_opacity: f32,
    pub offset: Point,
}

impl ExitState {
    pub const REST: ExitState = ExitState {
        scale: 1.0,
        sheet_opacity: 1.0,
        offset: Point::ZERO,
    };
}

impl Default for ExitState {
    fn default() -> Self {
        Self::REST
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragOutcome {
    Dismiss(ExitState),
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Motion {
    Idle,
    Dragging,
    /// Elastic return from `from` to rest.
    SnapBack { from: Point },
    /// Linear vertical fling.
    Fling { from: Point, to_y: f32 },
}

pub(crate) struct StaticDragState {
    config: DragConfig,
    raw: Point,
    offset: Point,
    scale: f32,
    motion: Motion,
    /// Sits at 1 while dragging, runs 1 -> 0 on snap-back and 0 -> 1 on a
    /// fling.
    move_controller: AnimationController,
    /// Hidden fraction of the sheet and top widget.
    sheet_controller: AnimationController,
}

impl StaticDragState {
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            raw: Point::ZERO,
            offset: Point::ZERO,
            scale: 1.0,
            motion: Motion::Idle,
            move_controller: AnimationController::new(config.move_duration_millis),
            sheet_controller: AnimationController::new(config.sheet_hide_millis)
                .with_reverse_duration(config.sheet_show_millis),
        }
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn sheet_visibility(&self) -> f32 {
        1.0 - self.sheet_controller.value()
    }

    pub fn is_dragging(&self) -> bool {
        self.motion == Motion::Dragging
    }

    pub fn exit_state(&self) -> ExitState {
        ExitState {
            scale: self.scale,
            sheet_opacity: self.sheet_visibility(),
            offset: self.offset,
        }
    }

    pub fn needs_tick(&self) -> bool {
        self.move_controller.needs_tick() || self.sheet_controller.needs_tick()
    }

    pub fn on_pan_start(&mut self) {
        self.move_controller.stop();
        self.raw = self.undamp(self.offset);
        self.motion = Motion::Dragging;
    }

    pub fn on_pan_update(&mut self, delta: Point) {
        if self.motion != Motion::Dragging {
            self.on_pan_start();
        }
        self.raw += delta;
        self.offset = self.damp(self.raw);
        self.scale = self.scale_for(self.offset.y);
        self.move_controller.set_value(1.0);
        self.update_sheet();
    }

    pub fn on_pan_end(&mut self, velocity: Velocity) -> Option<DragOutcome> {
        if velocity.y.abs() >= self.config.min_fling_velocity {
            let away = velocity.y > 0.0;
            let to_y = if away {
                self.offset.y + self.config.fling_overshoot
            } else {
                0.0
            };
            if away && self.sheet_controller.status() != AnimationStatus::Forward {
                self.sheet_controller.forward();
            } else if !away && self.sheet_controller.status() != AnimationStatus::Reverse {
                self.sheet_controller.reverse();
            }
            log::debug!(
                "fling {} from {:.1} to {:.1}",
                if away { "away" } else { "back" },
                self.offset.y,
                to_y
            );
            self.motion = Motion::Fling {
                from: self.offset,
                to_y,
            };
            self.move_controller.reset();
            self.move_controller.animate_to(
                1.0,
                Some(self.config.fling_duration_millis),
                Easing::LinearEasing,
            );
            return None;
        }

        if self.scale <= self.config.min_scale {
            self.motion = Motion::Idle;
            return Some(DragOutcome::Dismiss(self.exit_state()));
        }

        self.snap_back();
        None
    }

    pub fn on_pan_cancel(&mut self) {
        self.snap_back();
    }

    fn snap_back(&mut self) {
        self.motion = Motion::SnapBack { from: self.offset };
        self.move_controller.set_value(1.0);
        self.move_controller.animate_back(
            0.0,
            Some(self.config.move_duration_millis),
            Easing::LinearEasing,
        );
    }

    pub fn tick(&mut self, frame_time_nanos: u64) -> Option<DragOutcome> {
        self.sheet_controller.tick(frame_time_nanos);
        let tick = self.move_controller.tick(frame_time_nanos);
        let value = self.move_controller.value();
        match self.motion {
            Motion::Fling { from, to_y } => {
                self.offset = Point::new(
                    Tween::new(from.x, 0.0).transform(value),
                    Tween::new(from.y, to_y).transform(value),
                );
                self.scale = self.scale_for(self.offset.y);
                if tick.completed() {
                    self.motion = Motion::Idle;
                    self.raw = self.undamp(self.offset);
                    // Landing exactly on zero means it was flung back.
                    if self.offset.y == 0.0 {
                        return None;
                    }
                    log::debug!("fling finished at {:.1}, dismissing", self.offset.y);
                    return Some(DragOutcome::Dismiss(self.exit_state()));
                }
            }
            Motion::SnapBack { from } => {
                self.offset = from * Easing::ElasticIn.transform(value);
                self.scale = self.scale_for(self.offset.y);
                self.update_sheet();
                if tick.dismissed() {
                    self.motion = Motion::Idle;
                    self.offset = Point::ZERO;
                    self.raw = Point::ZERO;
                    self.scale = 1.0;
                }
            }
            Motion::Idle | Motion::Dragging => {}
        }
        None
    }

    fn damp(&self, raw: Point) -> Point {
        let DragConfig {
            padding, damping, ..
        } = self.config;
        let x = (padding * raw.x / damping).clamp(-padding, padding);
        let y = if raw.y < 0.0 {
            padding * raw.y / damping
        } else {
            raw.y
        };
        Point::new(x, y)
    }

    fn undamp(&self, offset: Point) -> Point {
        let DragConfig {
            padding, damping, ..
        } = self.config;
        if padding <= 0.0 {
            return Point::new(0.0, offset.y.max(0.0));
        }
        let x = offset.x * damping / padding;
        let y = if offset.y < 0.0 {
            offset.y * damping / padding
        } else {
            offset.y
        };
        Point::new(x, y)
    }

    fn scale_for(&self, dy: f32) -> f32 {
        let max = self.config.max_drag_distance;
        ((max - dy.abs()) / max).max(self.config.min_scale)
    }

    fn update_sheet(&mut self) {
        let status = self.sheet_controller.status();
        if self.scale <= self.config.sheet_scale_threshold {
            if !matches!(status, AnimationStatus::Forward | AnimationStatus::Completed) {
                self.sheet_controller.forward();
            }
        } else if !matches!(status, AnimationStatus::Reverse | AnimationStatus::Dismissed) {
            self.sheet_controller.reverse();
        }
    }
}

#[cfg(test)]
#[path = "tests/drag_tests.rs"]
mod tests;
