use std::rc::Rc;

use peekmenu::{ContextMenu, MenuConfig, MenuError, MenuHandle, MenuHost, MenuScene, MenuSlot};
use peekmenu_core::{Runtime, RuntimeHandle, NANOS_PER_MILLI};
use peekmenu_foundation::PointerEvent;
use peekmenu_ui_graphics::{Point, Rect};

use crate::FakeHost;

/// One 60 Hz frame.
pub const FRAME_NANOS: u64 = 16_666_667;

/// Upper bound on frames produced by [`MenuTestRule::pump_until_idle`].
const MAX_IDLE_FRAMES: usize = 10_000;

/// Headless harness for exercising a [`ContextMenu`] in tests.
///
/// `MenuTestRule` owns a frame runtime, a [`FakeHost`] and the menu under
/// test. Every frame runs the runtime's frame callbacks, captures the scene
/// the host would paint and then runs the post-frame callbacks, the same
/// order a real host follows. Pointer helpers stamp events with the current
/// frame time.
pub struct MenuTestRule {
    runtime: Runtime,
    host: Rc<FakeHost>,
    menu: ContextMenu,
    frame_time_nanos: u64,
    scene: MenuScene,
    frames: u64,
}

impl MenuTestRule {
    pub fn new(config: MenuConfig) -> Result<Self, MenuError> {
        Self::with_host(config, FakeHost::new())
    }

    pub fn with_host(config: MenuConfig, host: FakeHost) -> Result<Self, MenuError> {
        let runtime = Runtime::new();
        let host = Rc::new(host);
        let menu = ContextMenu::new(
            config,
            Rc::clone(&host) as Rc<dyn MenuHost>,
            runtime.handle(),
        )?;
        Ok(Self {
            runtime,
            host,
            menu,
            frame_time_nanos: 0,
            scene: MenuScene::default(),
            frames: 0,
        })
    }

    pub fn menu(&self) -> &ContextMenu {
        &self.menu
    }

    pub fn handle(&self) -> MenuHandle {
        self.menu.handle()
    }

    pub fn host(&self) -> &FakeHost {
        &self.host
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    /// The scene captured by the most recent frame.
    pub fn scene(&self) -> &MenuScene {
        &self.scene
    }

    pub fn frame_time_nanos(&self) -> u64 {
        self.frame_time_nanos
    }

    pub fn now_millis(&self) -> u64 {
        self.frame_time_nanos / NANOS_PER_MILLI
    }

    /// Frames produced so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn needs_frame(&self) -> bool {
        self.runtime.needs_frame()
    }

    /// Produces one frame, one [`FRAME_NANOS`] after the previous one.
    pub fn advance_frame(&mut self) {
        self.frame_time_nanos += FRAME_NANOS;
        self.frames += 1;
        let handle = self.runtime.handle();
        handle.begin_frame(self.frame_time_nanos);
        self.scene = self.menu.scene();
        handle.end_frame();
        log::trace!(
            "test frame {} at {}ms, phase {:?}",
            self.frames,
            self.now_millis(),
            self.menu.phase()
        );
    }

    /// Produces frames until `millis` more milliseconds have passed.
    pub fn advance_by_millis(&mut self, millis: u64) {
        let end = self.frame_time_nanos + millis * NANOS_PER_MILLI;
        while self.frame_time_nanos + FRAME_NANOS <= end {
            self.advance_frame();
        }
    }

    /// Produces frames until nothing is scheduled.
    pub fn pump_until_idle(&mut self) {
        let start = self.frames;
        for _ in 0..MAX_IDLE_FRAMES {
            if !self.runtime.needs_frame() {
                log::debug!(
                    "idle after {} frames at {}ms",
                    self.frames - start,
                    self.now_millis()
                );
                return;
            }
            self.advance_frame();
        }
        panic!("menu did not go idle within {MAX_IDLE_FRAMES} frames");
    }

    pub fn pointer_down(&mut self, position: Point) {
        let event = PointerEvent::down(position, self.now_millis());
        self.menu.on_pointer_event(event);
    }

    pub fn pointer_move(&mut self, position: Point) {
        let event = PointerEvent::moved(position, self.now_millis());
        self.menu.on_pointer_event(event);
    }

    pub fn pointer_up(&mut self, position: Point) {
        let event = PointerEvent::up(position, self.now_millis());
        self.menu.on_pointer_event(event);
    }

    pub fn pointer_cancel(&mut self, position: Point) {
        let event = PointerEvent::cancel(position, self.now_millis());
        self.menu.on_pointer_event(event);
    }

    /// Taps `position` without letting any time pass.
    pub fn tap(&mut self, position: Point) {
        self.pointer_down(position);
        self.pointer_up(position);
    }

    pub fn child_center(&self) -> Point {
        self.host
            .child_rect()
            .map_or(Point::ZERO, |child| child.center())
    }

    /// Where `slot` was painted in the last frame.
    pub fn element_rect(&self, slot: MenuSlot) -> Option<Rect> {
        self.scene
            .route
            .as_ref()
            .and_then(|route| route.element(slot))
            .map(|element| element.rect)
    }

    /// Holds the child until the menu has opened and settled, then lifts the
    /// pointer.
    pub fn open_by_long_press(&mut self) {
        let center = self.child_center();
        self.pointer_down(center);
        self.pump_until_idle();
        self.pointer_up(center);
    }

    /// Drags from `from` by `delta` in `steps` equal moves, producing frames
    /// for `step_millis` before each move. The pointer stays down.
    pub fn drag_by(&mut self, from: Point, delta: Point, steps: u32, step_millis: u64) -> Point {
        self.pointer_down(from);
        let steps = steps.max(1);
        let mut position = from;
        for step in 1..=steps {
            self.advance_by_millis(step_millis);
            let fraction = step as f32 / steps as f32;
            position = from + delta * fraction;
            self.pointer_move(position);
        }
        position
    }
}

#[cfg(test)]
#[path = "tests/testing_tests.rs"]
mod tests;
