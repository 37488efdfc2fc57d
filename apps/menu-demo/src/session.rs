//! Real-time frame loop for the scripted walkthrough.

use std::time::Duration;

use peekmenu::prelude::*;
use peekmenu_core::Runtime;
use peekmenu_foundation::PointerEvent;
use peekmenu_ui_graphics::Point;
use web_time::Instant;

const FRAME: Duration = Duration::from_micros(16_667);

#[derive(Clone, Copy, Debug)]
pub enum Step {
    Down(Point),
    Up(Point),
    /// Produce frames for this many milliseconds.
    Wait(u64),
    /// Tap the centre of an action row.
    TapAction(usize),
    /// Press the preview and drag it down in `steps` moves, one per frame.
    DragPreview { dy: f32, steps: u32 },
    /// Lift the pointer wherever it is.
    Release,
    Open,
    Close,
}

pub struct Session<'a> {
    runtime: &'a Runtime,
    menu: &'a ContextMenu,
    start: Instant,
    frames: u32,
    pointer: Point,
    last_phase: MenuPhase,
}

impl<'a> Session<'a> {
    pub fn new(runtime: &'a Runtime, menu: &'a ContextMenu) -> Self {
        Self {
            runtime,
            menu,
            start: Instant::now(),
            frames: 0,
            pointer: Point::ZERO,
            last_phase: menu.phase(),
        }
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn run(&mut self, step: Step) {
        log::debug!("step {:?}", step);
        match step {
            Step::Down(position) => self.down(position),
            Step::Up(position) => self.up(position),
            Step::Wait(millis) => {
                let end = self.start.elapsed() + Duration::from_millis(millis);
                while self.start.elapsed() < end {
                    self.frame();
                }
            }
            Step::TapAction(index) => {
                let Some(row) = self.action_row(index) else {
                    log::warn!("no action row {index} on screen");
                    return;
                };
                self.down(row);
                self.up(row);
            }
            Step::DragPreview { dy, steps } => {
                let Some(preview) = self.preview_center() else {
                    log::warn!("no preview on screen to drag");
                    return;
                };
                self.down(preview);
                let steps = steps.max(1);
                for step in 1..=steps {
                    self.frame();
                    let position = preview + Point::new(0.0, dy * step as f32 / steps as f32);
                    self.pointer = position;
                    self.menu
                        .on_pointer_event(PointerEvent::moved(position, self.now_millis()));
                }
            }
            Step::Release => self.up(self.pointer),
            Step::Open => self.menu.handle().open(),
            Step::Close => self.menu.handle().close(),
        }
    }

    fn down(&mut self, position: Point) {
        self.pointer = position;
        self.menu
            .on_pointer_event(PointerEvent::down(position, self.now_millis()));
    }

    fn up(&mut self, position: Point) {
        self.pointer = position;
        self.menu
            .on_pointer_event(PointerEvent::up(position, self.now_millis()));
    }

    fn now_millis(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    /// Sleeps until the next frame deadline, then runs one frame.
    fn frame(&mut self) {
        self.frames += 1;
        let deadline = self.start + FRAME * self.frames;
        let now = Instant::now();
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
        let handle = self.runtime.handle();
        handle.begin_frame(self.start.elapsed().as_nanos() as u64);
        let scene = self.menu.scene();
        self.report(&scene);
        handle.end_frame();
    }

    fn report(&mut self, scene: &MenuScene) {
        log::trace!(
            "frame {} progress {:.3} decoy {:?}",
            self.frames,
            scene.progress,
            scene.decoy.map(|decoy| decoy.rect)
        );
        let phase = self.menu.phase();
        if phase == self.last_phase {
            return;
        }
        self.last_phase = phase;
        let preview = scene
            .route
            .as_ref()
            .and_then(|route| route.element(MenuSlot::Preview))
            .map(|element| element.rect);
        println!(
            "[{:>5}ms] {:?} progress {:.2} preview {:?}",
            self.now_millis(),
            phase,
            scene.progress,
            preview
        );
    }

    fn action_row(&self, index: usize) -> Option<Point> {
        match self.menu.scene().route? {
            RouteScene::Settled { actions, .. } => actions
                .rows
                .iter()
                .find(|row| row.index == index)
                .map(|row| row.rect.center()),
            _ => None,
        }
    }

    fn preview_center(&self) -> Option<Point> {
        self.menu
            .scene()
            .route?
            .element(MenuSlot::Preview)
            .map(|element| element.rect.center())
    }
}
