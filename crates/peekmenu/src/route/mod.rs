//! The full-screen route that hosts the open menu.
//!
//! A route lives for one open cycle:
//! `Measuring -> Entering -> Settled -> Exiting -> Popped`. It is laid out
//! offstage when pushed, seeds its transition tweens from that layout after
//! the first frame has rendered, animates in, hands interaction to the drag
//! state while settled and animates out when dismissed.

mod barrier;
mod transition;

pub(crate) use barrier::Barrier;
pub(crate) use transition::Anchoring;

use transition::{GeometrySnapshot, RouteTransition, SnapshotKey};

use peekmenu_animation::AnimationController;
use peekmenu_ui_graphics::{GraphicsLayer, Rect};
use peekmenu_ui_layout::{
    layout_aligned_children, LayoutError, LayoutParams, MenuLayout, MenuSlot, Orientation,
    SlotMeasurer,
};

use crate::config::{DragConfig, ACTIONS_MAX_WIDTH};
use crate::drag::{DragOutcome, ExitState, StaticDragState};
use crate::scene::{BarrierFrame, Elements, PositionedElement};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoutePhase {
    /// Laid out offstage; tweens not seeded yet.
    Measuring,
    Entering,
    /// Fully open and interactive.
    Settled,
    Exiting,
    Popped,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum RouteEvent {
    Settled,
    Dismissed(ExitState),
    Popped,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct RouteSetup {
    pub resting: Rect,
    pub decoy_end: Rect,
    pub bounds: Rect,
    pub anchoring: Anchoring,
    pub has_top_widget: bool,
    pub transition_millis: u64,
    pub reverse_transition_millis: u64,
    pub drag: DragConfig,
    pub barrier: Barrier,
}

pub(crate) struct ContextMenuRoute {
    setup: RouteSetup,
    phase: RoutePhase,
    controller: AnimationController,
    snapshot: GeometrySnapshot,
    layout: Option<MenuLayout>,
    transition: Option<RouteTransition>,
    drag: Option<StaticDragState>,
}

impl ContextMenuRoute {
    pub fn new(setup: RouteSetup) -> Self {
        let mut snapshot = GeometrySnapshot::default();
        snapshot.insert(SnapshotKey::Resting, setup.resting);
        snapshot.insert(SnapshotKey::DecoyEnd, setup.decoy_end);
        Self {
            controller: AnimationController::new(setup.transition_millis)
                .with_reverse_duration(setup.reverse_transition_millis),
            setup,
            phase: RoutePhase::Measuring,
            snapshot,
            layout: None,
            transition: None,
            drag: None,
        }
    }

    pub fn phase(&self) -> RoutePhase {
        self.phase
    }

    /// Transition progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.controller.value()
    }

    pub fn layout(&self) -> Option<&MenuLayout> {
        self.layout.as_ref()
    }

    pub fn drag(&self) -> Option<&StaticDragState> {
        self.drag.as_ref()
    }

    pub fn drag_mut(&mut self) -> Option<&mut StaticDragState> {
        self.drag.as_mut()
    }

    pub fn settled_rect(&self, slot: MenuSlot) -> Option<Rect> {
        self.snapshot.get(&SnapshotKey::Settled(slot)).copied()
    }

    fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            target: self.setup.decoy_end,
            bounds: self.setup.bounds,
            location: self.setup.anchoring.location,
            orientation: self.setup.anchoring.orientation,
            spacing: self.setup.anchoring.spacing,
            has_top_widget: self.setup.has_top_widget,
            actions_max_width: ACTIONS_MAX_WIDTH,
        }
    }

    /// Lays the menu out and records the settled rects in the snapshot.
    pub fn measure(&mut self, measurer: &mut impl SlotMeasurer) -> Result<MenuLayout, LayoutError> {
        let layout = layout_aligned_children(&self.layout_params(), measurer)?;
        for slot in MenuSlot::ALL {
            let key = SnapshotKey::Settled(slot);
            match layout.rect(slot) {
                Some(rect) => {
                    self.snapshot.insert(key, rect);
                }
                None => {
                    self.snapshot.shift_remove(&key);
                }
            }
        }
        self.layout = Some(layout);
        Ok(layout)
    }

    /// Seeds the transition from the snapshot and starts entering. Returns
    /// false if the route was not measuring or had nothing to seed from.
    pub fn start(&mut self) -> bool {
        if self.phase != RoutePhase::Measuring {
            return false;
        }
        let Some(transition) = RouteTransition::seed(&self.snapshot, self.setup.anchoring) else {
            return false;
        };
        if !transition.has(MenuSlot::Preview) {
            return false;
        }
        self.transition = Some(transition);
        self.controller.forward();
        self.phase = RoutePhase::Entering;
        log::debug!("context menu route entering");
        true
    }

    /// Starts the exit transition from `exit`. Returns false when the route
    /// is not entering or settled.
    pub fn dismiss(&mut self, exit: ExitState) -> bool {
        match self.phase {
            RoutePhase::Entering | RoutePhase::Settled => {}
            RoutePhase::Measuring | RoutePhase::Exiting | RoutePhase::Popped => return false,
        }
        if let Some(transition) = self.transition.as_mut() {
            transition.set_exit(exit);
        }
        self.drag = None;
        self.controller.reverse();
        self.phase = RoutePhase::Exiting;
        log::debug!(
            "context menu dismissed at scale {:.3}, sheet opacity {:.3}",
            exit.scale,
            exit.sheet_opacity
        );
        true
    }

    pub fn needs_tick(&self) -> bool {
        match self.phase {
            RoutePhase::Entering | RoutePhase::Exiting => self.controller.needs_tick(),
            RoutePhase::Settled => self.drag.as_ref().is_some_and(StaticDragState::needs_tick),
            RoutePhase::Measuring | RoutePhase::Popped => false,
        }
    }

    pub fn tick(&mut self, frame_time_nanos: u64) -> Option<RouteEvent> {
        match self.phase {
            RoutePhase::Entering => {
                if self.controller.tick(frame_time_nanos).completed() {
                    self.phase = RoutePhase::Settled;
                    self.drag = Some(StaticDragState::new(self.setup.drag));
                    log::debug!("context menu route settled");
                    return Some(RouteEvent::Settled);
                }
                None
            }
            RoutePhase::Settled => {
                let outcome = self.drag.as_mut()?.tick(frame_time_nanos)?;
                let DragOutcome::Dismiss(exit) = outcome;
                self.dismiss(exit);
                Some(RouteEvent::Dismissed(exit))
            }
            RoutePhase::Exiting => {
                if self.controller.tick(frame_time_nanos).dismissed() {
                    self.phase = RoutePhase::Popped;
                    log::debug!("context menu route popped");
                    return Some(RouteEvent::Popped);
                }
                None
            }
            RoutePhase::Measuring | RoutePhase::Popped => None,
        }
    }

    /// Re-runs the layout for new bounds while settled. The drag state is
    /// reset since its offsets refer to the old layout.
    pub fn relayout(
        &mut self,
        bounds: Rect,
        orientation: Orientation,
        measurer: &mut impl SlotMeasurer,
    ) -> Result<MenuLayout, LayoutError> {
        let previous = (self.setup.bounds, self.setup.anchoring.orientation);
        self.setup.bounds = bounds;
        self.setup.anchoring.orientation = orientation;
        match self.measure(measurer) {
            Ok(layout) => {
                self.transition = RouteTransition::seed(&self.snapshot, self.setup.anchoring);
                if self.phase == RoutePhase::Settled {
                    self.drag = Some(StaticDragState::new(self.setup.drag));
                }
                Ok(layout)
            }
            Err(err) => {
                (self.setup.bounds, self.setup.anchoring.orientation) = previous;
                Err(err)
            }
        }
    }

    pub fn barrier_frame(&self) -> Option<BarrierFrame> {
        match self.phase {
            RoutePhase::Measuring | RoutePhase::Popped => None,
            RoutePhase::Entering => Some(self.setup.barrier.frame(self.progress(), false)),
            RoutePhase::Settled => Some(self.setup.barrier.settled()),
            RoutePhase::Exiting => Some(self.setup.barrier.frame(self.progress(), true)),
        }
    }

    /// Positioned elements for the current phase.
    pub fn elements(&self) -> Elements {
        match self.phase {
            RoutePhase::Measuring => self.settled_elements(ExitState::REST),
            RoutePhase::Settled => {
                let state = self.drag.as_ref().map_or(ExitState::REST, StaticDragState::exit_state);
                self.settled_elements(state)
            }
            RoutePhase::Entering | RoutePhase::Exiting => self
                .transition
                .as_ref()
                .map(|transition| {
                    transition.elements(self.progress(), self.phase == RoutePhase::Exiting)
                })
                .unwrap_or_default(),
            RoutePhase::Popped => Elements::new(),
        }
    }

    fn settled_elements(&self, state: ExitState) -> Elements {
        MenuSlot::ALL
            .iter()
            .filter_map(|&slot| {
                let settled = self.settled_rect(slot)?;
                let element = match slot {
                    MenuSlot::Preview => PositionedElement {
                        key: slot,
                        rect: settled.scale_about_center(state.scale).shift(state.offset),
                        layer: GraphicsLayer::IDENTITY,
                    },
                    MenuSlot::Actions | MenuSlot::TopWidget => PositionedElement {
                        key: slot,
                        rect: settled.shift(state.offset),
                        layer: GraphicsLayer::IDENTITY
                            .with_alpha(state.sheet_opacity)
                            .with_scale(state.sheet_opacity),
                    },
                };
                Some(element)
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../tests/route_tests.rs"]
mod tests;
