//! The context menu: press, decoy, route and action sheet wired to a host
//! and a frame runtime.
//!
//! All mutable state lives in one `RefCell` owned through an `Rc`. Frame and
//! post-frame callbacks hold a `Weak` to it and do nothing once the menu has
//! been dropped. Host calls, observers and action handlers never run while
//! the state is borrowed mutably, except for the host queries made during
//! layout, which must not call back into the menu.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use peekmenu_core::{FrameCallbackId, MutableState, RuntimeHandle, State};
use peekmenu_foundation::{
    PanEvent, PanGesture, PointerEvent, PointerEventKind, TapEvent, TapGesture,
};
use peekmenu_ui_graphics::{CornerRadii, Rect};
use peekmenu_ui_layout::{
    fit_scale_factor, infer_location, safe_bounds, scaled_rect_within, Constraints, MenuLayout,
    MenuSlot,
};

use crate::action_sheet::ActionSheet;
use crate::config::{
    MenuConfig, PreviewPaint, PreviewSource, DEFAULT_END_BOX_SHADOW,
    DEFAULT_PREVIEW_BORDER_RADIUS_RATIO,
};
use crate::decoy::Decoy;
use crate::drag::{DragOutcome, ExitState};
use crate::handle::MenuHandle;
use crate::host::{MenuHost, Viewport};
use crate::press::{PressController, PressInput};
use crate::route::{Anchoring, Barrier, ContextMenuRoute, RouteEvent, RoutePhase, RouteSetup};
use crate::scene::{MenuScene, RouteScene};
use crate::MenuError;

/// Coarse state of the whole menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuPhase {
    Idle,
    /// The long-press timer is running or falling back.
    Pressing,
    Route(RoutePhase),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum HandleCommand {
    Open,
    Close,
}

/// Where the current pointer sequence goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PointerTarget {
    Press,
    Preview,
    Sheet,
    Barrier,
}

/// Work that has to happen after the state borrow is released.
#[derive(Default)]
struct Effects {
    open_changed: Option<bool>,
    pressed_action: Option<Rc<dyn Fn()>>,
    haptic: bool,
    /// Open cycle whose tweens are seeded once the frame has rendered.
    seed_cycle: Option<u64>,
}

pub(crate) struct MenuShared {
    state: RefCell<MenuState>,
    host: Rc<dyn MenuHost>,
    runtime: RuntimeHandle,
    is_open: MutableState<bool>,
    pending: Cell<Option<HandleCommand>>,
}

struct MenuState {
    config: MenuConfig,
    press: PressController,
    decoy: Option<Decoy>,
    resting: Option<Rect>,
    route: Option<ContextMenuRoute>,
    sheet: ActionSheet,
    target: Option<PointerTarget>,
    preview_pan: PanGesture,
    barrier_tap: TapGesture,
    frame_callback: Option<FrameCallbackId>,
    cycle: u64,
    last_dismissal: Option<ExitState>,
}

pub struct ContextMenu {
    shared: Rc<MenuShared>,
}

impl ContextMenu {
    pub fn new(
        config: MenuConfig,
        host: Rc<dyn MenuHost>,
        runtime: RuntimeHandle,
    ) -> Result<Self, MenuError> {
        config.validate()?;
        let state = MenuState {
            press: PressController::new(
                config.preview_long_press_timeout_millis,
                config.modal_transition_duration_millis,
            ),
            sheet: ActionSheet::new(&config),
            config,
            decoy: None,
            resting: None,
            route: None,
            target: None,
            preview_pan: PanGesture::new(),
            barrier_tap: TapGesture::new(),
            frame_callback: None,
            cycle: 0,
            last_dismissal: None,
        };
        Ok(Self {
            shared: Rc::new(MenuShared {
                state: RefCell::new(state),
                host,
                runtime,
                is_open: MutableState::new(false),
                pending: Cell::new(None),
            }),
        })
    }

    pub fn handle(&self) -> MenuHandle {
        MenuHandle::new(Rc::downgrade(&self.shared), self.shared.is_open.clone())
    }

    pub fn is_open(&self) -> bool {
        self.shared.is_open.get()
    }

    pub fn open_state(&self) -> State<bool> {
        self.shared.is_open.as_state()
    }

    pub fn phase(&self) -> MenuPhase {
        self.shared.state.borrow().phase()
    }

    /// Where the menu was when it was last dismissed.
    pub fn last_dismissal(&self) -> Option<ExitState> {
        self.shared.state.borrow().last_dismissal
    }

    /// Drag offset, scale and sheet visibility of the settled menu.
    pub fn drag_state(&self) -> Option<ExitState> {
        let state = self.shared.state.borrow();
        state.route.as_ref()?.drag().map(|drag| drag.exit_state())
    }

    /// The laid-out rects of the current open cycle.
    pub fn layout(&self) -> Option<MenuLayout> {
        let state = self.shared.state.borrow();
        state.route.as_ref()?.layout().copied()
    }

    pub fn config(&self) -> MenuConfig {
        self.shared.state.borrow().config.clone()
    }

    /// Replaces the configuration. Changing the hold or transition duration
    /// rebuilds the press timer and cancels a press in flight.
    pub fn set_config(&self, config: MenuConfig) -> Result<(), MenuError> {
        config.validate()?;
        {
            let mut state = self.shared.state.borrow_mut();
            let timeline_changed = state.config.preview_long_press_timeout_millis
                != config.preview_long_press_timeout_millis
                || state.config.modal_transition_duration_millis
                    != config.modal_transition_duration_millis;
            if timeline_changed {
                if state.route.is_none() {
                    state.decoy = None;
                    state.resting = None;
                    if state.target == Some(PointerTarget::Press) {
                        state.target = None;
                    }
                }
                state.press = PressController::new(
                    config.preview_long_press_timeout_millis,
                    config.modal_transition_duration_millis,
                );
                log::debug!(
                    "press timeline rebuilt, open fraction {:.3}",
                    state.press.open_fraction()
                );
            }
            let viewport_height = state
                .route
                .as_ref()
                .and_then(|route| route.settled_rect(MenuSlot::Actions))
                .map_or(0.0, |rect| rect.height);
            state.sheet = ActionSheet::new(&config);
            state.sheet.set_viewport_height(viewport_height);
            state.config = config;
        }
        schedule(&self.shared);
        Ok(())
    }

    /// Routes a pointer event from the host.
    pub fn on_pointer_event(&self, event: PointerEvent) {
        let effects = {
            let mut state = self.shared.state.borrow_mut();
            state.on_pointer(&event, &*self.shared.host)
        };
        apply_effects(&self.shared, effects);
        schedule(&self.shared);
    }

    /// Lays the open menu out again after the viewport changed.
    pub fn on_viewport_changed(&self) {
        let effects = {
            let mut state = self.shared.state.borrow_mut();
            state.relayout(&*self.shared.host)
        };
        apply_effects(&self.shared, effects);
        schedule(&self.shared);
    }

    /// The frame to paint. Call between `begin_frame` and `end_frame`.
    pub fn scene(&self) -> MenuScene {
        let viewport = self.shared.host.viewport();
        self.shared.state.borrow().scene(viewport)
    }
}

impl Drop for ContextMenu {
    fn drop(&mut self) {
        if let Some(id) = self.shared.state.borrow_mut().frame_callback.take() {
            self.shared.runtime.cancel_frame_callback(id);
        }
    }
}

impl std::fmt::Debug for ContextMenu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextMenu")
            .field("phase", &self.phase())
            .field("is_open", &self.is_open())
            .finish()
    }
}

/// Queues a handle command for the next frame. Only the first of several
/// commands issued before that frame registers a callback; the last one wins.
pub(crate) fn request(shared: &Rc<MenuShared>, command: HandleCommand) {
    if shared.pending.replace(Some(command)).is_some() {
        return;
    }
    let weak = Rc::downgrade(shared);
    let registered = shared.runtime.register_frame_callback(move |frame_time_nanos| {
        if let Some(shared) = weak.upgrade() {
            run_pending(&shared, frame_time_nanos);
        }
    });
    if registered.is_none() {
        log::warn!("runtime is gone, dropping {command:?}");
        shared.pending.set(None);
    }
}

fn run_pending(shared: &Rc<MenuShared>, _frame_time_nanos: u64) {
    let Some(command) = shared.pending.take() else {
        return;
    };
    let effects = {
        let mut state = shared.state.borrow_mut();
        match command {
            HandleCommand::Open => state.open_now(&*shared.host),
            HandleCommand::Close => state.close_now(),
        }
    };
    apply_effects(shared, effects);
    schedule(shared);
}

fn on_frame(shared: &Rc<MenuShared>, frame_time_nanos: u64) {
    let effects = {
        let mut state = shared.state.borrow_mut();
        state.frame_callback = None;
        state.on_frame(frame_time_nanos, &*shared.host)
    };
    apply_effects(shared, effects);
    schedule(shared);
}

fn on_post_frame(shared: &Rc<MenuShared>, cycle: u64) {
    let effects = shared.state.borrow_mut().seed(cycle);
    apply_effects(shared, effects);
    schedule(shared);
}

fn schedule(shared: &Rc<MenuShared>) {
    let mut state = shared.state.borrow_mut();
    if state.frame_callback.is_some() || !state.needs_tick() {
        return;
    }
    let weak: Weak<MenuShared> = Rc::downgrade(shared);
    state.frame_callback = shared.runtime.register_frame_callback(move |frame_time_nanos| {
        if let Some(shared) = weak.upgrade() {
            on_frame(&shared, frame_time_nanos);
        }
    });
}

fn apply_effects(shared: &Rc<MenuShared>, effects: Effects) {
    if effects.haptic {
        shared.host.haptic_feedback();
    }
    if let Some(cycle) = effects.seed_cycle {
        let weak = Rc::downgrade(shared);
        shared.runtime.add_post_frame_callback(move |_| {
            if let Some(shared) = weak.upgrade() {
                on_post_frame(&shared, cycle);
            }
        });
    }
    if let Some(open) = effects.open_changed {
        shared.is_open.set(open);
    }
    if let Some(handler) = effects.pressed_action {
        handler();
    }
}

impl MenuState {
    fn phase(&self) -> MenuPhase {
        match &self.route {
            Some(route) => MenuPhase::Route(route.phase()),
            None if self.press.is_active() || self.decoy.is_some() => MenuPhase::Pressing,
            None => MenuPhase::Idle,
        }
    }

    fn needs_tick(&self) -> bool {
        match &self.route {
            Some(route) => route.needs_tick(),
            None => self.press.needs_tick(),
        }
    }

    fn on_frame(&mut self, frame_time_nanos: u64, host: &dyn MenuHost) -> Effects {
        let mut effects = Effects::default();
        log::trace!("menu frame at {frame_time_nanos}ns, phase {:?}", self.phase());

        if self.route.is_none() {
            let tick = self.press.tick(frame_time_nanos);
            if tick.accepted && self.config.enable_haptic_feedback {
                effects.haptic = true;
            }
            if tick.completed {
                self.push_route(host, &mut effects);
            } else if tick.dismissed && !self.press.is_active() {
                self.decoy = None;
                self.resting = None;
            }
        }

        let event = self
            .route
            .as_mut()
            .and_then(|route| route.tick(frame_time_nanos));
        match event {
            Some(RouteEvent::Settled) | None => {}
            Some(RouteEvent::Dismissed(exit)) => self.last_dismissal = Some(exit),
            Some(RouteEvent::Popped) => self.pop(&mut effects),
        }
        effects
    }

    fn pop(&mut self, effects: &mut Effects) {
        self.route = None;
        self.decoy = None;
        self.resting = None;
        self.target = None;
        self.press.reset();
        self.sheet.reset_gestures();
        self.preview_pan.reset();
        self.barrier_tap.reset();
        effects.open_changed = Some(false);
    }

    /// The rect the decoy grows to and the preview starts from.
    fn decoy_end(&self, resting: Rect, viewport: &Viewport) -> Rect {
        if !self.config.show_grow_animation {
            return resting;
        }
        let bounds = safe_bounds(viewport.size, viewport.safe_area, self.config.edge_padding);
        let factor = fit_scale_factor(
            resting.size(),
            bounds,
            self.config.open_scale,
            self.config.min_scale_factor,
        );
        scaled_rect_within(resting, bounds, factor)
    }

    fn push_route(&mut self, host: &dyn MenuHost, effects: &mut Effects) {
        let Some(resting) = self.resting.or_else(|| host.child_rect()) else {
            log::warn!("child is not mounted, skipping open");
            self.decoy = None;
            self.press.reset();
            return;
        };
        let viewport = host.viewport();
        let decoy_end = self
            .decoy
            .as_ref()
            .map_or_else(|| self.decoy_end(resting, &viewport), Decoy::end_rect);
        let config = &self.config;
        let setup = RouteSetup {
            resting,
            decoy_end,
            bounds: safe_bounds(viewport.size, viewport.safe_area, config.edge_padding),
            anchoring: Anchoring {
                location: config
                    .location
                    .unwrap_or_else(|| infer_location(resting, viewport.size.width)),
                orientation: viewport.orientation(),
                spacing: config.layout_spacing,
            },
            has_top_widget: config.top_widget,
            transition_millis: config.modal_transition_duration_millis,
            reverse_transition_millis: config.reverse_transition_duration_millis,
            drag: config.drag,
            barrier: Barrier {
                color: config.barrier_color,
                blur_sigma: config.backdrop_blur_sigma,
                curve: config.blur_curve,
                reverse_curve: config.blur_reverse_curve,
            },
        };

        let mut route = ContextMenuRoute::new(setup);
        let sheet = &self.sheet;
        let mut measurer = |slot: MenuSlot, constraints: Constraints| match slot {
            MenuSlot::Actions => Some(sheet.measure(constraints)),
            MenuSlot::Preview | MenuSlot::TopWidget => {
                let size = host.measure(slot, constraints);
                if size.is_none() && slot == MenuSlot::TopWidget {
                    log::warn!("top widget is not mounted, laying out without it");
                }
                size
            }
        };
        let layout = match route.measure(&mut measurer) {
            Ok(layout) => layout,
            Err(err) => {
                log::error!("abandoning context menu open: {err}");
                self.decoy = None;
                self.resting = None;
                self.press.reset();
                return;
            }
        };
        self.sheet.set_viewport_height(layout.actions.height);
        self.cycle += 1;
        self.route = Some(route);
        effects.open_changed = Some(true);
        effects.seed_cycle = Some(self.cycle);
        log::debug!(
            "context menu route pushed, cycle {}, preview at {:?}",
            self.cycle,
            layout.preview
        );
    }

    /// Post-frame pass of the push frame: the offstage layout has rendered,
    /// so the transition can start from it.
    fn seed(&mut self, cycle: u64) -> Effects {
        let mut effects = Effects::default();
        if cycle != self.cycle {
            return effects;
        }
        let Some(route) = self.route.as_mut() else {
            return effects;
        };
        if route.phase() != RoutePhase::Measuring {
            return effects;
        }
        let started = route.start();
        self.decoy = None;
        self.press.reset();
        if !started {
            log::error!("nothing to animate from, abandoning context menu open");
            self.pop(&mut effects);
        }
        effects
    }

    fn open_now(&mut self, host: &dyn MenuHost) -> Effects {
        let mut effects = Effects::default();
        if self.route.is_some() {
            log::debug!("open ignored, menu already open");
            return effects;
        }
        self.decoy = None;
        self.target = None;
        self.press.reset();
        self.resting = host.child_rect();
        self.push_route(host, &mut effects);
        effects
    }

    fn close_now(&mut self) -> Effects {
        let mut effects = Effects::default();
        let Some(route) = self.route.as_mut() else {
            if self.press.is_active() {
                self.press.cancel();
                self.target = None;
            }
            return effects;
        };
        match route.phase() {
            RoutePhase::Measuring => self.pop(&mut effects),
            RoutePhase::Entering | RoutePhase::Settled => {
                let exit = route.drag().map_or(ExitState::REST, |drag| drag.exit_state());
                if route.dismiss(exit) {
                    self.last_dismissal = Some(exit);
                }
            }
            RoutePhase::Exiting | RoutePhase::Popped => {}
        }
        effects
    }

    fn dismiss_settled(&mut self) {
        let Some(route) = self.route.as_mut() else {
            return;
        };
        let exit = route.drag().map_or(ExitState::REST, |drag| drag.exit_state());
        if route.dismiss(exit) {
            self.last_dismissal = Some(exit);
        }
    }

    fn hit_target(&self, event: &PointerEvent, host: &dyn MenuHost) -> Option<PointerTarget> {
        let Some(route) = &self.route else {
            let child = self.resting.or_else(|| host.child_rect())?;
            let starts_press = !self.press.is_accepted() && child.contains_point(event.position);
            return starts_press.then_some(PointerTarget::Press);
        };
        if route.phase() != RoutePhase::Settled {
            return None;
        }
        let elements = route.elements();
        let hit = |slot: MenuSlot| {
            elements
                .iter()
                .any(|element| element.key == slot && element.rect.contains_point(event.position))
        };
        if hit(MenuSlot::Actions) {
            Some(PointerTarget::Sheet)
        } else if hit(MenuSlot::Preview) {
            Some(PointerTarget::Preview)
        } else if hit(MenuSlot::TopWidget) {
            None
        } else {
            Some(PointerTarget::Barrier)
        }
    }

    fn on_pointer(&mut self, event: &PointerEvent, host: &dyn MenuHost) -> Effects {
        let mut effects = Effects::default();
        if event.kind == PointerEventKind::Down {
            if self.target.is_some() {
                return effects;
            }
            self.target = self.hit_target(event, host);
            if self.target == Some(PointerTarget::Press) {
                self.begin_press(host);
            }
        }

        match self.target {
            Some(PointerTarget::Press) => {
                // A press that slid off stops tracking the rest of this pointer.
                if self.press.on_pointer(event) == PressInput::Released {
                    self.target = None;
                }
            }
            Some(PointerTarget::Preview) => self.drag_preview(event),
            Some(PointerTarget::Sheet) => {
                let sheet = self
                    .route
                    .as_ref()
                    .and_then(|route| {
                        route
                            .elements()
                            .into_iter()
                            .find(|element| element.key == MenuSlot::Actions)
                    })
                    .map(|element| element.rect);
                if let Some(index) = sheet.and_then(|rect| self.sheet.on_pointer(event, rect)) {
                    let action = self.sheet.actions().get(index);
                    log::debug!("action {index} pressed");
                    effects.pressed_action = action.and_then(|action| action.on_pressed.clone());
                    if self.config.dismiss_on_action {
                        self.dismiss_settled();
                    }
                }
            }
            Some(PointerTarget::Barrier) => {
                if let Some(TapEvent::Up(_)) = self.barrier_tap.on_event(event) {
                    log::debug!("barrier tapped");
                    self.dismiss_settled();
                }
            }
            None => {}
        }

        if matches!(event.kind, PointerEventKind::Up | PointerEventKind::Cancel) {
            self.target = None;
        }
        effects
    }

    fn begin_press(&mut self, host: &dyn MenuHost) {
        if self.decoy.is_some() {
            return;
        }
        let Some(resting) = host.child_rect() else {
            return;
        };
        let viewport = host.viewport();
        let end = self.decoy_end(resting, &viewport);
        self.resting = Some(resting);
        self.decoy = Some(Decoy::new(
            resting,
            end,
            host.child_decoration(),
            self.config.preview_long_press_timeout_millis,
            self.config.modal_transition_duration_millis,
            self.config.show_grow_animation,
        ));
    }

    fn drag_preview(&mut self, event: &PointerEvent) {
        let events = self.preview_pan.on_event(event);
        let Some(route) = self.route.as_mut() else {
            return;
        };
        let mut dismissed = None;
        if let Some(drag) = route.drag_mut() {
            for pan in events {
                match pan {
                    PanEvent::Start { .. } => drag.on_pan_start(),
                    PanEvent::Update { delta, .. } => drag.on_pan_update(delta),
                    PanEvent::End { velocity } => {
                        if let Some(DragOutcome::Dismiss(exit)) = drag.on_pan_end(velocity) {
                            dismissed = Some(exit);
                        }
                    }
                    PanEvent::Cancel => drag.on_pan_cancel(),
                }
            }
        }
        if let Some(exit) = dismissed {
            if route.dismiss(exit) {
                self.last_dismissal = Some(exit);
            }
        }
    }

    fn relayout(&mut self, host: &dyn MenuHost) -> Effects {
        let mut effects = Effects::default();
        let Some(route) = self.route.as_mut() else {
            return effects;
        };
        if route.phase() != RoutePhase::Settled {
            return effects;
        }
        let viewport = host.viewport();
        let bounds = safe_bounds(viewport.size, viewport.safe_area, self.config.edge_padding);
        let sheet = &self.sheet;
        let mut measurer = |slot: MenuSlot, constraints: Constraints| match slot {
            MenuSlot::Actions => Some(sheet.measure(constraints)),
            MenuSlot::Preview | MenuSlot::TopWidget => host.measure(slot, constraints),
        };
        match route.relayout(bounds, viewport.orientation(), &mut measurer) {
            Ok(layout) => {
                log::debug!("context menu relaid out for {:?}", viewport.size);
                self.sheet.set_viewport_height(layout.actions.height);
            }
            Err(err) => {
                log::error!("relayout failed, closing context menu: {err}");
                self.pop(&mut effects);
            }
        }
        effects
    }

    /// Whole-menu progress: the press value, then the route progress mapped
    /// onto `[open_fraction, 1]`.
    fn progress(&self) -> f32 {
        let open_fraction = self.press.open_fraction();
        match &self.route {
            None => self.press.value(),
            Some(route) => match route.phase() {
                RoutePhase::Measuring => open_fraction,
                _ => open_fraction + (1.0 - open_fraction) * route.progress(),
            },
        }
    }

    fn preview_paint(&self, preview: Rect, progress: f32) -> PreviewPaint {
        match &self.config.preview {
            PreviewSource::Builder(builder) => builder(progress),
            PreviewSource::Child => PreviewPaint {
                corner_radii: CornerRadii::uniform(
                    preview.size().shortest_side() / DEFAULT_PREVIEW_BORDER_RADIUS_RATIO,
                ),
                shadow: DEFAULT_END_BOX_SHADOW,
                alpha: 1.0,
            },
        }
    }

    fn scene(&self, viewport: Viewport) -> MenuScene {
        let progress = self.progress();
        let decoy = self.decoy.as_ref().map(|decoy| {
            let paint = match &self.config.preview {
                PreviewSource::Builder(builder) => Some(builder(progress)),
                PreviewSource::Child => None,
            };
            decoy.frame(self.press.value(), paint)
        });
        let route = self.route.as_ref().and_then(|route| {
            let elements = route.elements();
            let rect_of = |slot: MenuSlot| {
                elements
                    .iter()
                    .find(|element| element.key == slot)
                    .map(|element| element.rect)
            };
            let preview_paint = self.preview_paint(rect_of(MenuSlot::Preview)?, progress);
            let actions = self
                .sheet
                .frame(rect_of(MenuSlot::Actions)?, viewport.brightness);
            match route.phase() {
                RoutePhase::Measuring => Some(RouteScene::Offstage { elements }),
                RoutePhase::Entering | RoutePhase::Exiting => Some(RouteScene::Transition {
                    barrier: route.barrier_frame()?,
                    elements,
                    preview_paint,
                    actions,
                }),
                RoutePhase::Settled => Some(RouteScene::Settled {
                    barrier: route.barrier_frame()?,
                    elements,
                    preview_paint,
                    actions,
                }),
                RoutePhase::Popped => None,
            }
        });
        MenuScene {
            child_hidden: self.decoy.is_some() || self.route.is_some(),
            decoy,
            route,
            progress,
        }
    }
}

#[cfg(test)]
#[path = "tests/menu_tests.rs"]
mod tests;
