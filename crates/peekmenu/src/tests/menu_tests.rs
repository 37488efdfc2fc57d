use super::*;
use crate::config::ContextMenuAction;
use peekmenu_core::Runtime;
use peekmenu_ui_graphics::{Point, Size};

const FRAME: u64 = 16_666_667;

struct StubHost {
    preview: Cell<Option<Size>>,
    haptics: Cell<usize>,
}

impl StubHost {
    fn new(preview: Option<Size>) -> Rc<Self> {
        Rc::new(Self {
            preview: Cell::new(preview),
            haptics: Cell::new(0),
        })
    }
}

impl MenuHost for StubHost {
    fn viewport(&self) -> Viewport {
        Viewport::new(Size::new(400.0, 800.0))
    }

    fn child_rect(&self) -> Option<Rect> {
        Some(Rect::new(150.0, 300.0, 100.0, 100.0))
    }

    fn measure(&self, slot: MenuSlot, constraints: Constraints) -> Option<Size> {
        match slot {
            MenuSlot::Preview => self.preview.get().map(|size| constraints.constrain(size)),
            MenuSlot::TopWidget | MenuSlot::Actions => None,
        }
    }

    fn haptic_feedback(&self) {
        self.haptics.set(self.haptics.get() + 1);
    }
}

fn config() -> MenuConfig {
    MenuConfig::builder()
        .action(ContextMenuAction::new("Copy"))
        .enable_haptic_feedback(true)
        .build()
        .expect("valid config")
}

fn run_frames(runtime: &Runtime, menu: &ContextMenu, time: &mut u64, frames: usize) {
    let handle = runtime.handle();
    for _ in 0..frames {
        *time += FRAME;
        handle.begin_frame(*time);
        let _ = menu.scene();
        handle.end_frame();
    }
}

#[test]
fn invalid_config_is_rejected() {
    let runtime = Runtime::new();
    let mut config = config();
    config.actions.clear();
    let err = ContextMenu::new(config, StubHost::new(None), runtime.handle()).expect_err("empty");
    assert_eq!(err, MenuError::NoActions);
}

#[test]
fn layout_failure_abandons_the_open_and_restores_the_child() {
    let runtime = Runtime::new();
    let host = StubHost::new(None);
    let menu = ContextMenu::new(config(), host.clone(), runtime.handle()).expect("menu");
    let mut time = 0;

    menu.on_pointer_event(PointerEvent::down(Point::new(200.0, 350.0), 0));
    assert_eq!(menu.phase(), MenuPhase::Pressing);
    run_frames(&runtime, &menu, &mut time, 60);

    assert_eq!(menu.phase(), MenuPhase::Idle);
    assert!(!menu.is_open());
    let scene = menu.scene();
    assert!(!scene.child_hidden);
    assert!(scene.decoy.is_none());
    assert!(scene.route.is_none());
    assert_eq!(host.haptics.get(), 1);
    assert!(!runtime.needs_frame());
}

#[test]
fn changing_the_hold_cancels_a_running_press() {
    let runtime = Runtime::new();
    let menu = ContextMenu::new(config(), StubHost::new(None), runtime.handle()).expect("menu");
    let mut time = 0;

    menu.on_pointer_event(PointerEvent::down(Point::new(200.0, 350.0), 0));
    run_frames(&runtime, &menu, &mut time, 5);
    assert!(menu.scene().decoy.is_some());

    let mut longer = config();
    longer.preview_long_press_timeout_millis = 1_200;
    menu.set_config(longer).expect("valid");
    assert_eq!(menu.phase(), MenuPhase::Idle);
    assert!(menu.scene().decoy.is_none());
    assert!((menu.scene().progress - 0.0).abs() < f32::EPSILON);
    assert_eq!(menu.config().preview_long_press_timeout_millis, 1_200);
}

#[test]
fn set_config_validates() {
    let runtime = Runtime::new();
    let menu = ContextMenu::new(config(), StubHost::new(None), runtime.handle()).expect("menu");
    let mut broken = config();
    broken.backdrop_blur_sigma = -3.0;
    assert_eq!(menu.set_config(broken), Err(MenuError::NegativeBlurSigma(-3.0)));
    assert_eq!(menu.config().backdrop_blur_sigma, 5.0);
}

#[test]
fn pointer_outside_the_child_is_ignored() {
    let runtime = Runtime::new();
    let menu = ContextMenu::new(config(), StubHost::new(None), runtime.handle()).expect("menu");
    menu.on_pointer_event(PointerEvent::down(Point::new(20.0, 20.0), 0));
    assert_eq!(menu.phase(), MenuPhase::Idle);
    assert!(!runtime.needs_frame());
}

#[test]
fn handle_outliving_its_menu_is_inert() {
    let runtime = Runtime::new();
    let menu = ContextMenu::new(
        config(),
        StubHost::new(Some(Size::new(115.0, 115.0))),
        runtime.handle(),
    )
    .expect("menu");
    let handle = menu.handle();
    assert!(handle.is_attached());
    drop(menu);

    assert!(!handle.is_attached());
    handle.open();
    assert!(!runtime.needs_frame());
    assert!(!handle.is_open());
}

#[test]
fn dropping_the_menu_cancels_its_frame_callback() {
    let runtime = Runtime::new();
    let menu = ContextMenu::new(config(), StubHost::new(None), runtime.handle()).expect("menu");
    menu.on_pointer_event(PointerEvent::down(Point::new(200.0, 350.0), 0));
    assert!(runtime.needs_frame());
    drop(menu);
    assert!(!runtime.needs_frame());
}

#[test]
fn sliding_off_the_child_frees_the_pointer_for_a_new_press() {
    let runtime = Runtime::new();
    let menu = ContextMenu::new(config(), StubHost::new(None), runtime.handle()).expect("menu");
    let mut time = 0;

    menu.on_pointer_event(PointerEvent::down(Point::new(200.0, 350.0), 0));
    run_frames(&runtime, &menu, &mut time, 5);
    menu.on_pointer_event(PointerEvent::moved(Point::new(240.0, 350.0), 80));
    run_frames(&runtime, &menu, &mut time, 60);
    assert_eq!(menu.phase(), MenuPhase::Idle);

    // The up for the first pointer never arrived.
    menu.on_pointer_event(PointerEvent::down(Point::new(200.0, 350.0), 1_100));
    assert_eq!(menu.phase(), MenuPhase::Pressing);
}
