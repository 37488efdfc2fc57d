use std::cell::Cell;
use std::rc::Rc;

use peekmenu::prelude::*;
use peekmenu::{open_fraction, ContextMenuAction, RouteScene, DEFAULT_BARRIER_COLOR};
use peekmenu_testing::{FakeHost, MenuTestRule};
use peekmenu_ui_graphics::{Point, Rect, Size};

fn assert_near(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}

fn assert_rect_near(actual: Rect, expected: Rect) {
    assert_near(actual.x, expected.x);
    assert_near(actual.y, expected.y);
    assert_near(actual.width, expected.width);
    assert_near(actual.height, expected.height);
}

fn config() -> MenuConfig {
    MenuConfig::builder()
        .actions([
            ContextMenuAction::new("Copy").default_action(),
            ContextMenuAction::new("Share"),
            ContextMenuAction::new("Delete").destructive(),
        ])
        .enable_haptic_feedback(true)
        .build()
        .expect("valid config")
}

#[test]
fn holding_past_the_timeout_opens_the_menu() {
    let mut rule = MenuTestRule::new(config()).expect("rule");
    let center = rule.child_center();
    rule.pointer_down(center);

    rule.advance_by_millis(300);
    assert_eq!(rule.host().haptic_count(), 0);
    assert_eq!(rule.menu().phase(), MenuPhase::Pressing);
    let decoy = rule.scene().decoy.expect("decoy while pressing");
    assert!(decoy.rect.width >= 100.0);
    assert!(rule.scene().child_hidden);

    rule.advance_by_millis(150);
    assert_eq!(rule.host().haptic_count(), 1);
    let midpoint = open_fraction(800, 335) / 2.0;
    assert!((midpoint - 0.352).abs() < 1e-3);
    assert!(rule.scene().progress >= midpoint);
    assert!(!rule.menu().is_open());

    rule.advance_by_millis(450);
    assert_eq!(rule.host().haptic_count(), 1, "haptics fire once");
    assert!(rule.menu().is_open());
    assert_eq!(rule.menu().phase(), MenuPhase::Route(RoutePhase::Entering));
    assert!(rule.scene().decoy.is_none());
    assert!(rule.scene().progress >= open_fraction(800, 335));
}

#[test]
fn push_frame_is_laid_out_offstage_behind_the_decoy() {
    let mut rule = MenuTestRule::new(config()).expect("rule");
    rule.pointer_down(rule.child_center());
    while rule.scene().route.is_none() {
        rule.advance_frame();
        assert!(rule.frame_count() < 100, "route never pushed");
    }

    let scene = rule.scene().clone();
    let Some(RouteScene::Offstage { elements }) = &scene.route else {
        panic!("push frame should be offstage: {:?}", scene.route);
    };
    assert!(scene.decoy.is_some());
    assert_eq!(elements.len(), 2);
    assert_eq!(
        scene.route.as_ref().and_then(|route| route.barrier()),
        None
    );

    rule.advance_frame();
    assert!(rule.scene().decoy.is_none());
    assert!(matches!(rule.scene().route, Some(RouteScene::Transition { .. })));
}

#[test]
fn early_release_never_opens() {
    let mut rule = MenuTestRule::new(config()).expect("rule");
    let center = rule.child_center();
    rule.pointer_down(center);
    rule.advance_by_millis(200);
    rule.pointer_up(center);
    rule.pump_until_idle();

    assert_eq!(rule.menu().phase(), MenuPhase::Idle);
    assert!(!rule.menu().is_open());
    assert_eq!(rule.host().haptic_count(), 0);
    assert!(rule.scene().decoy.is_none());
    assert!(!rule.scene().child_hidden);
}

#[test]
fn settled_menu_paints_barrier_preview_and_sheet() {
    let mut rule = MenuTestRule::new(config()).expect("rule");
    rule.open_by_long_press();

    let scene = rule.scene();
    assert_near(scene.progress, 1.0);
    let Some(RouteScene::Settled {
        barrier,
        preview_paint,
        actions,
        ..
    }) = &scene.route
    else {
        panic!("expected settled scene, got {:?}", scene.route);
    };
    assert_eq!(barrier.color, DEFAULT_BARRIER_COLOR);
    assert_eq!(barrier.blur_sigma, 5.0);
    assert!((preview_paint.corner_radii.top_left - 115.0 / 12.0).abs() < 1e-4);
    assert_eq!(actions.rows.len(), 3);
    assert_eq!(actions.rows[2].label, "Delete");
    assert!(actions.rows[2].is_destructive);

    let layout = rule.menu().layout().expect("layout");
    assert_rect_near(layout.preview, Rect::new(142.5, 292.5, 115.0, 115.0));
    assert_rect_near(layout.actions, Rect::new(75.0, 423.5, 250.0, 168.0));
    assert_rect_near(
        rule.element_rect(MenuSlot::Preview).expect("preview painted"),
        layout.preview,
    );
}

#[test]
fn tapping_the_barrier_dismisses() {
    let mut rule = MenuTestRule::new(config()).expect("rule");
    rule.open_by_long_press();

    rule.tap(Point::new(20.0, 20.0));
    assert_eq!(rule.menu().phase(), MenuPhase::Route(RoutePhase::Exiting));
    rule.pump_until_idle();

    assert!(!rule.menu().is_open());
    assert_eq!(rule.menu().phase(), MenuPhase::Idle);
    assert!(rule.scene().route.is_none());
    assert!(!rule.scene().child_hidden);
}

#[test]
fn tapping_an_action_runs_it_and_closes() {
    let pressed = Rc::new(Cell::new(0));
    let config = MenuConfig::builder()
        .action(ContextMenuAction::new("Copy").on_pressed({
            let pressed = Rc::clone(&pressed);
            move || pressed.set(pressed.get() + 1)
        }))
        .action(ContextMenuAction::new("Share"))
        .build()
        .expect("valid config");
    let mut rule = MenuTestRule::new(config).expect("rule");
    rule.open_by_long_press();

    let sheet = rule.element_rect(MenuSlot::Actions).expect("sheet");
    rule.tap(Point::new(sheet.center().x, sheet.top() + 20.0));
    assert_eq!(pressed.get(), 1);
    assert_eq!(rule.menu().phase(), MenuPhase::Route(RoutePhase::Exiting));
    rule.pump_until_idle();
    assert!(!rule.menu().is_open());
}

#[test]
fn actions_can_keep_the_menu_open() {
    let pressed = Rc::new(Cell::new(0));
    let config = MenuConfig::builder()
        .action(ContextMenuAction::new("Like").on_pressed({
            let pressed = Rc::clone(&pressed);
            move || pressed.set(pressed.get() + 1)
        }))
        .dismiss_on_action(false)
        .build()
        .expect("valid config");
    let mut rule = MenuTestRule::new(config).expect("rule");
    rule.open_by_long_press();

    let sheet = rule.element_rect(MenuSlot::Actions).expect("sheet");
    rule.tap(sheet.center());
    rule.tap(sheet.center());
    assert_eq!(pressed.get(), 2);
    assert_eq!(rule.menu().phase(), MenuPhase::Route(RoutePhase::Settled));
}

#[test]
fn handle_open_and_close_are_idempotent() {
    let mut rule = MenuTestRule::new(config()).expect("rule");
    let opened = Rc::new(Cell::new(0));
    let _subscription = rule.menu().open_state().subscribe({
        let opened = Rc::clone(&opened);
        move |open| {
            if *open {
                opened.set(opened.get() + 1);
            }
        }
    });
    let handle = rule.handle();

    handle.open();
    handle.open();
    assert!(!handle.is_open(), "commands wait for the next frame");
    rule.pump_until_idle();
    assert_eq!(opened.get(), 1);
    assert!(handle.is_open());
    assert_eq!(rule.menu().phase(), MenuPhase::Route(RoutePhase::Settled));
    assert_eq!(rule.host().haptic_count(), 0);

    handle.open();
    rule.pump_until_idle();
    assert_eq!(opened.get(), 1);

    handle.close();
    handle.close();
    rule.pump_until_idle();
    assert!(!handle.is_open());
    assert_eq!(rule.menu().phase(), MenuPhase::Idle);

    handle.close();
    rule.pump_until_idle();
    assert!(!handle.is_open());
    assert_eq!(opened.get(), 1);
}

#[test]
fn last_handle_command_before_a_frame_wins() {
    let mut rule = MenuTestRule::new(config()).expect("rule");
    let handle = rule.handle();
    handle.open();
    handle.close();
    rule.pump_until_idle();
    assert!(!handle.is_open());
    assert_eq!(rule.menu().phase(), MenuPhase::Idle);
}

#[test]
fn programmatic_open_skips_the_decoy() {
    let mut rule = MenuTestRule::new(config()).expect("rule");
    rule.handle().open();
    rule.advance_frame();
    assert!(rule.scene().decoy.is_none());
    assert!(matches!(rule.scene().route, Some(RouteScene::Offstage { .. })));
    rule.pump_until_idle();
    assert!(rule.menu().is_open());
}

#[test]
fn side_children_align_the_menu_to_their_edge() {
    let host = FakeHost::new().with_child(Some(Rect::new(10.0, 300.0, 100.0, 100.0)));
    let mut rule = MenuTestRule::with_host(config(), host).expect("rule");
    rule.open_by_long_press();
    let layout = rule.menu().layout().expect("layout");
    assert_near(layout.preview.left(), 10.0);
    assert_near(layout.actions.left(), 10.0);

    let host = FakeHost::new().with_child(Some(Rect::new(290.0, 300.0, 100.0, 100.0)));
    let mut rule = MenuTestRule::with_host(config(), host).expect("rule");
    rule.open_by_long_press();
    let layout = rule.menu().layout().expect("layout");
    assert_near(layout.preview.right(), 390.0);
    assert_near(layout.actions.right(), 390.0);
}

#[test]
fn explicit_location_overrides_inference() {
    let config = MenuConfig::builder()
        .action(ContextMenuAction::new("Copy"))
        .location(MenuLocation::Center)
        .build()
        .expect("valid config");
    let host = FakeHost::new().with_child(Some(Rect::new(10.0, 300.0, 100.0, 100.0)));
    let mut rule = MenuTestRule::with_host(config, host).expect("rule");
    rule.open_by_long_press();
    let layout = rule.menu().layout().expect("layout");
    assert_near(layout.preview.center().x, layout.actions.center().x);
}

#[test]
fn landscape_places_the_sheet_beside_the_preview() {
    let host = FakeHost::new()
        .with_viewport(Viewport::new(Size::new(800.0, 400.0)))
        .with_child(Some(Rect::new(350.0, 150.0, 100.0, 100.0)));
    let mut rule = MenuTestRule::with_host(config(), host).expect("rule");
    rule.open_by_long_press();
    let layout = rule.menu().layout().expect("layout");
    assert_near(layout.actions.top(), layout.preview.top());
    assert_near(layout.actions.left(), layout.preview.right() + 16.0);
}

#[test]
fn viewport_change_relays_out_the_open_menu() {
    let mut rule = MenuTestRule::new(config()).expect("rule");
    rule.open_by_long_press();
    let portrait = rule.menu().layout().expect("layout");
    assert!(portrait.actions.top() > portrait.preview.bottom());

    rule.host().set_viewport(Viewport::new(Size::new(800.0, 400.0)));
    rule.menu().on_viewport_changed();
    rule.advance_frame();
    let landscape = rule.menu().layout().expect("layout");
    assert_near(landscape.actions.top(), landscape.preview.top());
    assert_rect_near(
        rule.element_rect(MenuSlot::Actions).expect("sheet painted"),
        landscape.actions,
    );
}

#[test]
fn missing_top_widget_is_laid_out_without_it() {
    let config = MenuConfig::builder()
        .action(ContextMenuAction::new("Copy"))
        .top_widget(true)
        .build()
        .expect("valid config");
    let mut rule = MenuTestRule::new(config).expect("rule");
    rule.open_by_long_press();
    assert!(rule.menu().is_open());
    assert!(rule.menu().layout().expect("layout").top_widget.is_none());
    assert!(rule.element_rect(MenuSlot::TopWidget).is_none());
}

#[test]
fn mounted_top_widget_sits_above_the_preview() {
    let config = MenuConfig::builder()
        .action(ContextMenuAction::new("Copy"))
        .top_widget(true)
        .build()
        .expect("valid config");
    let host = FakeHost::new().with_top_widget(Some(Size::new(200.0, 40.0)));
    let mut rule = MenuTestRule::with_host(config, host).expect("rule");
    rule.open_by_long_press();
    let top = rule.element_rect(MenuSlot::TopWidget).expect("top widget");
    let preview = rule.element_rect(MenuSlot::Preview).expect("preview");
    assert_near(top.bottom() + 16.0, preview.top());
}

#[test]
fn builder_preview_follows_whole_menu_progress() {
    let config = MenuConfig::builder()
        .action(ContextMenuAction::new("Copy"))
        .preview(PreviewSource::builder(|progress| PreviewPaint {
            alpha: progress,
            ..PreviewPaint::default()
        }))
        .build()
        .expect("valid config");
    let mut rule = MenuTestRule::new(config).expect("rule");
    rule.pointer_down(rule.child_center());
    rule.advance_by_millis(200);
    let paint = rule.scene().decoy.and_then(|decoy| decoy.paint).expect("builder paint");
    assert_eq!(paint.alpha, rule.scene().progress);

    rule.pump_until_idle();
    let Some(RouteScene::Settled { preview_paint, .. }) = &rule.scene().route else {
        panic!("expected settled scene");
    };
    assert_near(preview_paint.alpha, 1.0);
}
