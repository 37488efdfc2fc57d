use peekmenu::prelude::*;
use peekmenu::ContextMenuAction;
use peekmenu_testing::MenuTestRule;
use peekmenu_ui_graphics::Point;

fn opened_rule() -> MenuTestRule {
    let config = MenuConfig::builder()
        .actions([ContextMenuAction::new("Copy"), ContextMenuAction::new("Share")])
        .build()
        .expect("valid config");
    let mut rule = MenuTestRule::new(config).expect("rule");
    rule.open_by_long_press();
    assert_eq!(rule.menu().phase(), MenuPhase::Route(RoutePhase::Settled));
    rule
}

fn preview_center(rule: &MenuTestRule) -> Point {
    rule.element_rect(MenuSlot::Preview)
        .expect("preview painted")
        .center()
}

#[test]
fn slow_drag_to_the_limit_dismisses_at_min_scale() {
    let mut rule = opened_rule();
    let start = preview_center(&rule);

    let end = rule.drag_by(start, Point::new(0.0, 80.0), 4, 17);
    let drag = rule.menu().drag_state().expect("dragging");
    assert_eq!(drag.offset, Point::new(0.0, 80.0));
    assert_eq!(drag.scale, 0.8);

    rule.advance_by_millis(100);
    rule.pointer_up(end);
    assert_eq!(rule.menu().phase(), MenuPhase::Route(RoutePhase::Exiting));
    let exit = rule.menu().last_dismissal().expect("dismissed");
    assert_eq!(exit.scale, 0.8);
    assert_eq!(exit.offset, Point::new(0.0, 80.0));

    rule.pump_until_idle();
    assert!(!rule.menu().is_open());
    assert_eq!(rule.menu().phase(), MenuPhase::Idle);
    assert!(rule.scene().route.is_none());
}

#[test]
fn short_slow_drag_snaps_back() {
    let mut rule = opened_rule();
    let start = preview_center(&rule);
    let end = rule.drag_by(start, Point::new(0.0, 30.0), 3, 17);
    rule.advance_by_millis(100);
    rule.pointer_up(end);
    rule.pump_until_idle();

    assert!(rule.menu().is_open());
    assert_eq!(rule.menu().phase(), MenuPhase::Route(RoutePhase::Settled));
    let drag = rule.menu().drag_state().expect("settled drag state");
    assert_eq!(drag.offset, Point::ZERO);
    assert_eq!(drag.scale, 1.0);
    assert!(rule.menu().last_dismissal().is_none());
}

#[test]
fn quick_downward_fling_dismisses_after_the_fling() {
    let mut rule = opened_rule();
    let start = preview_center(&rule);
    let end = rule.drag_by(start, Point::new(0.0, 20.0), 2, 17);
    rule.pointer_up(end);

    assert_eq!(rule.menu().phase(), MenuPhase::Route(RoutePhase::Settled));
    rule.advance_frame();
    rule.advance_frame();
    assert_eq!(
        rule.menu().phase(),
        MenuPhase::Route(RoutePhase::Settled),
        "the fling finishes before the route reverses"
    );
    assert!(rule.menu().last_dismissal().is_none());

    rule.advance_by_millis(100);
    assert_eq!(rule.menu().phase(), MenuPhase::Route(RoutePhase::Exiting));
    let exit = rule.menu().last_dismissal().expect("dismissed");
    assert!((exit.offset.y - 120.0).abs() < 1e-3);
    assert_eq!(exit.offset.x, 0.0);

    rule.pump_until_idle();
    assert!(!rule.menu().is_open());
}

#[test]
fn upward_drag_is_damped() {
    let mut rule = opened_rule();
    let start = preview_center(&rule);
    rule.drag_by(start, Point::new(0.0, -200.0), 4, 17);

    let drag = rule.menu().drag_state().expect("dragging");
    assert!((drag.offset.y + 10.0).abs() < 1e-3);
    assert!((drag.scale - 0.875).abs() < 1e-4);
    let preview = rule.element_rect(MenuSlot::Preview).expect("preview");
    assert!(preview.center().y < start.y);
}

#[test]
fn horizontal_drag_is_clamped_to_padding() {
    let mut rule = opened_rule();
    let start = preview_center(&rule);
    rule.drag_by(start, Point::new(800.0, 0.0), 4, 17);

    let drag = rule.menu().drag_state().expect("dragging");
    assert_eq!(drag.offset.x, 20.0);
    assert_eq!(drag.scale, 1.0);
}

#[test]
fn dragging_hides_the_sheet_and_top_widget() {
    let mut rule = opened_rule();
    let start = preview_center(&rule);
    rule.drag_by(start, Point::new(0.0, 60.0), 3, 17);
    rule.advance_by_millis(150);

    let scene = rule.scene().route.clone().expect("route scene");
    let sheet = scene.element(MenuSlot::Actions).expect("sheet element");
    assert!(sheet.layer.alpha < 0.05);
    let preview = scene.element(MenuSlot::Preview).expect("preview element");
    assert!(preview.rect.width < 115.0);
}

#[test]
fn pointer_cancel_snaps_back() {
    let mut rule = opened_rule();
    let start = preview_center(&rule);
    let end = rule.drag_by(start, Point::new(0.0, 80.0), 4, 17);
    rule.pointer_cancel(end);
    rule.pump_until_idle();

    assert!(rule.menu().is_open());
    let drag = rule.menu().drag_state().expect("settled drag state");
    assert_eq!(drag.offset, Point::ZERO);
}
