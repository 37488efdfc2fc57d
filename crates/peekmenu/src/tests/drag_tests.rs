use super::*;

const FRAME: u64 = 16_666_667;

fn drag() -> StaticDragState {
    StaticDragState::new(DragConfig::default())
}

fn drag_by(state: &mut StaticDragState, delta: Point) {
    state.on_pan_start();
    state.on_pan_update(delta);
}

/// Ticks until the state goes idle, returning the first outcome.
fn settle(state: &mut StaticDragState, start: u64) -> Option<DragOutcome> {
    let mut time = start;
    for _ in 0..600 {
        if !state.needs_tick() {
            return None;
        }
        if let Some(outcome) = state.tick(time) {
            return Some(outcome);
        }
        time += FRAME;
    }
    panic!("drag state never went idle");
}

#[test]
fn downward_drag_is_undamped_and_shrinks_preview() {
    let mut state = drag();
    drag_by(&mut state, Point::new(0.0, 40.0));
    assert_eq!(state.offset(), Point::new(0.0, 40.0));
    assert_eq!(state.scale(), 0.8);
    assert!(state.is_dragging());

    let mut state = drag();
    drag_by(&mut state, Point::new(0.0, 10.0));
    assert!((state.scale() - 0.875).abs() < 1e-6);
}

#[test]
fn horizontal_drag_is_damped_and_clamped() {
    let mut state = drag();
    drag_by(&mut state, Point::new(200.0, 0.0));
    assert!((state.offset().x - 10.0).abs() < 1e-6);

    state.on_pan_update(Point::new(2_000.0, 0.0));
    assert_eq!(state.offset().x, 20.0);
    assert_eq!(state.scale(), 1.0);

    let mut state = drag();
    drag_by(&mut state, Point::new(-5_000.0, 0.0));
    assert_eq!(state.offset().x, -20.0);
}

#[test]
fn upward_drag_is_damped() {
    let mut state = drag();
    drag_by(&mut state, Point::new(0.0, -80.0));
    assert!((state.offset().y + 4.0).abs() < 1e-6);
    assert!((state.scale() - 0.95).abs() < 1e-6);
}

#[test]
fn slow_release_at_max_distance_dismisses() {
    let mut state = drag();
    drag_by(&mut state, Point::new(0.0, 80.0));
    assert_eq!(state.scale(), 0.8);

    let outcome = state.on_pan_end(Velocity::ZERO);
    let Some(DragOutcome::Dismiss(exit)) = outcome else {
        panic!("expected a dismissal, got {outcome:?}");
    };
    assert_eq!(exit.scale, 0.8);
    assert_eq!(exit.offset, Point::new(0.0, 80.0));
}

#[test]
fn short_release_snaps_back_to_rest() {
    let mut state = drag();
    drag_by(&mut state, Point::new(30.0, 12.0));
    assert!(state.scale() < 1.0);
    assert_eq!(state.on_pan_end(Velocity::ZERO), None);
    assert!(!state.is_dragging());

    assert_eq!(settle(&mut state, 0), None);
    assert_eq!(state.offset(), Point::ZERO);
    assert_eq!(state.scale(), 1.0);
    assert_eq!(state.sheet_visibility(), 1.0);
}

#[test]
fn fling_away_dismisses_once_the_fling_completes() {
    let mut state = drag();
    drag_by(&mut state, Point::new(0.0, 20.0));
    assert_eq!(state.on_pan_end(Velocity::new(0.0, 600.0)), None);

    // The first tick pins the start; 64ms later the fling lands.
    assert_eq!(state.tick(0), None);
    assert_eq!(state.tick(FRAME), None);
    assert!(state.offset().y > 20.0);
    let outcome = settle(&mut state, 2 * FRAME);
    let Some(DragOutcome::Dismiss(exit)) = outcome else {
        panic!("expected a dismissal, got {outcome:?}");
    };
    assert_eq!(exit.offset.y, 120.0);
    assert_eq!(exit.scale, 0.8);
}

#[test]
fn fling_back_does_not_dismiss() {
    let mut state = drag();
    drag_by(&mut state, Point::new(0.0, 20.0));
    assert_eq!(state.on_pan_end(Velocity::new(0.0, -600.0)), None);
    assert_eq!(settle(&mut state, 0), None);
    assert_eq!(state.offset().y, 0.0);
    assert_eq!(state.scale(), 1.0);
}

#[test]
fn sheet_hides_below_threshold_and_returns_above_it() {
    let mut state = drag();
    drag_by(&mut state, Point::new(0.0, 16.0));
    assert!(state.scale() <= 0.9);

    state.tick(0);
    state.tick(100_000_000);
    assert_eq!(state.sheet_visibility(), 0.0);
    assert_eq!(state.exit_state().sheet_opacity, 0.0);

    state.on_pan_update(Point::new(0.0, -14.0));
    assert!(state.scale() > 0.9);
    state.tick(100_000_000 + FRAME);
    state.tick(500_000_000);
    assert_eq!(state.sheet_visibility(), 1.0);
}

#[test]
fn grabbing_during_snap_back_continues_from_current_offset() {
    let mut state = drag();
    drag_by(&mut state, Point::new(0.0, 30.0));
    state.on_pan_end(Velocity::ZERO);
    state.tick(0);
    state.tick(300_000_000);
    let mid = state.offset();

    state.on_pan_start();
    state.on_pan_update(Point::ZERO);
    assert!((state.offset().y - mid.y).abs() < 1e-4);
    assert!(state.is_dragging());
}
