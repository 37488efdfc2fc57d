use super::*;

const FRAME: u64 = 16_666_667;

fn run_until_idle(controller: &mut AnimationController, start: u64) -> (u64, Vec<AnimationStatus>) {
    let mut time = start;
    let mut statuses = Vec::new();
    for _ in 0..1000 {
        if !controller.needs_tick() {
            break;
        }
        let tick = controller.tick(time);
        if let Some(status) = tick.status {
            statuses.push(status);
        }
        time += FRAME;
    }
    (time, statuses)
}

#[test]
fn forward_runs_to_upper_bound_and_completes() {
    let mut controller = AnimationController::new(300);
    controller.forward();
    assert_eq!(controller.status(), AnimationStatus::Forward);

    let (_, statuses) = run_until_idle(&mut controller, 0);
    assert_eq!(statuses, vec![AnimationStatus::Forward, AnimationStatus::Completed]);
    assert_eq!(controller.value(), 1.0);
    assert!(!controller.is_animating());
}

#[test]
fn first_tick_pins_start_time() {
    let mut controller = AnimationController::new(100);
    controller.forward();
    let tick = controller.tick(5_000_000_000);
    assert_eq!(controller.value(), 0.0);
    assert_eq!(tick.status, Some(AnimationStatus::Forward));

    controller.tick(5_000_000_000 + 50_000_000);
    assert!((controller.value() - 0.5).abs() < 1e-4);
}

#[test]
fn forward_duration_spans_the_whole_bounded_range() {
    let mut controller = AnimationController::with_bounds(800, 0.0, 0.7);
    controller.forward();
    controller.tick(0);
    controller.tick(400_000_000);
    assert!((controller.value() - 0.35).abs() < 1e-3);
    let tick = controller.tick(800_000_000);
    assert!(tick.completed());
    assert!((controller.value() - 0.7).abs() < 1e-6);
}

#[test]
fn reverse_uses_reverse_duration_scaled_by_distance() {
    let mut controller = AnimationController::new(100).with_reverse_duration(300);
    controller.set_value(0.5);
    controller.reverse();
    controller.tick(0);
    controller.tick(100_000_000);
    assert!((controller.value() - (0.5 - 1.0 / 3.0)).abs() < 1e-3);
    let tick = controller.tick(150_000_000);
    assert!(tick.dismissed());
    assert_eq!(controller.value(), 0.0);
}

#[test]
fn animate_to_below_upper_bound_reports_completed() {
    let mut controller = AnimationController::new(600);
    controller.animate_to(0.25, Some(64), Easing::LinearEasing);
    let (_, statuses) = run_until_idle(&mut controller, 0);
    assert_eq!(statuses.last(), Some(&AnimationStatus::Completed));
    assert_eq!(controller.value(), 0.25);
}

#[test]
fn zero_distance_animation_completes_on_next_tick() {
    let mut controller = AnimationController::new(200);
    controller.set_value(1.0);
    controller.tick(0);
    controller.forward();
    assert!(controller.needs_tick() || controller.is_completed());
    assert!(!controller.is_animating());
}

#[test]
fn set_value_stops_simulation() {
    let mut controller = AnimationController::new(200);
    controller.forward();
    controller.tick(0);
    controller.set_value(0.4);
    assert!(!controller.is_animating());
    assert_eq!(controller.value(), 0.4);
    assert_eq!(controller.status(), AnimationStatus::Forward);
}

#[test]
fn easing_bounds_are_correct() {
    let easings = [
        Easing::LinearEasing,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::FastOutSlowInEasing,
        Easing::EaseOutSine,
        Easing::EaseOutBack,
        Easing::EaseInBack,
        Easing::ElasticIn,
    ];

    for easing in easings {
        assert!(easing.transform(0.0).abs() < 0.01, "start of {:?}", easing);
        assert!((easing.transform(1.0) - 1.0).abs() < 0.01, "end of {:?}", easing);
    }
}

#[test]
fn back_curves_overshoot() {
    let overshoot = (1..100)
        .map(|i| Easing::EaseOutBack.transform(i as f32 / 100.0))
        .fold(f32::MIN, f32::max);
    assert!(overshoot > 1.0);

    let undershoot = (1..100)
        .map(|i| Easing::EaseInBack.transform(i as f32 / 100.0))
        .fold(f32::MAX, f32::min);
    assert!(undershoot < 0.0);
}

#[test]
fn interval_is_flat_outside_its_range() {
    let easing = Easing::Interval {
        begin: 0.9,
        end: 1.0,
    };
    assert_eq!(easing.transform(0.5), 0.0);
    assert!((easing.transform(0.95) - 0.5).abs() < 1e-4);
    assert_eq!(easing.transform(1.0), 1.0);
}

#[test]
fn status_changes_are_reported_once() {
    let mut controller = AnimationController::new(32);
    controller.forward();
    assert_eq!(controller.tick(0), Tick { status: Some(AnimationStatus::Forward) });
    assert_eq!(controller.tick(16_000_000), Tick::default());
    assert!(controller.tick(32_000_000).completed());
    assert_eq!(controller.tick(48_000_000), Tick::default());
    assert!(!controller.needs_tick());
}
