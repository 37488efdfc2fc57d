use super::*;

#[test]
fn empty_tracker_returns_zero() {
    let tracker = VelocityTracker1D::new();
    assert_eq!(tracker.calculate_velocity(), 0.0);
}

#[test]
fn single_point_returns_zero() {
    let mut tracker = VelocityTracker1D::new();
    tracker.add_data_point(0, 100.0);
    assert_eq!(tracker.calculate_velocity(), 0.0);
}

#[test]
fn two_points_give_their_slope() {
    let mut tracker = VelocityTracker1D::new();
    tracker.add_data_point(0, 0.0);
    tracker.add_data_point(10, 20.0);
    assert!((tracker.calculate_velocity() - 2000.0).abs() < 1e-2);
}

#[test]
fn constant_velocity_is_recovered() {
    let mut tracker = VelocityTracker1D::new();
    for step in 0..4u64 {
        tracker.add_data_point(step * 10, step as f32 * 100.0);
    }
    let velocity = tracker.calculate_velocity();
    assert!((velocity - 10_000.0).abs() < 1_000.0, "got {velocity}");
}

#[test]
fn backwards_motion_is_negative() {
    let mut tracker = VelocityTracker1D::new();
    tracker.add_data_point(0, 300.0);
    tracker.add_data_point(10, 200.0);
    tracker.add_data_point(20, 100.0);
    assert!(tracker.calculate_velocity() < 0.0);
}

#[test]
fn velocity_is_capped_both_ways() {
    let mut tracker = VelocityTracker1D::new();
    tracker.add_data_point(0, 0.0);
    tracker.add_data_point(1, 10_000.0);
    assert_eq!(tracker.calculate_velocity_with_max(8_000.0), 8_000.0);

    tracker.reset();
    tracker.add_data_point(0, 10_000.0);
    tracker.add_data_point(1, 0.0);
    assert_eq!(tracker.calculate_velocity_with_max(8_000.0), -8_000.0);
}

#[test]
fn samples_beyond_horizon_are_ignored() {
    let mut tracker = VelocityTracker1D::new();
    tracker.add_data_point(0, 0.0);
    tracker.add_data_point(150, 100.0);
    tracker.add_data_point(160, 200.0);
    tracker.add_data_point(170, 300.0);
    assert!((tracker.calculate_velocity() - 10_000.0).abs() < 1_000.0);
}

#[test]
fn pause_longer_than_stop_threshold_resets_velocity() {
    let mut tracker = VelocityTracker1D::new();
    tracker.add_data_point(0, 0.0);
    tracker.add_data_point(ASSUME_STOPPED_MS + 1, 100.0);
    assert_eq!(tracker.calculate_velocity(), 0.0);
}

#[test]
fn two_dimensional_tracker_tracks_axes_independently() {
    let mut tracker = VelocityTracker::new();
    tracker.add_position(0, Point::new(0.0, 0.0));
    tracker.add_position(10, Point::new(0.0, 5.0));
    tracker.add_position(20, Point::new(0.0, 10.0));
    let velocity = tracker.velocity();
    assert_eq!(velocity.x, 0.0);
    assert!((velocity.y - 500.0).abs() < 50.0);
    assert!((velocity.speed() - velocity.y).abs() < 1e-3);

    tracker.reset();
    assert_eq!(tracker.velocity(), Velocity::ZERO);
}
