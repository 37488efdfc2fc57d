use super::*;

#[test]
fn loose_collapses_negative_maxima() {
    let constraints = Constraints::loose(-10.0, 50.0);
    assert_eq!(constraints.max_width, 0.0);
    assert_eq!(constraints.max_height, 50.0);
    assert_eq!(constraints.min_width, 0.0);
}

#[test]
fn constrain_clamps_into_range() {
    let constraints = Constraints::loose(100.0, 40.0);
    assert_eq!(constraints.constrain(Size::new(250.0, 10.0)), Size::new(100.0, 10.0));
    assert_eq!(constraints.constrain(Size::new(-5.0, 90.0)), Size::new(0.0, 40.0));
}
