use super::*;
use crate::config::open_fraction;

const RESTING: Rect = Rect::new(150.0, 300.0, 100.0, 100.0);
const END: Rect = Rect::new(142.5, 292.5, 115.0, 115.0);

fn decoy(decoration: ChildDecoration) -> Decoy {
    Decoy::new(RESTING, END, decoration, 800, 335, true)
}

fn assert_rect_close(actual: Rect, expected: Rect) {
    let close = (actual.x - expected.x).abs() < 1e-3
        && (actual.y - expected.y).abs() < 1e-3
        && (actual.width - expected.width).abs() < 1e-3
        && (actual.height - expected.height).abs() < 1e-3;
    assert!(close, "{actual:?} != {expected:?}");
}

#[test]
fn rests_during_the_begin_pause() {
    let decoy = decoy(ChildDecoration::None);
    assert_eq!(decoy.frame(0.0, None).rect, RESTING);
    // Begin pause is 1 of 8.5125 weight units.
    assert_eq!(decoy.frame(0.1, None).rect, RESTING);
}

#[test]
fn grow_ends_exactly_at_open_fraction() {
    let decoy = decoy(ChildDecoration::None);
    let of = open_fraction(800, 335);
    assert_rect_close(decoy.frame(of, None).rect, END);
    assert_rect_close(decoy.frame(of - 0.001, None).rect, END);

    let halfway = decoy.frame(of * 0.6, None).rect;
    assert!(halfway.width > RESTING.width && halfway.width < END.width);
    assert!((halfway.center().x - RESTING.center().x).abs() < 1e-3);
}

#[test]
fn shadow_fades_in_over_the_press() {
    let decoy = decoy(ChildDecoration::None);
    let of = open_fraction(800, 335);
    assert_eq!(decoy.frame(0.0, None).shadow, BoxShadow::NONE);
    let middle = decoy.frame(of / 2.0, None).shadow;
    assert!(middle.blur_radius > 0.0 && middle.blur_radius < DEFAULT_END_BOX_SHADOW.blur_radius);
    assert_eq!(decoy.frame(of, None).shadow, DEFAULT_END_BOX_SHADOW);
}

#[test]
fn corner_radius_follows_child_decoration() {
    let undecorated = decoy(ChildDecoration::None);
    assert_eq!(undecorated.frame(0.5, None).corner_radii, CornerRadii::ZERO);

    let clipped = decoy(ChildDecoration::Clip(CornerRadii::uniform(12.0)));
    let of = open_fraction(800, 335);
    assert_eq!(clipped.frame(0.0, None).corner_radii, CornerRadii::ZERO);
    assert_eq!(clipped.frame(of, None).corner_radii, CornerRadii::uniform(12.0));

    let boxed = decoy(ChildDecoration::Boxed(CornerRadii::uniform(8.0)));
    let radius = boxed.frame(of / 2.0, None).corner_radii.top_left;
    assert!((radius - 4.0).abs() < 1e-3);
}

#[test]
fn disabled_grow_keeps_the_resting_rect() {
    let decoy = Decoy::new(RESTING, END, ChildDecoration::None, 800, 335, false);
    assert_eq!(decoy.end_rect(), RESTING);
    assert_eq!(decoy.frame(0.7, None).rect, RESTING);
}

#[test]
fn builder_paint_is_passed_through() {
    let decoy = decoy(ChildDecoration::None);
    let paint = PreviewPaint {
        alpha: 0.5,
        ..PreviewPaint::default()
    };
    assert_eq!(decoy.frame(0.2, Some(paint)).paint, Some(paint));
}
