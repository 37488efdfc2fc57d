use super::*;

#[test]
fn down_then_up_is_a_tap() {
    let mut tap = TapGesture::new();
    let origin = Point::new(100.0, 100.0);
    assert_eq!(tap.on_event(&PointerEvent::down(origin, 0)), Some(TapEvent::Down(origin)));
    assert!(tap.is_pressed());
    assert_eq!(
        tap.on_event(&PointerEvent::up(origin, 50)),
        Some(TapEvent::Up(origin))
    );
    assert!(!tap.is_pressed());
}

#[test]
fn movement_within_slop_keeps_the_press() {
    let mut tap = TapGesture::new();
    tap.on_event(&PointerEvent::down(Point::new(100.0, 100.0), 0));
    assert_eq!(tap.on_event(&PointerEvent::moved(Point::new(110.0, 110.0), 10)), None);
    assert!(tap.is_pressed());
}

#[test]
fn movement_past_slop_cancels_once() {
    let mut tap = TapGesture::new();
    tap.on_event(&PointerEvent::down(Point::new(100.0, 100.0), 0));
    assert_eq!(
        tap.on_event(&PointerEvent::moved(Point::new(100.0, 130.0), 10)),
        Some(TapEvent::Cancel)
    );
    assert_eq!(tap.on_event(&PointerEvent::moved(Point::new(100.0, 160.0), 20)), None);
    assert_eq!(tap.on_event(&PointerEvent::up(Point::new(100.0, 160.0), 30)), None);
}

#[test]
fn up_without_down_is_ignored() {
    let mut tap = TapGesture::with_slop(4.0);
    assert_eq!(tap.on_event(&PointerEvent::up(Point::ZERO, 0)), None);
    assert_eq!(tap.on_event(&PointerEvent::cancel(Point::ZERO, 0)), None);
}
