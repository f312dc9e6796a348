use super::*;

// =============================================================
// Button / Modifiers / ZoomDirection
// =============================================================

#[test]
fn button_default_is_primary() {
    assert_eq!(Button::default(), Button::Primary);
}

#[test]
fn button_from_dom_codes() {
    assert_eq!(Button::from_dom(0), Button::Primary);
    assert_eq!(Button::from_dom(1), Button::Middle);
    assert_eq!(Button::from_dom(2), Button::Secondary);
    assert_eq!(Button::from_dom(4), Button::Primary);
}

#[test]
fn modifiers_zoom_modifier() {
    assert!(!Modifiers::default().zoom_modifier());
    assert!(Modifiers { ctrl: true, meta: false }.zoom_modifier());
    assert!(Modifiers { ctrl: false, meta: true }.zoom_modifier());
}

#[test]
fn zoom_direction_from_wheel() {
    assert_eq!(ZoomDirection::from_wheel(WheelDelta { dx: 0.0, dy: -120.0 }), Some(ZoomDirection::In));
    assert_eq!(ZoomDirection::from_wheel(WheelDelta { dx: 0.0, dy: 3.0 }), Some(ZoomDirection::Out));
    assert_eq!(ZoomDirection::from_wheel(WheelDelta { dx: 40.0, dy: 0.0 }), None);
}

// =============================================================
// Gesture
// =============================================================

#[test]
fn gesture_starts_idle() {
    let g = Gesture::new();
    assert_eq!(g.state(), InputState::Idle);
    assert!(!g.is_dragging());
    assert!(!g.has_moved());
    assert!(g.drag_start().is_none());
}

#[test]
fn press_records_drag_start() {
    let mut g = Gesture::new();
    g.press(Point::new(10.0, 20.0));
    assert!(g.is_dragging());
    assert_eq!(g.drag_start(), Some(Point::new(10.0, 20.0)));
    assert!(!g.has_moved());
}

#[test]
fn drag_to_without_press_is_ignored() {
    let mut g = Gesture::new();
    assert!(g.drag_to(Point::new(50.0, 50.0), 3.0).is_none());
    assert!(!g.has_moved());
}

#[test]
fn drag_to_returns_incremental_deltas() {
    let mut g = Gesture::new();
    g.press(Point::new(0.0, 0.0));
    assert_eq!(g.drag_to(Point::new(5.0, 1.0), 3.0), Some((5.0, 1.0)));
    assert_eq!(g.drag_to(Point::new(7.0, -2.0), 3.0), Some((2.0, -3.0)));
}

#[test]
fn small_wiggle_stays_below_threshold() {
    let mut g = Gesture::new();
    g.press(Point::new(100.0, 100.0));
    g.drag_to(Point::new(102.0, 101.0), 3.0);
    g.drag_to(Point::new(98.0, 103.0), 3.0);
    g.drag_to(Point::new(103.0, 97.0), 3.0);
    assert!(!g.has_moved());
}

#[test]
fn exceeding_threshold_on_one_axis_latches_moved() {
    let mut g = Gesture::new();
    g.press(Point::new(100.0, 100.0));
    g.drag_to(Point::new(100.0, 103.5), 3.0);
    assert!(g.has_moved());
    // Coming back does not clear it.
    g.drag_to(Point::new(100.0, 100.0), 3.0);
    assert!(g.has_moved());
}

#[test]
fn release_enters_settling_and_keeps_flags() {
    let mut g = Gesture::new();
    g.press(Point::new(0.0, 0.0));
    g.drag_to(Point::new(10.0, 0.0), 3.0);
    assert!(g.release(100.0, 10.0));
    assert_eq!(g.state(), InputState::Settling { release_deadline_ms: 110.0 });
    assert!(g.is_dragging());
    assert!(g.has_moved());
    assert!(g.drag_start().is_none());
}

#[test]
fn release_without_press_is_noop() {
    let mut g = Gesture::new();
    assert!(!g.release(5.0, 10.0));
    assert_eq!(g.state(), InputState::Idle);
}

#[test]
fn expire_before_deadline_keeps_flags() {
    let mut g = Gesture::new();
    g.press(Point::new(0.0, 0.0));
    g.drag_to(Point::new(10.0, 0.0), 3.0);
    g.release(100.0, 10.0);
    assert!(!g.expire(109.9));
    assert!(g.has_moved());
}

#[test]
fn expire_at_deadline_clears_flags() {
    let mut g = Gesture::new();
    g.press(Point::new(0.0, 0.0));
    g.drag_to(Point::new(10.0, 0.0), 3.0);
    g.release(100.0, 10.0);
    assert!(g.expire(110.0));
    assert_eq!(g.state(), InputState::Idle);
    assert!(!g.has_moved());
    assert!(!g.is_dragging());
}

#[test]
fn expire_while_dragging_is_noop() {
    let mut g = Gesture::new();
    g.press(Point::new(0.0, 0.0));
    assert!(!g.expire(1e9));
    assert!(matches!(g.state(), InputState::Dragging { .. }));
}

#[test]
fn press_during_settling_starts_fresh_gesture() {
    let mut g = Gesture::new();
    g.press(Point::new(0.0, 0.0));
    g.drag_to(Point::new(50.0, 0.0), 3.0);
    g.release(100.0, 10.0);
    g.press(Point::new(5.0, 5.0));
    assert!(!g.has_moved());
    assert_eq!(g.drag_start(), Some(Point::new(5.0, 5.0)));
}

// =============================================================
// HostEvent
// =============================================================

#[test]
fn host_event_decodes_pointer_down_with_default_button() {
    let ev = HostEvent::from_json(r#"{"type":"pointer_down","x":1.5,"y":2.0,"time_ms":16.0}"#);
    let ev = match ev {
        Ok(ev) => ev,
        Err(e) => panic!("decode failed: {e}"),
    };
    assert_eq!(ev, HostEvent::PointerDown { x: 1.5, y: 2.0, button: Button::Primary, time_ms: 16.0 });
}

#[test]
fn host_event_decodes_wheel_with_modifiers() {
    let ev = HostEvent::from_json(r#"{"type":"wheel","x":10,"y":20,"delta_y":-100,"ctrl":true,"time_ms":5}"#);
    let ev = match ev {
        Ok(ev) => ev,
        Err(e) => panic!("decode failed: {e}"),
    };
    assert_eq!(
        ev,
        HostEvent::Wheel { x: 10.0, y: 20.0, delta_x: 0.0, delta_y: -100.0, ctrl: true, meta: false, time_ms: 5.0 }
    );
}

#[test]
fn host_event_decodes_unit_variants() {
    assert!(matches!(HostEvent::from_json(r#"{"type":"zoom_in"}"#), Ok(HostEvent::ZoomIn)));
    assert!(matches!(HostEvent::from_json(r#"{"type":"reset"}"#), Ok(HostEvent::Reset)));
}

#[test]
fn host_event_rejects_unknown_type() {
    assert!(HostEvent::from_json(r#"{"type":"double_click","x":0,"y":0}"#).is_err());
}

#[test]
fn host_event_rejects_missing_field() {
    assert!(HostEvent::from_json(r#"{"type":"click","x":0,"time_ms":0}"#).is_err());
}

#[test]
fn host_event_container_only_for_resize() {
    let resize = HostEvent::Resize { left: 1.0, top: 2.0, width: 3.0, height: 4.0, time_ms: 0.0 };
    assert_eq!(resize.container(), Some(ContainerRect::new(1.0, 2.0, 3.0, 4.0)));
    assert!(HostEvent::Frame { time_ms: 0.0 }.container().is_none());
}
