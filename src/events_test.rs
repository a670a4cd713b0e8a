#![allow(clippy::float_cmp)]

use super::*;

// --- Pointer kind classification ---

#[test]
fn pointer_kind_mouse_is_one() {
    assert_eq!(PointerKind::from_pointer_type("mouse"), PointerKind::Mouse);
    assert_eq!(PointerKind::Mouse.code(), 1.0);
}

#[test]
fn pointer_kind_pen_is_two() {
    assert_eq!(PointerKind::from_pointer_type("pen"), PointerKind::Pen);
    assert_eq!(PointerKind::Pen.code(), 2.0);
}

#[test]
fn pointer_kind_touch_is_three() {
    assert_eq!(PointerKind::from_pointer_type("touch"), PointerKind::Touch);
    assert_eq!(PointerKind::Touch.code(), 3.0);
}

#[test]
fn pointer_kind_anything_else_is_zero() {
    for other in ["", "stylus", "MOUSE", "other"] {
        assert_eq!(PointerKind::from_pointer_type(other), PointerKind::Unknown, "{other:?}");
    }
    assert_eq!(PointerKind::Unknown.code(), 0.0);
}

// --- Wheel disambiguation ---

#[test]
fn ctrl_wheel_is_a_pinch_with_scaled_negated_delta_y() {
    let action = classify_wheel(true, 3.0, 50.0);
    assert_eq!(action, WheelAction::Pinch { amount: -50.0 * 0.02 });
}

#[test]
fn plain_wheel_is_a_scroll_with_negated_deltas() {
    let action = classify_wheel(false, 3.0, 50.0);
    assert_eq!(action, WheelAction::Scroll { dx: -3.0, dy: -50.0 });
}

#[test]
fn pinch_ignores_delta_x() {
    assert_eq!(
        classify_wheel(true, 999.0, 10.0),
        classify_wheel(true, 0.0, 10.0)
    );
}

#[test]
fn zero_deltas_still_classify() {
    assert_eq!(classify_wheel(true, 0.0, 0.0), WheelAction::Pinch { amount: 0.0 });
    assert_eq!(classify_wheel(false, 0.0, 0.0), WheelAction::Scroll { dx: 0.0, dy: 0.0 });
}

// --- Character filter ---

#[test]
fn single_character_is_delivered() {
    assert_eq!(character_to_deliver(false, "a"), Some("a"));
    assert_eq!(character_to_deliver(false, "Z"), Some("Z"));
    assert_eq!(character_to_deliver(false, " "), Some(" "));
}

#[test]
fn single_non_ascii_character_is_delivered() {
    assert_eq!(character_to_deliver(false, "é"), Some("é"));
    assert_eq!(character_to_deliver(false, "中"), Some("中"));
}

#[test]
fn named_keys_are_rejected() {
    for named in ["Shift", "Enter", "ArrowLeft", "Escape", "Dead"] {
        assert_eq!(character_to_deliver(false, named), None, "{named:?}");
    }
}

#[test]
fn empty_key_value_is_rejected() {
    assert_eq!(character_to_deliver(false, ""), None);
}

#[test]
fn composition_suppresses_delivery_even_for_single_characters() {
    assert_eq!(character_to_deliver(true, "a"), None);
    assert_eq!(character_to_deliver(true, "中"), None);
}
