//! Pure classification of browser input events.
//!
//! These functions hold the fixed contracts guests depend on: the pointer
//! kind numbering, the pinch-vs-scroll wheel split, and the character-input
//! filter. They have no browser dependencies and are exercised directly by
//! native tests.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use crate::consts::PINCH_SCALE;

/// Source device of a pointer event.
///
/// The numeric values are a wire contract: guests receive the code as an
/// `f64` argument and match on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Unknown = 0,
    Mouse = 1,
    Pen = 2,
    Touch = 3,
}

impl PointerKind {
    /// Classify the DOM `pointerType` string.
    #[must_use]
    pub fn from_pointer_type(pointer_type: &str) -> Self {
        match pointer_type {
            "mouse" => Self::Mouse,
            "pen" => Self::Pen,
            "touch" => Self::Touch,
            _ => Self::Unknown,
        }
    }

    /// The wire code, as passed to guest callbacks.
    #[must_use]
    pub fn code(self) -> f64 {
        match self {
            Self::Unknown => 0.0,
            Self::Mouse => 1.0,
            Self::Pen => 2.0,
            Self::Touch => 3.0,
        }
    }
}

/// What a wheel event means to the guest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WheelAction {
    /// A pinch gesture with the scaled amount.
    Pinch { amount: f64 },
    /// A plain scroll with sign-flipped deltas.
    Scroll { dx: f64, dy: f64 },
}

/// Disambiguate a wheel event.
///
/// Trackpad pinches arrive as wheel events with the ctrl modifier set, so the
/// modifier selects the pinch path; the `0.02` scale and the sign flips match
/// what guests were tuned against and are kept as-is.
#[must_use]
pub fn classify_wheel(ctrl_key: bool, delta_x: f64, delta_y: f64) -> WheelAction {
    if ctrl_key {
        WheelAction::Pinch { amount: -delta_y * PINCH_SCALE }
    } else {
        WheelAction::Scroll { dx: -delta_x, dy: -delta_y }
    }
}

/// Filter a key value down to a deliverable character.
///
/// Returns the key value only when no IME composition is in progress and the
/// value is exactly one logical character; named keys ("Shift", "Enter") and
/// mid-composition input never produce a character event.
#[must_use]
pub fn character_to_deliver(is_composing: bool, key: &str) -> Option<&str> {
    if is_composing {
        return None;
    }
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(_), None) => Some(key),
        _ => None,
    }
}
