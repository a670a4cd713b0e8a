//! Shared protocol constants.

// ── Wheel gesture heuristic ─────────────────────────────────────

/// Scale applied to a ctrl-modified wheel delta to produce a pinch amount.
///
/// Browsers report trackpad pinches as wheel events with the ctrl modifier
/// set. The factor has no principled derivation; it was tuned to make the
/// amount feel similar to native macOS pinch values and guests depend on it
/// as-is.
pub const PINCH_SCALE: f64 = 0.02;

// ── Callback table ──────────────────────────────────────────────

/// Number of slots in the callback table. See [`crate::callbacks::EventKind`]
/// for the fixed slot order.
pub const CALLBACK_SLOTS: usize = 10;

// ── Web layer defaults ──────────────────────────────────────────

/// Element id the bridge looks up when no canvas id is configured.
pub const DEFAULT_CANVAS_ID: &str = "canvas";
