//! The callback table: event kinds mapped to guest function references.
//!
//! The guest registers its input handlers once with a `SetCallbacks` command
//! carrying a fixed-order array of function references. The slot order is a
//! wire contract; reordering it breaks every compiled guest.

#[cfg(test)]
#[path = "callbacks_test.rs"]
mod callbacks_test;

use crate::consts::CALLBACK_SLOTS;
use crate::error::BridgeError;
use crate::guest::FuncRef;

/// The kinds of events the bridge forwards, in wire slot order.
///
/// The animation-frame callback is intentionally absent: it is registered
/// per `RequestAnimationFrame` command, not through the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum EventKind {
    PointerMove = 0,
    PointerDown = 1,
    PointerUp = 2,
    KeyDown = 3,
    KeyUp = 4,
    Scroll = 5,
    KeyRepeat = 6,
    CharacterReceived = 7,
    Pinch = 8,
    MouseMove = 9,
}

impl EventKind {
    /// Slot index in the `SetCallbacks` array.
    #[must_use]
    pub fn slot(self) -> usize {
        self as usize
    }
}

/// Mapping from event kind to guest function reference.
///
/// Empty at startup; populated (and re-populated wholesale) by
/// `SetCallbacks`. Never torn down; it lives for the bridge lifetime.
#[derive(Debug, Default)]
pub struct CallbackTable {
    slots: [Option<FuncRef>; CALLBACK_SLOTS],
}

impl CallbackTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the table with the references in `refs`.
    ///
    /// An `N`-entry array populates exactly slots `0..N` in wire order and
    /// clears the rest, so a second load overwrites rather than appends.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::TooManyCallbacks`] if `refs` has more entries
    /// than the table has slots.
    pub fn load(&mut self, refs: &[u32]) -> Result<(), BridgeError> {
        if refs.len() > CALLBACK_SLOTS {
            return Err(BridgeError::TooManyCallbacks { got: refs.len(), max: CALLBACK_SLOTS });
        }
        self.slots = [None; CALLBACK_SLOTS];
        for (slot, &func) in self.slots.iter_mut().zip(refs) {
            *slot = Some(FuncRef(func));
        }
        Ok(())
    }

    /// The registered reference for `kind`, if the guest supplied one.
    #[must_use]
    pub fn get(&self, kind: EventKind) -> Option<FuncRef> {
        self.slots[kind.slot()]
    }

    /// Number of populated slots.
    #[must_use]
    pub fn populated(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}
