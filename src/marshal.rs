//! Guest-owned-allocation marshaling.
//!
//! When the host must hand the guest a value it did not pre-allocate space
//! for, the host asks the guest's exported allocator to reserve exactly the
//! needed byte count, then writes the value at the returned address. The
//! guest's allocator state is never guessed at. Strings travel the same way:
//! reserve the exact byte length, write raw UTF-8, and leave interpretation
//! to the guest.

#[cfg(test)]
#[path = "marshal_test.rs"]
mod marshal_test;

use crate::error::BridgeError;
use crate::guest::Guest;
use crate::memory::{MemoryRegion, RegionView};

/// Reserve space for and write a single `f32`.
///
/// # Errors
///
/// Propagates allocator and memory-write failures from the guest.
pub fn pass_f32<G: Guest>(guest: &mut G, value: f32) -> Result<(), BridgeError> {
    let base = guest.reserve(4)?;
    RegionView::open(guest, MemoryRegion::new(base, 4))?.write_f32s(&[value])
}

/// Reserve space for and write two `f32`s.
///
/// # Errors
///
/// Propagates allocator and memory-write failures from the guest.
pub fn pass_f32_pair<G: Guest>(guest: &mut G, a: f32, b: f32) -> Result<(), BridgeError> {
    let base = guest.reserve(8)?;
    RegionView::open(guest, MemoryRegion::new(base, 8))?.write_f32s(&[a, b])
}

/// Reserve space for and write a string's UTF-8 bytes, exact length.
///
/// # Errors
///
/// Returns [`BridgeError::RegionTooSmall`] for strings longer than `u32`
/// addressing allows, and propagates guest failures.
pub fn pass_str<G: Guest>(guest: &mut G, value: &str) -> Result<(), BridgeError> {
    let bytes = value.as_bytes();
    let len = u32::try_from(bytes.len()).map_err(|_| BridgeError::RegionTooSmall {
        need: u32::MAX,
        got: 0,
    })?;
    let base = guest.reserve(len)?;
    RegionView::open(guest, MemoryRegion::new(base, len))?.write_exact(bytes)
}
