//! The guest collaborator contract.
//!
//! The guest is the WASM application module this bridge serves. The bridge
//! reaches it three ways: raw access to its linear memory, its exported
//! allocator (`reserve_space`), and indirect calls through its function
//! table. All three sit behind the [`Guest`] trait so the dispatcher and
//! event router can be exercised natively against an in-process fake.

use crate::error::BridgeError;

/// An opaque reference to a guest function: an index into the guest module's
/// function table. The guest hands these out (in `SetCallbacks` arrays and
/// `RequestAnimationFrame` commands) and resolves them on its own side; the
/// bridge never interprets the value beyond passing it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuncRef(pub u32);

/// Host-side view of the guest module.
///
/// Implementations must not retain addresses across calls: the guest owns its
/// allocator and may move or reuse memory between bridge entries.
pub trait Guest {
    /// Current size of guest linear memory in bytes.
    fn memory_size(&self) -> u64;

    /// Copy `out.len()` bytes out of guest memory starting at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::RegionOutOfBounds`] if the range does not fit
    /// in guest memory.
    fn read_bytes(&self, addr: u32, out: &mut [u8]) -> Result<(), BridgeError>;

    /// Copy `bytes` into guest memory starting at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::RegionOutOfBounds`] if the range does not fit
    /// in guest memory.
    fn write_bytes(&mut self, addr: u32, bytes: &[u8]) -> Result<(), BridgeError>;

    /// Ask the guest allocator to reserve `len` bytes and return the base
    /// address. This is the guest-owned-allocation protocol: the host never
    /// guesses at allocator state.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Guest`] if the allocator export is missing or
    /// traps.
    fn reserve(&mut self, len: u32) -> Result<u32, BridgeError>;

    /// Invoke a guest function reference with `f64` arguments, synchronously,
    /// on the current thread.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Guest`] if the table entry is missing or the
    /// call traps.
    fn invoke(&mut self, func: FuncRef, args: &[f64]) -> Result<(), BridgeError>;
}
