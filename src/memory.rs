//! Bounds-checked views into guest linear memory.
//!
//! Commands carry a `(base, len)` pair naming a region of the guest's linear
//! memory. The region is only valid for the duration of one dispatch, so the
//! typed accessor, [`RegionView`], borrows the guest for the call and is
//! dropped at return. Construction performs the bounds check once; accessors
//! then only have to validate element counts.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use crate::error::BridgeError;
use crate::guest::Guest;

/// A `(base, len)` pair naming guest-owned memory, lengths in bytes.
///
/// This is the raw wire shape; nothing is validated until a [`RegionView`]
/// is opened over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryRegion {
    /// Base address in guest linear memory.
    pub base: u32,
    /// Length in bytes.
    pub len: u32,
}

impl MemoryRegion {
    #[must_use]
    pub fn new(base: u32, len: u32) -> Self {
        Self { base, len }
    }
}

/// A validated, call-scoped window into guest memory.
///
/// The borrow on the guest ties the view to the dispatch that opened it; it
/// cannot be retained once the call returns.
pub struct RegionView<'a, G: Guest> {
    guest: &'a mut G,
    region: MemoryRegion,
}

impl<G: Guest> std::fmt::Debug for RegionView<'_, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionView")
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

impl<'a, G: Guest> RegionView<'a, G> {
    /// Open a view over `region`, checking it fits in guest memory.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::RegionOutOfBounds`] if `base + len` exceeds the
    /// guest's current memory size.
    pub fn open(guest: &'a mut G, region: MemoryRegion) -> Result<Self, BridgeError> {
        let end = u64::from(region.base) + u64::from(region.len);
        let memory = guest.memory_size();
        if end > memory {
            return Err(BridgeError::RegionOutOfBounds {
                base: region.base,
                len: region.len,
                memory,
            });
        }
        Ok(Self { guest, region })
    }

    /// Length of the region in bytes.
    #[must_use]
    pub fn len(&self) -> u32 {
        self.region.len
    }

    /// Whether the region is zero-length.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.region.len == 0
    }

    /// Read the whole region as a little-endian `u32` array.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::RegionTooSmall`] if the region length is not a
    /// multiple of four, or a read error from the guest.
    pub fn read_u32s(&self) -> Result<Vec<u32>, BridgeError> {
        if self.region.len % 4 != 0 {
            return Err(BridgeError::RegionTooSmall {
                need: self.region.len + (4 - self.region.len % 4),
                got: self.region.len,
            });
        }
        let mut bytes = vec![0u8; self.region.len as usize];
        self.guest.read_bytes(self.region.base, &mut bytes)?;
        Ok(bytes
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect())
    }

    /// Write `values` at the start of the region as little-endian `f32`s.
    ///
    /// Writes exactly `4 * values.len()` bytes; the rest of the region is
    /// untouched and nothing is ever written past its end.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::RegionTooSmall`] if the values do not fit, or a
    /// write error from the guest.
    pub fn write_f32s(&mut self, values: &[f32]) -> Result<(), BridgeError> {
        let need = 4 * u32::try_from(values.len()).map_err(|_| BridgeError::RegionTooSmall {
            need: u32::MAX,
            got: self.region.len,
        })?;
        if need > self.region.len {
            return Err(BridgeError::RegionTooSmall { need, got: self.region.len });
        }
        let mut bytes = Vec::with_capacity(need as usize);
        for v in values {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        self.guest.write_bytes(self.region.base, &bytes)
    }

    /// Write raw bytes spanning exactly the whole region.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::RegionTooSmall`] if `bytes` is not exactly the
    /// region length, or a write error from the guest.
    pub fn write_exact(&mut self, bytes: &[u8]) -> Result<(), BridgeError> {
        if bytes.len() != self.region.len as usize {
            return Err(BridgeError::RegionTooSmall {
                need: u32::try_from(bytes.len()).unwrap_or(u32::MAX),
                got: self.region.len,
            });
        }
        self.guest.write_bytes(self.region.base, bytes)
    }
}
