//! Wire codec for the host command channel.
//!
//! The guest sends commands as a raw triple `(tag, data, data_len)`. The tag
//! is drawn from a closed enumeration agreed between guest and host; `data`
//! is either a memory address or a function reference depending on the tag,
//! and `data_len` is a byte count. Decoding turns the triple into a typed
//! [`Command`] and rejects unknown tags outright.

#[cfg(test)]
#[path = "command_test.rs"]
mod command_test;

use crate::error::BridgeError;
use crate::guest::FuncRef;
use crate::memory::MemoryRegion;

/// WebGL context flavor requested by a `CreateContext` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebGlVersion {
    /// WebGL 1 (`"webgl"` context type).
    One,
    /// WebGL 2 (`"webgl2"` context type).
    Two,
}

/// A decoded host command.
///
/// Wire tags (the contract the guest compiles against):
///
/// | tag | command |
/// |-----|---------|
/// | 0 | `RequestAnimationFrame` (`data` = function reference) |
/// | 1 | `GetCanvasSize` (`data`/`data_len` = output region) |
/// | 2 | `SetCallbacks` (`data`/`data_len` = u32 array region) |
/// | 3 | `GetDevicePixelRatio` |
/// | 4 | `GetWindowSize` (`data`/`data_len` = output region) |
/// | 5 | `LockCursor` |
/// | 6 | `UnlockCursor` |
/// | 7 | `CreateContext` WebGL 1 |
/// | 8 | `CreateContext` WebGL 2 |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Register `callback` to be invoked on the next display refresh.
    RequestAnimationFrame { callback: FuncRef },
    /// Write the canvas backing-store width/height as two `f32` into `out`.
    GetCanvasSize { out: MemoryRegion },
    /// Read a function-reference array and populate the callback table.
    SetCallbacks { table: MemoryRegion },
    /// Deliver the display scale factor via guest-owned allocation.
    GetDevicePixelRatio,
    /// Write the canvas client (CSS) width/height as two `f32` into `out`.
    GetWindowSize { out: MemoryRegion },
    /// Request exclusive pointer capture on the canvas.
    LockCursor,
    /// Release pointer capture.
    UnlockCursor,
    /// Acquire a rendering context on the canvas.
    CreateContext { version: WebGlVersion },
}

impl Command {
    /// Decode a raw wire triple.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::UnknownCommand`] for tags outside the closed
    /// enumeration.
    pub fn decode(tag: u32, data: u32, data_len: u32) -> Result<Self, BridgeError> {
        match tag {
            0 => Ok(Self::RequestAnimationFrame { callback: FuncRef(data) }),
            1 => Ok(Self::GetCanvasSize { out: MemoryRegion::new(data, data_len) }),
            2 => Ok(Self::SetCallbacks { table: MemoryRegion::new(data, data_len) }),
            3 => Ok(Self::GetDevicePixelRatio),
            4 => Ok(Self::GetWindowSize { out: MemoryRegion::new(data, data_len) }),
            5 => Ok(Self::LockCursor),
            6 => Ok(Self::UnlockCursor),
            7 => Ok(Self::CreateContext { version: WebGlVersion::One }),
            8 => Ok(Self::CreateContext { version: WebGlVersion::Two }),
            other => Err(BridgeError::UnknownCommand(other)),
        }
    }
}
