//! Shared fakes for native tests: an in-process guest with Vec-backed linear
//! memory plus a bump allocator, and a recording page.

use crate::command::WebGlVersion;
use crate::error::BridgeError;
use crate::guest::{FuncRef, Guest};
use crate::page::Page;

/// A fake guest module.
///
/// Memory is a flat `Vec<u8>`; `reserve` bumps from `alloc_cursor`; every
/// `invoke` is appended to `calls` so tests can assert on delivery order and
/// arguments. Staged strings land in memory like the real protocol, and
/// `staged` records the reserved `(base, len)` pairs in order.
pub struct FakeGuest {
    pub memory: Vec<u8>,
    pub alloc_cursor: u32,
    pub staged: Vec<(u32, u32)>,
    pub calls: Vec<(FuncRef, Vec<f64>)>,
}

impl FakeGuest {
    /// A guest with `size` bytes of memory and the allocator parked at
    /// `size / 2` so reserved space never collides with test regions placed
    /// near the bottom.
    pub fn with_memory(size: usize) -> Self {
        Self {
            memory: vec![0; size],
            alloc_cursor: u32::try_from(size / 2).unwrap_or(0),
            staged: Vec::new(),
            calls: Vec::new(),
        }
    }

    /// Write a little-endian u32 array at `base` (test setup helper).
    pub fn put_u32s(&mut self, base: u32, values: &[u32]) {
        let mut addr = base as usize;
        for v in values {
            self.memory[addr..addr + 4].copy_from_slice(&v.to_le_bytes());
            addr += 4;
        }
    }

    /// Read `count` little-endian f32s at `base`.
    pub fn get_f32s(&self, base: u32, count: usize) -> Vec<f32> {
        (0..count)
            .map(|i| {
                let addr = base as usize + 4 * i;
                let mut quad = [0u8; 4];
                quad.copy_from_slice(&self.memory[addr..addr + 4]);
                f32::from_le_bytes(quad)
            })
            .collect()
    }

    /// Bytes of the most recently staged string.
    pub fn last_staged_bytes(&self) -> &[u8] {
        let &(base, len) = self.staged.last().expect("nothing staged");
        &self.memory[base as usize..(base + len) as usize]
    }

    fn check(&self, addr: u32, len: usize) -> Result<(), BridgeError> {
        let end = addr as u64 + len as u64;
        if end > self.memory.len() as u64 {
            return Err(BridgeError::RegionOutOfBounds {
                base: addr,
                len: u32::try_from(len).unwrap_or(u32::MAX),
                memory: self.memory.len() as u64,
            });
        }
        Ok(())
    }
}

impl Guest for FakeGuest {
    fn memory_size(&self) -> u64 {
        self.memory.len() as u64
    }

    fn read_bytes(&self, addr: u32, out: &mut [u8]) -> Result<(), BridgeError> {
        self.check(addr, out.len())?;
        out.copy_from_slice(&self.memory[addr as usize..addr as usize + out.len()]);
        Ok(())
    }

    fn write_bytes(&mut self, addr: u32, bytes: &[u8]) -> Result<(), BridgeError> {
        self.check(addr, bytes.len())?;
        self.memory[addr as usize..addr as usize + bytes.len()].copy_from_slice(bytes);
        Ok(())
    }

    fn reserve(&mut self, len: u32) -> Result<u32, BridgeError> {
        let base = self.alloc_cursor;
        self.check(base, len as usize)?;
        self.alloc_cursor += len;
        self.staged.push((base, len));
        Ok(base)
    }

    fn invoke(&mut self, func: FuncRef, args: &[f64]) -> Result<(), BridgeError> {
        self.calls.push((func, args.to_vec()));
        Ok(())
    }
}

/// A fake page that records every browser effect.
pub struct FakePage {
    pub canvas: (f32, f32),
    pub window: (f32, f32),
    pub dpr: f32,
    pub contexts: Vec<WebGlVersion>,
    pub frames_scheduled: usize,
    pub installs: usize,
    pub locks: usize,
    pub unlocks: usize,
}

impl Default for FakePage {
    fn default() -> Self {
        Self {
            canvas: (800.0, 600.0),
            window: (400.0, 300.0),
            dpr: 2.0,
            contexts: Vec::new(),
            frames_scheduled: 0,
            installs: 0,
            locks: 0,
            unlocks: 0,
        }
    }
}

impl Page for FakePage {
    fn canvas_size(&self) -> (f32, f32) {
        self.canvas
    }

    fn window_size(&self) -> (f32, f32) {
        self.window
    }

    fn device_pixel_ratio(&self) -> f32 {
        self.dpr
    }

    fn create_context(&mut self, version: WebGlVersion) -> Result<(), BridgeError> {
        self.contexts.push(version);
        Ok(())
    }

    fn schedule_frame(&mut self) {
        self.frames_scheduled += 1;
    }

    fn install_forwarders(&mut self) {
        self.installs += 1;
    }

    fn lock_cursor(&mut self) {
        self.locks += 1;
    }

    fn unlock_cursor(&mut self) {
        self.unlocks += 1;
    }
}
