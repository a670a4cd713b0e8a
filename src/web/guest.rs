//! [`Guest`] implemented over the guest module's exports object.
//!
//! The embedding page passes the instantiated guest's `exports` to the bridge
//! constructor. Three exports form the contract: `memory` (the linear
//! memory), `reserve_space(len) -> addr` (the guest-owned allocator), and
//! `__indirect_function_table` (for invoking the function references the
//! guest registers).

use js_sys::{Array, Function, Reflect, Uint8Array, WebAssembly};
use wasm_bindgen::{JsCast, JsValue};

use crate::error::BridgeError;
use crate::guest::{FuncRef, Guest};

/// Handles into the guest module's exports.
///
/// Cloning is cheap (JS handles only), which lets each DOM closure own its
/// copy instead of sharing one behind a lock.
#[derive(Clone)]
pub struct JsGuest {
    memory: WebAssembly::Memory,
    reserve_space: Function,
    table: WebAssembly::Table,
}

impl JsGuest {
    /// Resolve the three required exports from the guest's exports object.
    ///
    /// # Errors
    ///
    /// Returns a message naming the missing or mistyped export.
    pub fn from_exports(exports: &JsValue) -> Result<Self, String> {
        let memory = lookup(exports, "memory")?
            .dyn_into::<WebAssembly::Memory>()
            .map_err(|_| "export `memory` is not a WebAssembly.Memory".to_owned())?;
        let reserve_space = lookup(exports, "reserve_space")?
            .dyn_into::<Function>()
            .map_err(|_| "export `reserve_space` is not a function".to_owned())?;
        let table = lookup(exports, "__indirect_function_table")?
            .dyn_into::<WebAssembly::Table>()
            .map_err(|_| "export `__indirect_function_table` is not a table".to_owned())?;
        Ok(Self { memory, reserve_space, table })
    }

    /// A fresh byte view over the guest's current memory buffer.
    ///
    /// Never cached: memory growth detaches old buffers, so every access
    /// re-reads the buffer handle.
    fn bytes(&self) -> Uint8Array {
        Uint8Array::new(&self.memory.buffer())
    }

    fn check(&self, addr: u32, len: usize) -> Result<(), BridgeError> {
        let end = u64::from(addr) + len as u64;
        let memory = self.memory_size();
        if end > memory {
            return Err(BridgeError::RegionOutOfBounds {
                base: addr,
                len: u32::try_from(len).unwrap_or(u32::MAX),
                memory,
            });
        }
        Ok(())
    }
}

fn lookup(exports: &JsValue, name: &str) -> Result<JsValue, String> {
    let value = Reflect::get(exports, &JsValue::from_str(name))
        .map_err(|_| format!("exports object has no `{name}`"))?;
    if value.is_undefined() {
        return Err(format!("exports object has no `{name}`"));
    }
    Ok(value)
}

fn guest_err(context: &str, value: &JsValue) -> BridgeError {
    BridgeError::Guest(format!("{context}: {value:?}"))
}

impl Guest for JsGuest {
    fn memory_size(&self) -> u64 {
        u64::from(self.bytes().length())
    }

    fn read_bytes(&self, addr: u32, out: &mut [u8]) -> Result<(), BridgeError> {
        self.check(addr, out.len())?;
        let end = addr + u32::try_from(out.len()).unwrap_or(u32::MAX);
        self.bytes().subarray(addr, end).copy_to(out);
        Ok(())
    }

    fn write_bytes(&mut self, addr: u32, bytes: &[u8]) -> Result<(), BridgeError> {
        self.check(addr, bytes.len())?;
        let end = addr + u32::try_from(bytes.len()).unwrap_or(u32::MAX);
        self.bytes().subarray(addr, end).copy_from(bytes);
        Ok(())
    }

    fn reserve(&mut self, len: u32) -> Result<u32, BridgeError> {
        let value = self
            .reserve_space
            .call1(&JsValue::NULL, &JsValue::from(len))
            .map_err(|e| guest_err("reserve_space trapped", &e))?;
        let addr = value
            .as_f64()
            .ok_or_else(|| BridgeError::Guest("reserve_space returned a non-number".to_owned()))?;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(addr as u32)
    }

    fn invoke(&mut self, func: FuncRef, args: &[f64]) -> Result<(), BridgeError> {
        let entry = self
            .table
            .get(func.0)
            .map_err(|e| guest_err("function table lookup failed", &e))?;
        let js_args = Array::new();
        for arg in args {
            js_args.push(&JsValue::from_f64(*arg));
        }
        entry
            .apply(&JsValue::NULL, &js_args)
            .map(|_| ())
            .map_err(|e| guest_err("guest callback trapped", &e))
    }
}
