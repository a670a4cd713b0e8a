//! Browser-effect seam.
//!
//! Every DOM/WebGL side effect the dispatcher can cause goes through this
//! trait, so the dispatcher itself compiles and tests natively. The `wasm32`
//! implementation lives in the `web` module; tests use a recording fake.

use crate::command::WebGlVersion;
use crate::error::BridgeError;

/// Browser surface the bridge drives.
pub trait Page {
    /// Canvas backing-store dimensions (device pixels).
    fn canvas_size(&self) -> (f32, f32);

    /// Canvas client dimensions (CSS pixels).
    fn window_size(&self) -> (f32, f32);

    /// Display scale factor.
    fn device_pixel_ratio(&self) -> f32;

    /// Acquire a rendering context of the requested flavor on the canvas,
    /// with the fixed attribute set (no alpha, synchronous present,
    /// antialiasing on, depth buffer on).
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Page`] if the context type is unsupported.
    fn create_context(&mut self, version: WebGlVersion) -> Result<(), BridgeError>;

    /// Ask the browser for one animation-frame callback. Called at most once
    /// per pending registration; delivery consumes the registration.
    fn schedule_frame(&mut self);

    /// Install (or re-install, replacing prior listeners) the DOM event
    /// forwarders. Invoked on every `SetCallbacks`, so it must be idempotent.
    fn install_forwarders(&mut self);

    /// Request exclusive pointer capture on the canvas.
    fn lock_cursor(&mut self);

    /// Release pointer capture.
    fn unlock_cursor(&mut self);
}
