//! Command dispatcher and event router.
//!
//! [`Bridge`] is the explicit context object for the whole protocol: it owns
//! the callback table and the single pending animation-frame registration.
//! There is no module-level mutable state.
//!
//! Dispatch is guest-initiated and synchronous: the guest sends a raw wire
//! triple, the bridge decodes it, performs the browser effect through the
//! [`Page`] seam, writes any reply into guest memory, and returns a status.
//!
//! Forwarding is browser-initiated: a DOM event is turned into at most two
//! [`Delivery`] values by a pure `route_*` method, and each delivery is then
//! sent to the guest immediately, in the order the browser's event loop
//! produced them; nothing is queued. The route/send split lets the web
//! layer drop its borrow on the bridge before invoking the guest, so a guest
//! callback may synchronously send its next command.

#[cfg(test)]
#[path = "bridge_test.rs"]
mod bridge_test;

use crate::callbacks::{CallbackTable, EventKind};
use crate::command::Command;
use crate::error::{BridgeError, STATUS_OK};
use crate::events::{self, PointerKind, WheelAction};
use crate::guest::{FuncRef, Guest};
use crate::marshal;
use crate::memory::RegionView;
use crate::page::Page;

/// One guest call prepared by the router.
///
/// `staged_text`, when present, is passed to the guest through the
/// guest-owned-allocation protocol immediately before the call, matching how
/// guests read key codes and characters.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub staged_text: Option<String>,
    pub func: FuncRef,
    pub args: Vec<f64>,
}

impl Delivery {
    fn call(func: FuncRef, args: Vec<f64>) -> Self {
        Self { staged_text: None, func, args }
    }

    fn call_with_text(text: &str, func: FuncRef, args: Vec<f64>) -> Self {
        Self { staged_text: Some(text.to_owned()), func, args }
    }

    /// Stage any text and invoke the guest function.
    ///
    /// # Errors
    ///
    /// Propagates marshaling and invocation failures from the guest.
    pub fn send<G: Guest>(&self, guest: &mut G) -> Result<(), BridgeError> {
        if let Some(text) = &self.staged_text {
            marshal::pass_str(guest, text)?;
        }
        guest.invoke(self.func, &self.args)
    }
}

/// Protocol state for one guest module: the callback table and the pending
/// animation-frame registration.
#[derive(Debug, Default)]
pub struct Bridge {
    callbacks: CallbackTable,
    pending_frame: Option<FuncRef>,
}

impl Bridge {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The callback table (for inspection; populated via dispatch).
    #[must_use]
    pub fn callbacks(&self) -> &CallbackTable {
        &self.callbacks
    }

    /// Decode and dispatch a raw wire triple, returning the wire status:
    /// `0` on success, a per-error-class code otherwise.
    pub fn dispatch_raw<G: Guest, P: Page>(
        &mut self,
        guest: &mut G,
        page: &mut P,
        tag: u32,
        data: u32,
        data_len: u32,
    ) -> u32 {
        let command = match Command::decode(tag, data, data_len) {
            Ok(command) => command,
            Err(e) => {
                log::warn!("rejected command tag {tag}: {e}");
                return e.status();
            }
        };
        match self.dispatch(guest, page, command) {
            Ok(()) => STATUS_OK,
            Err(e) => {
                log::warn!("command {command:?} failed: {e}");
                e.status()
            }
        }
    }

    /// Execute one decoded command.
    ///
    /// # Errors
    ///
    /// Returns region, callback-table, guest, and page errors; see
    /// [`BridgeError`].
    pub fn dispatch<G: Guest, P: Page>(
        &mut self,
        guest: &mut G,
        page: &mut P,
        command: Command,
    ) -> Result<(), BridgeError> {
        match command {
            Command::RequestAnimationFrame { callback } => {
                // At most one browser callback is in flight; a new request
                // only replaces the reference it will deliver to.
                if self.pending_frame.is_none() {
                    page.schedule_frame();
                }
                self.pending_frame = Some(callback);
                Ok(())
            }
            Command::GetCanvasSize { out } => {
                let (width, height) = page.canvas_size();
                RegionView::open(guest, out)?.write_f32s(&[width, height])
            }
            Command::GetWindowSize { out } => {
                let (width, height) = page.window_size();
                RegionView::open(guest, out)?.write_f32s(&[width, height])
            }
            Command::SetCallbacks { table } => {
                let refs = RegionView::open(guest, table)?.read_u32s()?;
                self.callbacks.load(&refs)?;
                page.install_forwarders();
                Ok(())
            }
            Command::GetDevicePixelRatio => {
                // Written as a full f32; whether the guest truncates it to an
                // integer on read is the guest's side of the contract.
                marshal::pass_f32(guest, page.device_pixel_ratio())
            }
            Command::LockCursor => {
                page.lock_cursor();
                Ok(())
            }
            Command::UnlockCursor => {
                page.unlock_cursor();
                Ok(())
            }
            Command::CreateContext { version } => page.create_context(version),
        }
    }

    // ── Event routing ───────────────────────────────────────────
    //
    // Each method maps one browser event to its guest delivery. A `None`
    // (or empty) result means the guest registered no handler for that kind
    // and the event is dropped.

    /// Route a pointer-move event: `(x, y, kind, timestamp)`.
    #[must_use]
    pub fn route_pointer_move(
        &self,
        x: f64,
        y: f64,
        pointer_type: &str,
        timestamp: f64,
    ) -> Option<Delivery> {
        let func = self.callback(EventKind::PointerMove)?;
        let kind = PointerKind::from_pointer_type(pointer_type);
        Some(Delivery::call(func, vec![x, y, kind.code(), timestamp]))
    }

    /// Route a relative mouse-move event: `(dx, dy, timestamp)`.
    #[must_use]
    pub fn route_mouse_move(&self, dx: f64, dy: f64, timestamp: f64) -> Option<Delivery> {
        let func = self.callback(EventKind::MouseMove)?;
        Some(Delivery::call(func, vec![dx, dy, timestamp]))
    }

    /// Route a pointer-down event: `(x, y, kind, button, timestamp)`.
    #[must_use]
    pub fn route_pointer_down(
        &self,
        x: f64,
        y: f64,
        pointer_type: &str,
        button: f64,
        timestamp: f64,
    ) -> Option<Delivery> {
        let func = self.callback(EventKind::PointerDown)?;
        let kind = PointerKind::from_pointer_type(pointer_type);
        Some(Delivery::call(func, vec![x, y, kind.code(), button, timestamp]))
    }

    /// Route a pointer-up event: `(x, y, kind, button, timestamp)`.
    #[must_use]
    pub fn route_pointer_up(
        &self,
        x: f64,
        y: f64,
        pointer_type: &str,
        button: f64,
        timestamp: f64,
    ) -> Option<Delivery> {
        let func = self.callback(EventKind::PointerUp)?;
        let kind = PointerKind::from_pointer_type(pointer_type);
        Some(Delivery::call(func, vec![x, y, kind.code(), button, timestamp]))
    }

    /// Route a key-down event.
    ///
    /// Produces the key delivery (repeat events take the key-repeat path
    /// instead of key-down) followed, when the filter admits it, by a
    /// character-received delivery. The key `code` string is staged to the
    /// guest before each key call; the character delivery stages the key
    /// value itself.
    #[must_use]
    pub fn route_key_down(
        &self,
        code: &str,
        key: &str,
        repeat: bool,
        is_composing: bool,
        timestamp: f64,
    ) -> Vec<Delivery> {
        let mut deliveries = Vec::with_capacity(2);
        let kind = if repeat { EventKind::KeyRepeat } else { EventKind::KeyDown };
        if let Some(func) = self.callback(kind) {
            deliveries.push(Delivery::call_with_text(code, func, vec![timestamp]));
        }
        if let Some(character) = events::character_to_deliver(is_composing, key) {
            if let Some(func) = self.callback(EventKind::CharacterReceived) {
                deliveries.push(Delivery::call_with_text(character, func, vec![timestamp]));
            }
        }
        deliveries
    }

    /// Route a key-up event; stages the key `code` string.
    #[must_use]
    pub fn route_key_up(&self, code: &str, timestamp: f64) -> Option<Delivery> {
        let func = self.callback(EventKind::KeyUp)?;
        Some(Delivery::call_with_text(code, func, vec![timestamp]))
    }

    /// Route a wheel event to exactly one of pinch or scroll.
    #[must_use]
    pub fn route_wheel(
        &self,
        ctrl_key: bool,
        delta_x: f64,
        delta_y: f64,
        timestamp: f64,
    ) -> Option<Delivery> {
        match events::classify_wheel(ctrl_key, delta_x, delta_y) {
            WheelAction::Pinch { amount } => {
                let func = self.callback(EventKind::Pinch)?;
                Some(Delivery::call(func, vec![amount, timestamp]))
            }
            WheelAction::Scroll { dx, dy } => {
                let func = self.callback(EventKind::Scroll)?;
                Some(Delivery::call(func, vec![dx, dy, timestamp]))
            }
        }
    }

    /// Consume the pending animation-frame registration for delivery.
    ///
    /// Returns `None` when no request is outstanding (a stale browser
    /// callback after the guest stopped re-requesting).
    #[must_use]
    pub fn take_frame_callback(&mut self) -> Option<Delivery> {
        let func = self.pending_frame.take()?;
        Some(Delivery::call(func, Vec::new()))
    }

    /// Whether an animation-frame registration is outstanding.
    #[must_use]
    pub fn frame_pending(&self) -> bool {
        self.pending_frame.is_some()
    }

    fn callback(&self, kind: EventKind) -> Option<FuncRef> {
        let func = self.callbacks.get(kind);
        if func.is_none() {
            log::debug!("no callback registered for {kind:?}, dropping event");
        }
        func
    }
}
