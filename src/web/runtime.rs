//! The wasm-bindgen surface of the bridge.
//!
//! The embedding page instantiates the guest module, then constructs a
//! [`WebBridge`] from the guest's exports and routes the guest's host import
//! to [`WebBridge::message`]. Everything else (event forwarding, frame
//! delivery) happens through the closures the bridge installs.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use super::guest::JsGuest;
use super::page::DomPage;
use crate::bridge::Bridge;
use crate::config::BridgeConfig;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

/// One bridge instance bound to one guest module and one canvas.
#[wasm_bindgen]
pub struct WebBridge {
    core: Rc<RefCell<Bridge>>,
    guest: JsGuest,
    page: DomPage,
}

#[wasm_bindgen]
impl WebBridge {
    /// Build a bridge from the guest's exports object and an optional JSON
    /// config (`{"canvas_id": ..., "capture_keys": ...}`).
    ///
    /// # Errors
    ///
    /// Rejects malformed config, missing guest exports, and a missing or
    /// non-canvas target element.
    #[wasm_bindgen(constructor)]
    pub fn new(exports: JsValue, config: Option<String>) -> Result<WebBridge, JsValue> {
        let config = BridgeConfig::from_json(config.as_deref()).map_err(|e| JsValue::from_str(&e))?;
        let guest = JsGuest::from_exports(&exports).map_err(|e| JsValue::from_str(&e))?;
        let core = Rc::new(RefCell::new(Bridge::new()));
        let page =
            DomPage::new(&config, Rc::clone(&core), guest.clone()).map_err(|e| JsValue::from_str(&e))?;
        Ok(Self { core, guest, page })
    }

    /// The guest's host channel: one raw command triple in, a wire status
    /// out. Wire this to the guest module's host import.
    pub fn message(&mut self, command: u32, data: u32, data_length: u32) -> u32 {
        self.core
            .borrow_mut()
            .dispatch_raw(&mut self.guest, &mut self.page, command, data, data_length)
    }
}
