//! Browser layer: DOM wiring, WebGL context acquisition, and guest-export
//! access. Everything here requires `wasm32` and a browser environment; the
//! protocol logic it drives lives in the platform-independent modules.

mod guest;
mod page;
mod runtime;

pub use guest::JsGuest;
pub use page::DomPage;
pub use runtime::WebBridge;
