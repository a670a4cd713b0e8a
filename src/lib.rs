//! Host bridge between a WebAssembly guest application and the browser DOM.
//!
//! This crate is compiled to WebAssembly and runs on the browser's UI thread
//! alongside the guest module it serves. The guest talks to the browser
//! through a single synchronous channel: an integer command tag plus a region
//! of its own linear memory. The bridge decodes the command, performs the
//! browser call (WebGL context creation, size/scale queries, pointer lock,
//! animation-frame scheduling), and writes any reply into guest-owned memory.
//! In the other direction, DOM input events are classified and forwarded into
//! guest function references registered through the `SetCallbacks` command.
//!
//! Everything except the final DOM wiring is browser-independent and tests
//! natively: the command codec, the bounds-checked memory views, the callback
//! table, the marshaling protocol, and the event router all run against fake
//! guest/page implementations.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`command`] | Wire codec for the closed command enumeration |
//! | [`memory`] | Bounds-checked views into guest linear memory |
//! | [`guest`] | The guest collaborator contract ([`guest::Guest`]) |
//! | [`marshal`] | Guest-owned-allocation reply protocol |
//! | [`callbacks`] | Event-kind to function-reference table |
//! | [`events`] | Pure input-event classification |
//! | [`bridge`] | Command dispatcher and event router |
//! | [`config`] | Page-supplied bridge settings |
//! | [`page`] | Browser-effect seam ([`page::Page`]) |
//! | [`error`] | Error type and wire status codes |
//! | [`consts`] | Shared protocol constants |
//! | `web` | `wasm32`-only DOM layer (listeners, WebGL, guest exports) |

pub mod bridge;
pub mod callbacks;
pub mod command;
pub mod config;
pub mod consts;
pub mod error;
pub mod events;
pub mod guest;
pub mod marshal;
pub mod memory;
pub mod page;

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(test)]
pub(crate) mod testing;
