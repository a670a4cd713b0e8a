//! Bridge configuration.
//!
//! The embedding page hands the web layer a small JSON object at
//! construction. Parsing lives here, outside the `wasm32` gate, so defaults
//! and error behavior are covered by native tests.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::DEFAULT_CANVAS_ID;

/// Page-supplied settings for one bridge instance.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BridgeConfig {
    /// DOM id of the canvas element the bridge binds to.
    pub canvas_id: String,
    /// Whether forwarded key events call `preventDefault`, keeping keystrokes
    /// away from browser shortcuts while the guest has focus.
    pub capture_keys: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self { canvas_id: DEFAULT_CANVAS_ID.to_owned(), capture_keys: true }
    }
}

impl BridgeConfig {
    /// Parse a JSON config; `None` or empty input yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error message for malformed input.
    pub fn from_json(json: Option<&str>) -> Result<Self, String> {
        match json {
            None => Ok(Self::default()),
            Some(s) if s.trim().is_empty() => Ok(Self::default()),
            Some(s) => serde_json::from_str(s).map_err(|e| e.to_string()),
        }
    }
}
