use super::*;

#[test]
fn absent_config_yields_defaults() {
    let config = BridgeConfig::from_json(None).expect("defaults");
    assert_eq!(config.canvas_id, "canvas");
    assert!(config.capture_keys);
}

#[test]
fn empty_and_blank_strings_yield_defaults() {
    assert_eq!(BridgeConfig::from_json(Some("")).expect("empty"), BridgeConfig::default());
    assert_eq!(BridgeConfig::from_json(Some("  \n")).expect("blank"), BridgeConfig::default());
}

#[test]
fn fields_override_defaults_individually() {
    let config = BridgeConfig::from_json(Some(r#"{"canvas_id":"viewport"}"#)).expect("parse");
    assert_eq!(config.canvas_id, "viewport");
    assert!(config.capture_keys);

    let config = BridgeConfig::from_json(Some(r#"{"capture_keys":false}"#)).expect("parse");
    assert_eq!(config.canvas_id, "canvas");
    assert!(!config.capture_keys);
}

#[test]
fn malformed_json_is_an_error() {
    assert!(BridgeConfig::from_json(Some("{not json")).is_err());
}

#[test]
fn empty_object_yields_defaults() {
    assert_eq!(BridgeConfig::from_json(Some("{}")).expect("parse"), BridgeConfig::default());
}
