use super::super::*;
use crate::core::validator::validate_collection;

#[test]
fn test_embedded_defaults_load() {
    let defaults = DefaultDataset::load().expect("Embedded defaults should parse");

    assert!(!defaults.bangs().is_empty());
    assert_eq!(defaults.settings().version, CURRENT_SETTINGS_VERSION);
    assert_eq!(defaults.bangs().len(), defaults.settings().bangs.len());
}

#[test]
fn test_embedded_defaults_are_valid() {
    let defaults = DefaultDataset::load().unwrap();
    let report = validate_collection(defaults.bangs());

    assert!(report.is_clean(), "Default bangs should pass validation: {:?}", report.issues);
}

#[test]
fn test_defaults_keep_document_order() {
    let defaults = DefaultDataset::load().unwrap();
    assert_eq!(defaults.bangs().to_stored(), defaults.settings().bangs);
}

#[test]
fn test_from_json_rejects_other_version() {
    let result = DefaultDataset::from_json(r#"{"version": 1, "bangs": []}"#);
    assert!(matches!(result, Err(ConfigError::Corrupt { .. })));
}

#[test]
fn test_from_json_rejects_garbage() {
    assert!(DefaultDataset::from_json("nope").is_err());
}
