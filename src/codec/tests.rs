//! Codec tests
//!
//! Parsing order, failure kinds, merge semantics and export file handling

use std::fs;
use tempfile::TempDir;

use super::*;
use crate::core::{BangEntry, BangId};

/// Helper: collection with two bangs in a known order
fn sample_collection() -> BangCollection {
    let mut collection = BangCollection::new();
    collection.insert(BangId::new(), BangEntry::new("g", ["https://google.com/?q=%s"]));
    collection.insert(
        BangId::new(),
        BangEntry::new("w", ["https://en.wikipedia.org/wiki/%s", "https://de.wikipedia.org/wiki/%s"]),
    );
    collection
}

#[test]
fn test_export_stamps_current_version() {
    let document = export_document(&sample_collection());
    assert_eq!(document.version, CURRENT_SETTINGS_VERSION);
    assert_eq!(document.bangs.len(), 2);
    assert_eq!(document.bangs[0].bang, "g");
}

#[test]
fn test_export_of_empty_collection() {
    let document = export_document(&BangCollection::new());
    assert!(document.bangs.is_empty());

    let json = encode_document(&document).unwrap();
    assert_eq!(json, format!(r#"{{"version":{},"bangs":[]}}"#, CURRENT_SETTINGS_VERSION));
}

#[test]
fn test_encode_uses_stored_field_names() {
    let json = encode_document(&export_document(&sample_collection())).unwrap();
    assert!(json.contains(r#""bang":"g""#));
    assert!(json.contains(r#""urls":["https://google.com/?q=%s"]"#));
}

#[test]
fn test_export_then_parse_round_trip() {
    let collection = sample_collection();
    let json = encode_document(&export_document(&collection)).unwrap();

    let document = parse_document(&json).expect("Exported document should parse");
    let restored = to_collection(&document);

    assert!(restored.content_eq(&collection));
}

#[test]
fn test_single_bang_into_empty_collection() {
    let mut collection = BangCollection::new();
    collection.insert(BangId::new(), BangEntry::new("g", ["https://google.com/?q=%s"]));

    let json = encode_document(&export_document(&collection)).unwrap();
    let merged = import_text(&BangCollection::new(), &json).unwrap();

    assert_eq!(merged.len(), 1);
    let (_, entry) = merged.iter().next().unwrap();
    assert_eq!(entry.keyword, "g");
    assert_eq!(entry.url_list(), vec!["https://google.com/?q=%s"]);
}

#[test]
fn test_malformed_json() {
    let result = parse_document("{not json");
    assert!(matches!(result, Err(ImportError::MalformedJson(_))));
    assert_eq!(result.unwrap_err().kind(), ImportErrorKind::MalformedJson);
}

#[test]
fn test_next_version_is_rejected() {
    let raw = format!(r#"{{"version": {}, "bangs": []}}"#, CURRENT_SETTINGS_VERSION + 1);

    match parse_document(&raw) {
        Err(ImportError::VersionMismatch { expected, found }) => {
            assert_eq!(expected, CURRENT_SETTINGS_VERSION);
            assert_eq!(found, Some(Value::from(CURRENT_SETTINGS_VERSION + 1)));
        }
        other => panic!("Expected VersionMismatch, got: {:?}", other),
    }
}

#[test]
fn test_version_mismatch_message_names_both_versions() {
    let err = ImportError::VersionMismatch {
        expected: 3,
        found: Some(Value::from(2)),
    };
    assert_eq!(err.to_string(), "Version mismatch: 2 vs 3");

    let err = ImportError::VersionMismatch {
        expected: 3,
        found: None,
    };
    assert_eq!(err.to_string(), "Version mismatch: missing vs 3");
}

#[test]
fn test_missing_version() {
    for raw in [r#"{"bangs": []}"#, r#"[1, 2, 3]"#, r#"42"#] {
        assert_eq!(
            parse_document(raw),
            Err(ImportError::VersionMismatch {
                expected: CURRENT_SETTINGS_VERSION,
                found: None,
            }),
            "Expected a missing version for {}",
            raw
        );
    }
}

#[test]
fn test_non_numeric_version_is_reported_as_found() {
    let err = parse_document(r#"{"version": "3", "bangs": []}"#).unwrap_err();
    assert_eq!(
        err,
        ImportError::VersionMismatch {
            expected: CURRENT_SETTINGS_VERSION,
            found: Some(Value::from("3")),
        }
    );
    assert_eq!(err.to_string(), r#"Version mismatch: "3" vs 3"#);

    let err = parse_document(r#"{"version": 2.5, "bangs": []}"#).unwrap_err();
    assert_eq!(err.to_string(), "Version mismatch: 2.5 vs 3");
}

#[test]
fn test_float_version_equal_to_current_is_accepted() {
    let raw = r#"{"version": 3.0, "bangs": [{"bang": "g", "urls": ["https://google.com/?q=%s"]}]}"#;
    let document = parse_document(raw).unwrap();

    assert_eq!(document.version, CURRENT_SETTINGS_VERSION);
    assert_eq!(document.bangs.len(), 1);
}

#[test]
fn test_bang_without_urls_is_rejected() {
    let raw = format!(
        r#"{{"version": {}, "bangs": [{{"bang": "w", "urls": ["https://en.wikipedia.org/wiki/%s"]}}, {{"bang": "g", "urls": []}}]}}"#,
        CURRENT_SETTINGS_VERSION
    );

    match import_text(&sample_collection(), &raw) {
        Err(ImportError::ConversionError(reason)) => {
            assert!(reason.contains("`g`"), "Reason should name the bang: {}", reason);
        }
        other => panic!("Expected ConversionError, got: {:?}", other),
    }
}

#[test]
fn test_version_checked_before_bangs() {
    // Both problems present: version wins
    let raw = r#"{"version": 1, "bangs": "nope"}"#;
    assert_eq!(parse_document(raw).unwrap_err().kind(), ImportErrorKind::VersionMismatch);
}

#[test]
fn test_conversion_errors() {
    let v = CURRENT_SETTINGS_VERSION;
    let cases = [
        format!(r#"{{"version": {v}}}"#),
        format!(r#"{{"version": {v}, "bangs": {{}}}}"#),
        format!(r#"{{"version": {v}, "bangs": [{{"urls": ["https://x.example/%s"]}}]}}"#),
        format!(r#"{{"version": {v}, "bangs": [{{"bang": "g"}}]}}"#),
        format!(r#"{{"version": {v}, "bangs": [{{"bang": 5, "urls": []}}]}}"#),
    ];

    for raw in &cases {
        assert!(
            matches!(parse_document(raw), Err(ImportError::ConversionError(_))),
            "Expected ConversionError for {}",
            raw
        );
    }
}

#[test]
fn test_merge_keeps_existing_and_appends_imported() {
    let existing = sample_collection();
    let mut imported = BangCollection::new();
    imported.insert(BangId::new(), BangEntry::new("yt", ["https://youtube.com/results?search_query=%s"]));
    imported.insert(BangId::new(), BangEntry::new("g", ["https://google.de/?q=%s"]));

    let merged = merge_import(&existing, &imported);

    assert_eq!(merged.len(), 4, "Import never removes or replaces bangs");
    let keywords: Vec<_> = merged.iter().map(|(_, e)| e.keyword.as_str()).collect();
    assert_eq!(keywords, vec!["g", "w", "yt", "g"]);

    // Input collections are untouched
    assert_eq!(existing.len(), 2);
    assert_eq!(imported.len(), 2);
}

#[test]
fn test_merge_rekeys_colliding_ids() {
    let existing = sample_collection();
    let shared = existing.ids()[0];

    let mut imported = BangCollection::new();
    imported.insert(shared, BangEntry::new("gg", ["https://google.com/?q=%s&gl=us"]));

    let merged = merge_import(&existing, &imported);

    assert_eq!(merged.len(), 3);
    assert_eq!(merged.get(&shared).unwrap().keyword, "g", "Existing bang must not be overwritten");
    let rekeyed = merged.ids()[2];
    assert_ne!(rekeyed, shared);
    assert_eq!(merged.get(&rekeyed).unwrap().keyword, "gg");
}

#[test]
fn test_failed_import_leaves_collection_unchanged() {
    let existing = sample_collection();
    let before = existing.to_stored();

    for raw in ["{not json", r#"{"version": 99, "bangs": []}"#] {
        assert!(import_text(&existing, raw).is_err());
        assert_eq!(existing.to_stored(), before);
    }
}

#[test]
fn test_write_export_into_directory_uses_default_name() {
    let temp_dir = TempDir::new().unwrap();

    let path = write_export(&sample_collection(), temp_dir.path()).unwrap();

    assert_eq!(path, temp_dir.path().join(EXPORT_FILE_NAME));
    let written = fs::read_to_string(&path).unwrap();
    let document = parse_document(&written).unwrap();
    assert_eq!(document.bangs.len(), 2);
}

#[test]
fn test_write_export_to_explicit_file() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("my-bangs.json");

    let path = write_export(&sample_collection(), &target).unwrap();

    assert_eq!(path, target);
    assert!(target.exists());
}
