// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Controller tests
//!
//! Tests for the options page session logic

use std::fs;
use tempfile::TempDir;

use crate::codec::{encode_document, export_document, EXPORT_FILE_NAME};
use crate::config::{ConfigManager, DefaultDataset, InMemoryStore, SettingsStore};
use crate::core::types::{BangEntry, BangId, Settings, StoredBang, CURRENT_SETTINGS_VERSION};
use crate::core::{BangCollection, CollectionError};
use crate::ui::{Controller, ImportState, NoticeStatus};

fn stored(bang: &str, urls: &[&str]) -> StoredBang {
    StoredBang {
        bang: bang.to_string(),
        urls: urls.iter().map(|u| u.to_string()).collect(),
    }
}

/// Helper: Store with known content, including a duplicate keyword
fn create_test_store() -> InMemoryStore {
    let mut settings = Settings::new(vec![
        stored("g", &["https://google.com/?q=%s"]),
        stored("w", &["https://en.wikipedia.org/wiki/%s"]),
        stored("Yt", &["https://youtube.com/results?search_query=%s"]),
        stored("ddg", &["https://duckduckgo.com/?q=%s"]),
        stored("g", &["https://google.co.uk/?q=%s"]),
    ]);
    settings
        .options
        .extra
        .insert("theme".to_string(), serde_json::json!("dark"));
    InMemoryStore::with_settings(settings)
}

fn create_controller() -> Controller<InMemoryStore> {
    Controller::new(create_test_store(), DefaultDataset::load().unwrap()).unwrap()
}

fn keywords<'a>(rows: &[(&'a BangId, &'a BangEntry)]) -> Vec<&'a str> {
    rows.iter().map(|(_, entry)| entry.keyword.as_str()).collect()
}

#[test]
fn test_controller_loads_stored_bangs() {
    let controller = create_controller();

    assert_eq!(controller.bang_count(), 5, "Should load all 5 stored bangs");
    assert!(!controller.has_unsaved_changes(), "Freshly loaded session is clean");
}

#[test]
fn test_controller_first_run_uses_defaults() {
    let defaults = DefaultDataset::load().unwrap();
    let controller = Controller::new(InMemoryStore::new(), defaults.clone()).unwrap();

    assert!(controller.bangs().content_eq(defaults.bangs()));
    assert!(
        controller.has_unsaved_changes(),
        "Defaults are not in the store until saved"
    );
    assert!(controller.is_first_run());
}

#[test]
fn test_first_run_ends_with_first_save() {
    let mut controller = Controller::new(InMemoryStore::new(), DefaultDataset::load().unwrap()).unwrap();

    controller.save().unwrap();
    assert!(!controller.is_first_run());
}

#[test]
fn test_sort_override_on_stored_settings_is_not_first_run() {
    let mut controller = create_controller();

    controller.set_sort_by_alpha(true);
    assert!(controller.has_unsaved_changes());
    assert!(!controller.is_first_run(), "Settings were loaded from the store");
}

#[test]
fn test_add_puts_placeholder_first() {
    let mut controller = create_controller();

    let (id, notice) = controller.add();

    assert_eq!(notice.title, "New shortcut added");
    assert_eq!(notice.status, NoticeStatus::Info);
    assert_eq!(controller.bang_count(), 6);
    assert_eq!(controller.bangs().ids()[0], id, "New bang should be first");
    assert_eq!(controller.rows()[0].1.keyword, "e");
    assert!(controller.has_unsaved_changes());
}

#[test]
fn test_add_then_remove_restores_content() {
    let mut controller = create_controller();
    let before = controller.bangs().clone();

    let (id, _) = controller.add();
    controller.remove(&id).unwrap();

    assert!(controller.bangs().content_eq(&before));
    assert!(!controller.has_unsaved_changes());
}

#[test]
fn test_remove_unknown_bang_is_noop() {
    let mut controller = create_controller();
    let before = controller.bangs().clone();

    assert_eq!(controller.remove(&BangId::new()), Ok(()));
    assert_eq!(controller.remove(&BangId::new()), Ok(()));
    assert!(controller.bangs().content_eq(&before));
}

#[test]
fn test_remove_unknown_bang_when_lonely_is_noop() {
    let store = InMemoryStore::with_settings(Settings::new(vec![stored("g", &["https://google.com/?q=%s"])]));
    let mut controller = Controller::new(store, DefaultDataset::load().unwrap()).unwrap();

    assert_eq!(controller.remove(&BangId::new()), Ok(()));
    assert_eq!(controller.bang_count(), 1);
}

#[test]
fn test_remove_refuses_last_bang() {
    let store = InMemoryStore::with_settings(Settings::new(vec![stored("g", &["https://google.com/?q=%s"])]));
    let mut controller = Controller::new(store, DefaultDataset::load().unwrap()).unwrap();
    let only = controller.bangs().ids()[0];

    assert!(controller.is_lonely());
    assert_eq!(controller.remove(&only), Err(CollectionError::LastBang(only)));
    assert_eq!(controller.bang_count(), 1);
}

#[test]
fn test_edit_bang() {
    let mut controller = create_controller();
    let id = controller.bangs().ids()[1];

    controller.set_keyword(&id, "wiki").unwrap();
    let url_id = controller.add_url(&id).unwrap();
    controller
        .set_url(&id, &url_id, "https://wiktionary.org/wiki/%s")
        .unwrap();

    let entry = controller.bangs().get(&id).unwrap();
    assert_eq!(entry.keyword, "wiki");
    assert_eq!(
        entry.url_list(),
        vec!["https://en.wikipedia.org/wiki/%s", "https://wiktionary.org/wiki/%s"]
    );

    controller.remove_url(&id, &url_id).unwrap();
    assert_eq!(controller.bangs().get(&id).unwrap().urls.len(), 1);
}

#[test]
fn test_rows_filter_by_keyword_or_url() {
    let mut controller = create_controller();

    controller.set_search("GOOGLE");
    assert_eq!(keywords(&controller.rows()), vec!["g", "g"]);

    controller.set_search("wiki");
    assert_eq!(keywords(&controller.rows()), vec!["w"]);

    controller.set_search("");
    assert_eq!(controller.rows().len(), 5, "Empty search shows everything");
}

#[test]
fn test_rows_sorted_alphabetically() {
    let mut controller = create_controller();

    assert_eq!(
        keywords(&controller.rows()),
        vec!["g", "w", "Yt", "ddg", "g"],
        "Natural order by default"
    );

    controller.set_sort_by_alpha(true);
    assert_eq!(keywords(&controller.rows()), vec!["ddg", "g", "g", "w", "Yt"]);
    assert!(controller.has_unsaved_changes(), "Sort option is part of the settings");
}

#[test]
fn test_sort_then_filter() {
    let mut controller = create_controller();
    controller.set_sort_by_alpha(true);
    controller.set_search("/?q=");

    // Google, DuckDuckGo and Google UK use `/?q=`
    assert_eq!(keywords(&controller.rows()), vec!["ddg", "g", "g"]);
}

#[test]
fn test_save_writes_store_and_keeps_unknown_options() {
    let mut controller = create_controller();
    controller.add();

    controller.save().unwrap();

    assert!(!controller.has_unsaved_changes());
    assert_eq!(controller.store().save_count(), 1);

    let saved = controller.store().snapshot().unwrap();
    assert_eq!(saved.version, CURRENT_SETTINGS_VERSION);
    assert_eq!(saved.bangs.len(), 6);
    assert_eq!(saved.bangs[0].bang, "e");
    assert_eq!(saved.options.extra.get("theme"), Some(&serde_json::json!("dark")));
}

#[test]
fn test_reset_to_default() {
    let mut controller = create_controller();
    let defaults = DefaultDataset::load().unwrap();

    controller.reset_to_default();

    assert!(controller.bangs().content_eq(defaults.bangs()));
    assert_eq!(controller.store().save_count(), 0, "Reset does not save");
}

#[test]
fn test_import_text_appends_bangs() {
    let mut controller = create_controller();
    let mut incoming = BangCollection::new();
    incoming.insert(BangId::new(), BangEntry::new("rs", ["https://docs.rs/%s"]));
    let json = encode_document(&export_document(&incoming)).unwrap();

    let notice = controller.import_text("custombangs.json", &json);

    assert_eq!(notice.title, "Import successful");
    assert_eq!(
        notice.description.as_deref(),
        Some("Loaded from custombangs.json. Don't forget to save!")
    );
    assert_eq!(controller.bang_count(), 6);
    assert_eq!(keywords(&controller.rows()).last(), Some(&"rs"), "Imported bangs go last");
    assert_eq!(controller.store().save_count(), 0, "Import does not save");
    assert_eq!(*controller.import_flow().state(), ImportState::Idle);
}

#[test]
fn test_import_malformed_json_leaves_session() {
    let mut controller = create_controller();
    let before = controller.bangs().to_stored();

    let notice = controller.import_text("broken.json", "{not json");

    assert!(notice.is_error());
    assert_eq!(notice.title, "Import failed");
    assert_eq!(notice.description.as_deref(), Some("Invalid JSON format"));
    assert_eq!(controller.bangs().to_stored(), before);
}

#[test]
fn test_import_version_mismatch() {
    let mut controller = create_controller();
    let json = format!(r#"{{"version": {}, "bangs": []}}"#, CURRENT_SETTINGS_VERSION + 1);

    let notice = controller.import_text("future.json", &json);

    assert_eq!(
        notice.description,
        Some(format!(
            "Version mismatch: {} vs {}",
            CURRENT_SETTINGS_VERSION + 1,
            CURRENT_SETTINGS_VERSION
        ))
    );
    assert_eq!(controller.bang_count(), 5);
}

#[test]
fn test_import_unconvertible_bangs() {
    let mut controller = create_controller();
    let json = format!(r#"{{"version": {}, "bangs": [{{"urls": []}}]}}"#, CURRENT_SETTINGS_VERSION);

    let notice = controller.import_text("odd.json", &json);

    assert_eq!(notice.description.as_deref(), Some("Could not convert JSON to bangs"));
    assert_eq!(controller.bang_count(), 5);
}

#[test]
fn test_import_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let mut controller = create_controller();

    let notice = controller.import_file(&temp_dir.path().join("nope.json"));

    assert!(notice.is_error());
    assert_eq!(controller.bang_count(), 5);
}

#[test]
fn test_export_then_import_into_empty_session() {
    let temp_dir = TempDir::new().unwrap();
    let controller = create_controller();

    let path = controller.export_to(temp_dir.path()).unwrap();
    assert_eq!(path, temp_dir.path().join(EXPORT_FILE_NAME));

    let store = InMemoryStore::with_settings(Settings::new(Vec::new()));
    let mut other = Controller::new(store, DefaultDataset::load().unwrap()).unwrap();
    let notice = other.import_file(&path);

    assert!(!notice.is_error(), "Import failed: {}", notice);
    assert!(other.bangs().content_eq(controller.bangs()));
}

#[test]
fn test_detect_duplicate_keywords() {
    let controller = create_controller();

    let conflicts = controller.conflicts();
    assert_eq!(conflicts.len(), 1, "Should detect 1 conflict (g used twice)");
    assert_eq!(conflicts[0].keyword, "g");
    assert_eq!(
        conflicts[0].conflicting_bangs.len(),
        2,
        "Conflict should involve 2 bangs"
    );
}

#[test]
fn test_validate_flags_bad_url() {
    let mut controller = create_controller();
    let id = controller.bangs().ids()[0];
    let url_id = *controller.bangs().get(&id).unwrap().urls.keys().next().unwrap();

    controller.set_url(&id, &url_id, "not a url %s").unwrap();

    assert!(controller.validate().has_errors());
}

#[test]
fn test_controller_with_file_store() {
    let temp_dir = TempDir::new().unwrap();
    let settings_path = temp_dir.path().join("settings.json");
    let manager = ConfigManager::new(settings_path.clone()).unwrap();

    let mut controller = Controller::new(manager, DefaultDataset::load().unwrap()).unwrap();
    controller.save().unwrap();

    let on_disk = fs::read_to_string(&settings_path).unwrap();
    assert!(on_disk.contains("\"bangs\""));

    let reloaded = ConfigManager::new(settings_path).unwrap().get_settings().unwrap().unwrap();
    assert_eq!(reloaded.bangs, controller.bangs().to_stored());
}
