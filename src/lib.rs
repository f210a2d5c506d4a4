// Copyright 2025 bakri (tidynest@proton.me)
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

//! Custom Bangs Manager
//!
//! Options page and popup logic for custom search "bangs": short keywords
//! (`!g`, `!w`) that expand to search URL templates (`https://google.com/?q=%s`).
//!
//! # Features
//!
//! - **Ordered Collection:** Add, remove and edit bangs; new bangs go to the top
//! - **Search and Sort Views:** Case-insensitive filter, optional alphabetical order
//! - **Import/Export:** Versioned JSON documents, merged without losing existing bangs
//! - **Duplicate Detection:** Keywords used by more than one bang are reported
//! - **Automatic Backups:** Timestamped backups before every settings change
//! - **Atomic Operations:** Safe file writes with rollback on failure
//!
//! # Architecture
//!
//! - **`core`:** Business logic (types, collection, duplicate detection, validation)
//! - **`codec`:** Import/export document parsing, merging and writing
//! - **`config`:** Settings storage (file store, backups, defaults)
//! - **`ui`:** Options page controller, import flow, popup list (MVC pattern)
//! - **`logging`:** `tracing` subscriber setup for the binary
//!
//! # Examples
//!
//! ## Editing a collection
//!
//! ```
//! use custom_bangs::core::{BangCollection, BangEntry, BangId};
//!
//! let mut bangs = BangCollection::new();
//! bangs.insert(BangId::new(), BangEntry::new("w", ["https://en.wikipedia.org/wiki/%s"]));
//!
//! let id = bangs.add();
//! assert_eq!(bangs.ids()[0], id);
//! assert_eq!(bangs.filter("wiki").len(), 1);
//! ```
//!
//! ## Importing an exported document
//!
//! ```
//! use custom_bangs::codec::{import_text, ImportError};
//! use custom_bangs::core::BangCollection;
//!
//! let existing = BangCollection::new();
//! let merged = import_text(&existing, r#"{"version": 3, "bangs": [{"bang": "g", "urls": ["https://google.com/?q=%s"]}]}"#)?;
//! assert_eq!(merged.len(), 1);
//!
//! let err = import_text(&existing, r#"{"version": 4, "bangs": []}"#).unwrap_err();
//! assert_eq!(err.to_string(), "Version mismatch: 4 vs 3");
//! # Ok::<(), ImportError>(())
//! ```
//!
//! ## Running an options session
//!
//! ```no_run
//! use custom_bangs::config::{ConfigManager, DefaultDataset};
//! use custom_bangs::ui::Controller;
//! use std::path::PathBuf;
//!
//! let manager = ConfigManager::new(PathBuf::from("/tmp/custom-bangs/settings.json"))?;
//! let mut controller = Controller::new(manager, DefaultDataset::load()?)?;
//!
//! controller.add();
//! controller.save()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod codec;
pub mod config;
pub mod core;
pub mod logging;
pub mod ui;

// Re-export commonly used types for convenience
pub use crate::core::{BangCollection, BangEntry, BangId, Settings, StoredBang, UrlId};
