//! src/core/types.rs
//!
//! Core type definitions for bang management
//!
//! This module defines the fundamental types used throughout the application:
//! - `BangId` / `UrlId`: Opaque identifiers minted when an entry is created
//! - `BangEntry`: An editable bang (keyword plus URL templates)
//! - `StoredBang`: The persisted/exported shape of a bang
//! - `Settings` / `BangsExport`: The stored settings and the export document
//!
//! Editing types carry identifiers so rows can be addressed while the user
//! edits them. Stored types carry none: identifiers are minted again every
//! time a document is converted into the editing representation.

use hashlink::LinkedHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Schema version stamped on every stored settings file and export.
pub const CURRENT_SETTINGS_VERSION: u32 = 3;

/// Keyword given to a freshly added bang
pub const PLACEHOLDER_KEYWORD: &str = "e";

/// URL template given to a freshly added URL slot
pub const PLACEHOLDER_URL: &str = "https://example.com/?q=%s";

/// Token substituted with the user's query at invocation time
pub const QUERY_PLACEHOLDER: &str = "%s";

/// Unique identifier of a bang inside a collection
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct BangId(Uuid);

impl BangId {
    /// Mints a new random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BangId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BangId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl std::str::FromStr for BangId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Identifier of a single URL slot inside a bang
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct UrlId(Uuid);

impl UrlId {
    /// Mints a new random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UrlId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UrlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl std::str::FromStr for UrlId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// An editable bang definition
///
/// # Example
/// ```
/// use custom_bangs::core::BangEntry;
///
/// let entry = BangEntry::new("g", ["https://google.com/?q=%s"]);
/// assert_eq!(entry.keyword, "g");
/// assert_eq!(entry.url_list(), vec!["https://google.com/?q=%s"]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BangEntry {
    /// What the user types after `!` (e.g. "g")
    pub keyword: String,

    /// URL templates keyed by slot id, in the order they were added
    pub urls: LinkedHashMap<UrlId, String>,
}

impl BangEntry {
    /// Creates an entry, minting a fresh slot id for every URL
    pub fn new<I, S>(keyword: &str, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut map = LinkedHashMap::new();
        for url in urls {
            map.insert(UrlId::new(), url.into());
        }

        Self {
            keyword: keyword.to_string(),
            urls: map,
        }
    }

    /// Entry with the placeholder keyword and a single placeholder URL
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_KEYWORD, [PLACEHOLDER_URL])
    }

    /// URL templates in slot order
    pub fn url_list(&self) -> Vec<&str> {
        self.urls.values().map(String::as_str).collect()
    }

    /// First URL template, if any (what the popup shows)
    pub fn first_url(&self) -> Option<&str> {
        self.urls.values().next().map(String::as_str)
    }

    /// Converts to the stored shape, dropping identifiers
    pub fn to_stored(&self) -> StoredBang {
        StoredBang {
            bang: self.keyword.clone(),
            urls: self.urls.values().cloned().collect(),
        }
    }
}

impl fmt::Display for BangEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "!{} → {}", self.keyword, self.url_list().join(", "))
    }
}

/// Persisted form of a bang
///
/// Field names match the settings file: `{"bang": "g", "urls": [...]}`.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct StoredBang {
    /// Keyword
    pub bang: String,
    /// URL templates
    pub urls: Vec<String>,
}

impl StoredBang {
    /// Mints identifiers and converts to the editing shape
    pub fn to_entry(&self) -> BangEntry {
        BangEntry::new(&self.bang, self.urls.iter().cloned())
    }

    /// First URL template, if any
    pub fn first_url(&self) -> Option<&str> {
        self.urls.first().map(String::as_str)
    }
}

/// User options stored alongside the bangs
///
/// Only `sortByAlpha` is interpreted here. Any other keys present in the
/// settings file are kept in `extra` and written back unchanged on save.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsOptions {
    /// Show bangs ordered by keyword instead of insertion order
    #[serde(default)]
    pub sort_by_alpha: bool,

    /// Options owned by other parts of the extension
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Complete settings document owned by the settings store
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Settings {
    /// Schema version
    pub version: u32,
    /// User options
    #[serde(default)]
    pub options: SettingsOptions,
    /// Bang definitions in display order
    #[serde(default)]
    pub bangs: Vec<StoredBang>,
}

impl Settings {
    /// Settings at the current version with default options
    pub fn new(bangs: Vec<StoredBang>) -> Self {
        Self {
            version: CURRENT_SETTINGS_VERSION,
            options: SettingsOptions::default(),
            bangs,
        }
    }
}

/// Import/export document: `{"version": N, "bangs": [...]}`
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct BangsExport {
    /// Schema version; must equal [`CURRENT_SETTINGS_VERSION`] to import
    pub version: u32,
    /// Bang definitions
    pub bangs: Vec<StoredBang>,
}
