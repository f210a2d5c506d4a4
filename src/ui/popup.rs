//! Popup bang list
//!
//! The browser-action popup shows the saved bangs (not the unsaved options
//! session) as `!keyword` followed by the first URL, with the same search box
//! behaviour as the options page.

use std::fmt;

use crate::config::{ConfigError, SettingsStore};
use crate::core::collection::text_matches;
use crate::core::types::StoredBang;

/// One popup line
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PopupRow<'a> {
    pub keyword: &'a str,
    pub first_url: Option<&'a str>,
}

impl fmt::Display for PopupRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.first_url {
            Some(url) => write!(f, "!{} {}", self.keyword, url),
            None => write!(f, "!{}", self.keyword),
        }
    }
}

/// Read-only list of stored bangs
#[derive(Clone, Debug, Default)]
pub struct PopupList {
    bangs: Vec<StoredBang>,
}

impl PopupList {
    /// Loads the saved bangs; an empty store gives an empty list
    pub fn load<S: SettingsStore>(store: &S) -> Result<Self, ConfigError> {
        let bangs = store
            .get_settings()?
            .map(|settings| settings.bangs)
            .unwrap_or_default();
        Ok(Self { bangs })
    }

    pub fn from_bangs(bangs: Vec<StoredBang>) -> Self {
        Self { bangs }
    }

    pub fn len(&self) -> usize {
        self.bangs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bangs.is_empty()
    }

    /// Rows whose keyword or any URL contains `search_term`, ignoring case
    pub fn rows(&self, search_term: &str) -> Vec<PopupRow<'_>> {
        self.bangs
            .iter()
            .filter(|bang| text_matches(&bang.bang, bang.urls.iter().map(String::as_str), search_term))
            .map(|bang| PopupRow {
                keyword: &bang.bang,
                first_url: bang.first_url(),
            })
            .collect()
    }
}
