//! Default bang dataset
//!
//! The defaults ship inside the binary as `settings.default.json`. They are
//! parsed once per session into a [`DefaultDataset`] and handed to whoever
//! needs them (first run, reset to default), so there is no global state.

use std::path::PathBuf;

use crate::config::ConfigError;
use crate::core::types::{Settings, CURRENT_SETTINGS_VERSION};
use crate::core::BangCollection;

const DEFAULT_SETTINGS_JSON: &str = include_str!("settings.default.json");

/// Parsed default settings and the matching bang collection
#[derive(Clone, Debug)]
pub struct DefaultDataset {
    settings: Settings,
    bangs: BangCollection,
}

impl DefaultDataset {
    /// Parses the embedded defaults
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Corrupt` if the embedded document does not parse
    /// or carries a different schema version.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_json(DEFAULT_SETTINGS_JSON)
    }

    /// Parses defaults from arbitrary JSON text
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let corrupt = |reason: String| ConfigError::Corrupt {
            path: PathBuf::from("settings.default.json"),
            reason,
        };

        let settings: Settings = serde_json::from_str(json).map_err(|e| corrupt(e.to_string()))?;
        if settings.version != CURRENT_SETTINGS_VERSION {
            return Err(corrupt(format!(
                "default dataset has version {}, expected {}",
                settings.version, CURRENT_SETTINGS_VERSION
            )));
        }

        let bangs = BangCollection::from_stored(&settings.bangs);
        Ok(Self { settings, bangs })
    }

    /// Default bangs, with ids fixed for the lifetime of this dataset
    pub fn bangs(&self) -> &BangCollection {
        &self.bangs
    }

    /// Default settings document (options + bangs)
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
