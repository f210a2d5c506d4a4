//! In-memory settings store
//!
//! Keeps settings in a `RefCell` instead of on disk. Used by the controller
//! tests and by callers that want a throwaway session.

use std::cell::{Cell, RefCell};

use crate::config::{ConfigError, SettingsStore};
use crate::core::types::Settings;

/// Settings store backed by memory
#[derive(Debug, Default)]
pub struct InMemoryStore {
    settings: RefCell<Option<Settings>>,
    saves: Cell<usize>,
}

impl InMemoryStore {
    /// Empty store, as on first run
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already holds `settings`
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings: RefCell::new(Some(settings)),
            saves: Cell::new(0),
        }
    }

    /// Number of successful `save_settings` calls
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    /// Current stored settings
    pub fn snapshot(&self) -> Option<Settings> {
        self.settings.borrow().clone()
    }
}

impl SettingsStore for InMemoryStore {
    fn get_settings(&self) -> Result<Option<Settings>, ConfigError> {
        Ok(self.settings.borrow().clone())
    }

    fn save_settings(&self, settings: &Settings) -> Result<(), ConfigError> {
        *self.settings.borrow_mut() = Some(settings.clone());
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
