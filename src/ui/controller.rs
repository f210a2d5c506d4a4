//! MVC Controller - Mediates between Model (settings store, collection) and View (CLI)
//!
//! # Responsibilities
//!
//! - Load bangs from the settings store, falling back to the defaults
//! - Apply the options page actions (add, remove, edit, reset, import)
//! - Compute the visible rows (sort, then search filter)
//! - Track whether there are changes that have not been saved
//! - Validate keywords/URLs and detect duplicate keywords
//!
//! # Architecture
//!
//! The Controller owns the editing session but knows nothing about how it
//! is displayed. Actions that the options page reports with a toast return
//! a [`Notice`]; everything else returns a `Result`.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::codec::{write_export, ExportError};
use crate::config::{ConfigError, DefaultDataset, SettingsStore};
use crate::core::types::{BangEntry, BangId, Settings, SettingsOptions, UrlId, CURRENT_SETTINGS_VERSION};
use crate::core::validator::ValidationReport;
use crate::core::{validate_collection, BangCollection, CollectionError, Conflict, ConflictDetector};
use crate::ui::import_flow::ImportFlow;
use crate::ui::notice::Notice;

/// MVC Controller for one editing session
///
/// Generic over the storage collaborator so it runs against the settings
/// file ([`ConfigManager`](crate::config::ConfigManager)) or an
/// [`InMemoryStore`](crate::config::InMemoryStore).
pub struct Controller<S: SettingsStore> {
    /// Storage collaborator
    store: S,
    /// Baseline used on first run and by reset
    defaults: DefaultDataset,
    /// Bangs being edited
    bangs: BangCollection,
    /// Options being edited (including keys this crate does not interpret)
    options: SettingsOptions,
    /// Current search box content
    search_term: String,
    /// What the store held after the last load/save (None on first run)
    saved: Option<Settings>,
    /// Import state machine
    import_flow: ImportFlow,
}

impl<S: SettingsStore> Controller<S> {
    /// Creates a Controller and loads the stored settings
    ///
    /// When the store holds nothing yet, the session starts from the
    /// default dataset and counts as unsaved.
    ///
    /// # Errors
    ///
    /// Returns the store's error if stored settings exist but cannot be read.
    ///
    /// # Example
    ///
    /// ```
    /// use custom_bangs::config::{DefaultDataset, InMemoryStore};
    /// use custom_bangs::ui::Controller;
    ///
    /// let defaults = DefaultDataset::load()?;
    /// let controller = Controller::new(InMemoryStore::new(), defaults)?;
    /// assert!(controller.has_unsaved_changes());
    /// # Ok::<(), custom_bangs::config::ConfigError>(())
    /// ```
    pub fn new(store: S, defaults: DefaultDataset) -> Result<Self, ConfigError> {
        let saved = store.get_settings()?;

        let (bangs, options) = match &saved {
            Some(settings) => (
                BangCollection::from_stored(&settings.bangs),
                settings.options.clone(),
            ),
            None => {
                info!("No stored settings, starting from defaults");
                (
                    defaults.bangs().clone(),
                    defaults.settings().options.clone(),
                )
            }
        };

        debug!("Controller loaded {} bangs", bangs.len());
        Ok(Self {
            store,
            defaults,
            bangs,
            options,
            search_term: String::new(),
            saved,
            import_flow: ImportFlow::new(),
        })
    }

    /// Bangs being edited, in natural order
    pub fn bangs(&self) -> &BangCollection {
        &self.bangs
    }

    pub fn options(&self) -> &SettingsOptions {
        &self.options
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn import_flow(&self) -> &ImportFlow {
        &self.import_flow
    }

    /// Adds a placeholder bang at the top of the list
    pub fn add(&mut self) -> (BangId, Notice) {
        let id = self.bangs.add();
        (id, Notice::bang_added())
    }

    /// Removes a bang; an id that is not present is a no-op
    ///
    /// # Errors
    ///
    /// `LastBang` if the bang is the only one left (the options page never
    /// lets the list become empty).
    pub fn remove(&mut self, id: &BangId) -> Result<(), CollectionError> {
        if self.bangs.contains(id) && self.bangs.is_lonely() {
            return Err(CollectionError::LastBang(*id));
        }
        self.bangs.remove(id);
        Ok(())
    }

    pub fn set_keyword(&mut self, id: &BangId, keyword: &str) -> Result<(), CollectionError> {
        self.bangs.set_keyword(id, keyword)
    }

    pub fn set_url(&mut self, id: &BangId, url_id: &UrlId, url: &str) -> Result<(), CollectionError> {
        self.bangs.set_url(id, url_id, url)
    }

    pub fn add_url(&mut self, id: &BangId) -> Result<UrlId, CollectionError> {
        self.bangs.add_url(id)
    }

    pub fn remove_url(&mut self, id: &BangId, url_id: &UrlId) -> Result<(), CollectionError> {
        self.bangs.remove_url(id, url_id)
    }

    /// Replaces all bangs with the default dataset (not saved until `save`)
    pub fn reset_to_default(&mut self) {
        self.bangs.reset_to_default(self.defaults.bangs());
    }

    pub fn set_search(&mut self, search_term: &str) {
        self.search_term = search_term.to_string();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_sort_by_alpha(&mut self, sort_by_alpha: bool) {
        self.options.sort_by_alpha = sort_by_alpha;
    }

    /// Rows to display: sorted per options, then filtered by the search term
    pub fn rows(&self) -> Vec<(&BangId, &BangEntry)> {
        self.bangs.view(&self.search_term, self.options.sort_by_alpha)
    }

    /// True when only one bang is left (delete is disabled)
    pub fn is_lonely(&self) -> bool {
        self.bangs.is_lonely()
    }

    /// Settings document for the current session state
    pub fn current_settings(&self) -> Settings {
        Settings {
            version: CURRENT_SETTINGS_VERSION,
            options: self.options.clone(),
            bangs: self.bangs.to_stored(),
        }
    }

    /// True when the session differs from what was last loaded or saved
    pub fn has_unsaved_changes(&self) -> bool {
        match &self.saved {
            Some(saved) => *saved != self.current_settings(),
            None => true,
        }
    }

    /// True until the store holds settings (nothing loaded, nothing saved)
    pub fn is_first_run(&self) -> bool {
        self.saved.is_none()
    }

    /// Commits the session to the store
    ///
    /// # Errors
    ///
    /// Returns the store's error; the session keeps its unsaved changes.
    pub fn save(&mut self) -> Result<(), ConfigError> {
        let settings = self.current_settings();
        self.store.save_settings(&settings)?;
        info!("Saved {} bangs", settings.bangs.len());
        self.saved = Some(settings);
        Ok(())
    }

    /// Writes `custombangs.json` (or the given file) and returns its path
    pub fn export_to(&self, target: &Path) -> Result<PathBuf, ExportError> {
        write_export(&self.bangs, target)
    }

    /// Imports a document that has already been read into memory
    ///
    /// On success the imported bangs are appended to the session. On
    /// failure nothing changes. Either way the outcome is a notice.
    pub fn import_text(&mut self, file_name: &str, raw: &str) -> Notice {
        match self.import_flow.run(&self.bangs, file_name, raw) {
            Ok(merged) => {
                info!(
                    "Imported {} bangs from {}",
                    merged.len().saturating_sub(self.bangs.len()),
                    file_name
                );
                self.bangs = merged;
                Notice::import_succeeded(file_name)
            }
            Err(e) => Notice::import_failed(&e),
        }
    }

    /// Reads a file and imports it
    pub fn import_file(&mut self, path: &Path) -> Notice {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match fs::read_to_string(path) {
            Ok(raw) => self.import_text(&file_name, &raw),
            Err(e) => Notice::error("Import failed", format!("Could not read {}: {}", file_name, e)),
        }
    }

    /// Keyword and URL template checks for every bang
    pub fn validate(&self) -> ValidationReport {
        validate_collection(&self.bangs)
    }

    /// Keywords used by more than one bang
    pub fn conflicts(&self) -> Vec<Conflict> {
        ConflictDetector::from_collection(&self.bangs).find_conflicts()
    }

    pub fn bang_count(&self) -> usize {
        self.bangs.len()
    }
}
