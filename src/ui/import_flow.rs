//! Import state machine
//!
//! ```text
//! Idle → FileSelected → Parsing ─┬→ ValidationFailed(kind) → Idle
//!                                └→ Validated → Merging → Idle
//! ```
//!
//! A run always ends back in `Idle`. The live collection is only replaced
//! by the caller after a run returns `Ok`, so a failed import leaves it
//! untouched.

use tracing::{debug, warn};

use crate::codec::{merge_import, parse_document, to_collection, ImportError, ImportErrorKind};
use crate::core::BangCollection;

/// Where an import currently is
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ImportState {
    Idle,
    /// A file was chosen; holds its display name
    FileSelected(String),
    Parsing,
    ValidationFailed(ImportErrorKind),
    Validated,
    Merging,
}

/// Drives one import at a time and remembers the path the last one took
#[derive(Debug)]
pub struct ImportFlow {
    state: ImportState,
    last_run: Vec<ImportState>,
}

impl Default for ImportFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportFlow {
    pub fn new() -> Self {
        Self {
            state: ImportState::Idle,
            last_run: Vec::new(),
        }
    }

    /// Current state; `Idle` whenever no run is in progress
    pub fn state(&self) -> &ImportState {
        &self.state
    }

    /// Every state visited by the most recent run, in order
    pub fn last_run(&self) -> &[ImportState] {
        &self.last_run
    }

    /// Parses `raw` and merges it into a copy of `existing`
    ///
    /// # Errors
    ///
    /// Returns the [`ImportError`] that stopped the run. `existing` is never
    /// modified.
    pub fn run(
        &mut self,
        existing: &BangCollection,
        file_name: &str,
        raw: &str,
    ) -> Result<BangCollection, ImportError> {
        self.last_run.clear();
        self.transition(ImportState::FileSelected(file_name.to_string()));
        self.transition(ImportState::Parsing);

        let document = match parse_document(raw) {
            Ok(document) => document,
            Err(e) => {
                warn!("Import of {} rejected: {}", file_name, e);
                self.transition(ImportState::ValidationFailed(e.kind()));
                self.transition(ImportState::Idle);
                return Err(e);
            }
        };

        self.transition(ImportState::Validated);
        let imported = to_collection(&document);

        self.transition(ImportState::Merging);
        let merged = merge_import(existing, &imported);

        self.transition(ImportState::Idle);
        Ok(merged)
    }

    fn transition(&mut self, next: ImportState) {
        debug!("Import: {:?} -> {:?}", self.state, next);
        self.last_run.push(next.clone());
        self.state = next;
    }
}
