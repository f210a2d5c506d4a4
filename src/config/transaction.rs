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

//! Settings transaction management with automatic backups
//!
//! Provides all-or-nothing writes of the settings file.

use atomic_write_file::AtomicWriteFile;
use std::{fs, io::Write, path::PathBuf};
use tracing::{debug, error, warn};

use crate::config::{ConfigError, ConfigManager};

/// Atomic settings write with automatic backup.
///
/// # Lifecycle
///
/// 1. `begin()` - Creates a timestamped backup immediately (if a file exists)
/// 2. Caller prepares new content (in memory)
/// 3. `commit()` - Writes atomically, rolling back if the write fails, or
///    `rollback()` - Restores the original
///
/// # Example
///
/// ```no_run
/// use custom_bangs::config::{ConfigManager, SettingsTransaction};
/// use std::path::PathBuf;
///
/// let manager = ConfigManager::new(PathBuf::from("settings.json"))?;
/// let tx = SettingsTransaction::begin(&manager)?;
///
/// match tx.commit(r#"{"version": 3, "bangs": []}"#) {
///     Ok(()) => println!("Settings saved"),
///     Err(e) => eprintln!("Commit failed: {}", e),
/// }
/// # Ok::<(), custom_bangs::config::ConfigError>(())
/// ```
pub struct SettingsTransaction<'a> {
    manager: &'a ConfigManager,
    /// None when there was no settings file to back up (first save)
    backup_path: Option<PathBuf>,
}

impl<'a> SettingsTransaction<'a> {
    /// Begins a new transaction by creating a timestamped backup.
    ///
    /// # Errors
    ///
    /// Returns an error if the existing settings file cannot be read or the
    /// backup cannot be written. Nothing has been modified in that case.
    pub fn begin(manager: &'a ConfigManager) -> Result<Self, ConfigError> {
        let backup_path = if manager.exists() {
            Some(manager.create_timestamped_backup()?)
        } else {
            None
        };

        Ok(Self {
            manager,
            backup_path,
        })
    }

    /// Backup taken when the transaction began
    pub fn backup_path(&self) -> Option<&PathBuf> {
        self.backup_path.as_ref()
    }

    /// Commits the transaction by atomically writing new content.
    ///
    /// The write is temp file + rename, so the settings file is never
    /// half-written. The backup from `begin()` stays in the backup directory.
    /// Consumes the transaction to prevent double commits.
    ///
    /// # Errors
    ///
    /// Returns the write error after rolling back. A rollback failure is
    /// logged and does not replace the write error.
    pub fn commit(self, new_content: &str) -> Result<(), ConfigError> {
        if let Err(e) = write_atomically(&self.manager.settings_path, new_content) {
            warn!("Commit failed: {}", e);
            if let Err(rollback_err) = self.rollback() {
                error!("Rollback after failed commit also failed: {}", rollback_err);
            }
            return Err(e);
        }

        debug!("Committed settings to {}", self.manager.settings_path.display());
        Ok(())
    }

    /// Rolls back to the state when the transaction began.
    ///
    /// Restores the backup if there was one. If the settings file did not
    /// exist when the transaction began, it is removed again.
    pub fn rollback(&self) -> Result<(), ConfigError> {
        match &self.backup_path {
            Some(backup_path) => {
                let backup_content = fs::read_to_string(backup_path)?;
                write_atomically(&self.manager.settings_path, &backup_content)?;
                warn!("Rolled back settings from {}", backup_path.display());
            }
            None => {
                if self.manager.settings_path.is_file() {
                    fs::remove_file(&self.manager.settings_path)?;
                }
                warn!("Rolled back settings to no file");
            }
        }

        Ok(())
    }
}

fn write_atomically(path: &PathBuf, content: &str) -> Result<(), ConfigError> {
    let mut file = AtomicWriteFile::options()
        .open(path)
        .map_err(|e| ConfigError::WriteFailed(format!("Failed to open for atomic write: {}", e)))?;

    file.write_all(content.as_bytes())
        .map_err(|e| ConfigError::WriteFailed(format!("Failed to write content: {}", e)))?;

    file.commit()
        .map_err(|e| ConfigError::WriteFailed(format!("Failed to commit atomic write: {}", e)))?;

    Ok(())
}
