//! Settings storage with atomic writes and backup support.
//!
//! This module is the storage collaborator for the options controller. It
//! exposes the [`SettingsStore`] trait (`get_settings` / `save_settings`) and
//! a file-backed implementation, [`ConfigManager`]. Key features:
//!
//! - **Atomic writes**: Uses temp-file-then-rename to prevent corruption
//! - **Automatic backups**: Every save of an existing file creates a timestamped backup
//! - **Rollback safety**: Failed transactions leave the original settings untouched
//! - **Bounded history**: Only the newest backups are kept
//!
//! # Example
//!
//! ```no_run
//! use custom_bangs::config::{ConfigManager, SettingsStore};
//! use custom_bangs::core::Settings;
//!
//! let manager = ConfigManager::new("/home/user/.config/custom-bangs/settings.json".into())?;
//!
//! if manager.get_settings()?.is_none() {
//!     manager.save_settings(&Settings::new(Vec::new()))?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use chrono::{Local, NaiveDateTime};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::core::types::{Settings, CURRENT_SETTINGS_VERSION};

pub mod defaults;
pub mod error;
pub mod memory;
pub mod transaction;

pub use defaults::DefaultDataset;
pub use error::ConfigError;
pub use memory::InMemoryStore;
pub use transaction::SettingsTransaction;

/// Where settings live unless `--settings` says otherwise
pub const DEFAULT_SETTINGS_PATH: &str = "~/.config/custom-bangs/settings.json";

/// Number of backups kept after each save
pub const MAX_BACKUPS: usize = 10;

/// Timestamp format used in backup file names
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H%M%S";

/// Read/write access to the stored settings
///
/// The options controller only talks to storage through this trait, so it
/// can run against the settings file or an in-memory store.
pub trait SettingsStore {
    /// Returns the stored settings, or `None` if nothing has been saved yet
    fn get_settings(&self) -> Result<Option<Settings>, ConfigError>;

    /// Replaces the stored settings
    fn save_settings(&self, settings: &Settings) -> Result<(), ConfigError>;
}

/// Expands `~` and environment variables in a user-supplied path
pub fn expand_path(path: &Path) -> Result<PathBuf, ConfigError> {
    let raw = path.to_str().ok_or_else(|| {
        ConfigError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "Invalid path encoding",
        ))
    })?;

    let expanded = shellexpand::tilde(raw);
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Label for a backup file: its timestamp (`2025-10-15 14:30:25`), or the
/// file name when the name carries no readable timestamp.
pub fn describe_backup(path: &Path) -> String {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return "Unknown backup".to_string();
    };

    match backup_stamp(name) {
        Some((timestamp, _)) => timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => name.to_string(),
    }
}

/// Timestamp and same-second counter from a backup file name
/// (`settings.json.2025-10-15_143025-2` gives the time and 2)
fn backup_stamp(name: &str) -> Option<(NaiveDateTime, u32)> {
    let stamp = name.rsplit('.').next()?;
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(stamp, BACKUP_TIMESTAMP_FORMAT) {
        return Some((timestamp, 0));
    }

    let (base, counter) = stamp.rsplit_once('-')?;
    let counter = counter.parse().ok()?;
    let timestamp = NaiveDateTime::parse_from_str(base, BACKUP_TIMESTAMP_FORMAT).ok()?;
    Some((timestamp, counter))
}

/// Manages the settings file with safe atomic operations.
///
/// Reads are plain file reads. Writes go through [`SettingsTransaction`],
/// which backs up the current file before replacing it.
#[derive(Debug)]
pub struct ConfigManager {
    /// Path to the settings file.
    pub(crate) settings_path: PathBuf,
    /// Directory holding timestamped backups.
    pub(crate) backup_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a new ConfigManager for the given settings file.
    ///
    /// The file itself does not need to exist yet (first run). Nothing is
    /// created on disk here: the parent directory is created by the first
    /// save and `backups/` by the first backup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::BackupDirNotWritable` if the backup directory
    /// exists but is read-only.
    pub fn new(settings_path: PathBuf) -> Result<Self, ConfigError> {
        // e.g., ~/.config/custom-bangs/settings.json → ~/.config/custom-bangs/backups/
        let parent = settings_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let backup_dir = parent.join("backups");

        if backup_dir.exists() && backup_dir.metadata()?.permissions().readonly() {
            return Err(ConfigError::BackupDirNotWritable(backup_dir));
        }

        if settings_path.read_link().is_ok() {
            warn!("Settings file is a symlink: {}", settings_path.display());
        }

        debug!("Using settings file {}", settings_path.display());
        Ok(Self {
            settings_path,
            backup_dir,
        })
    }

    /// Path to the settings file
    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Directory holding backups
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// True once settings have been saved at least once
    pub fn exists(&self) -> bool {
        self.settings_path.exists()
    }

    /// Reads the raw settings file content.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist and
    /// `ConfigError::Io` if it cannot be read.
    pub fn read_raw(&self) -> Result<String, ConfigError> {
        if !self.exists() {
            return Err(ConfigError::NotFound(self.settings_path.clone()));
        }
        Ok(fs::read_to_string(&self.settings_path)?)
    }

    /// Copies the current settings file into the backup directory.
    ///
    /// File names look like `settings.json.2025-10-10_221500`. If a backup
    /// with the same timestamp already exists a counter is appended.
    pub(crate) fn create_timestamped_backup(&self) -> Result<PathBuf, ConfigError> {
        let content = self.read_raw()?;

        if !self.backup_dir.exists() {
            fs::create_dir_all(&self.backup_dir)
                .map_err(|_| ConfigError::BackupDirNotWritable(self.backup_dir.clone()))?;
        }

        let timestamp = Local::now().format(BACKUP_TIMESTAMP_FORMAT);
        let original_name = self
            .settings_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ConfigError::BackupFailed("Settings path has no file name".to_string()))?;

        let mut backup_path = self.backup_dir.join(format!("{}.{}", original_name, timestamp));
        let mut counter = 1;
        while backup_path.exists() {
            backup_path = self
                .backup_dir
                .join(format!("{}.{}-{}", original_name, timestamp, counter));
            counter += 1;
        }

        fs::write(&backup_path, &content)
            .map_err(|e| ConfigError::BackupFailed(format!("{}: {}", backup_path.display(), e)))?;

        debug!("Created backup {}", backup_path.display());
        Ok(backup_path)
    }

    /// Lists backups of this settings file, oldest first.
    ///
    /// Ordered by timestamp, then by same-second counter.
    pub fn list_backups(&self) -> Result<Vec<PathBuf>, ConfigError> {
        let prefix = match self.settings_path.file_name().and_then(|n| n.to_str()) {
            Some(name) => format!("{}.", name),
            None => return Ok(Vec::new()),
        };

        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups: Vec<PathBuf> = fs::read_dir(&self.backup_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .map(|n| n.starts_with(&prefix))
                        .unwrap_or(false)
            })
            .collect();

        backups.sort_by_cached_key(|path| {
            let stamp = path.file_name().and_then(|n| n.to_str()).and_then(backup_stamp);
            (stamp, path.clone())
        });
        Ok(backups)
    }

    /// Deletes all but the newest `keep` backups and returns how many were removed.
    pub fn cleanup_old_backups(&self, keep: usize) -> Result<usize, ConfigError> {
        let backups = self.list_backups()?;
        if backups.len() <= keep {
            return Ok(0);
        }

        let excess = backups.len() - keep;
        for old in &backups[..excess] {
            fs::remove_file(old)?;
        }

        debug!("Removed {} old backups", excess);
        Ok(excess)
    }
}

impl SettingsStore for ConfigManager {
    fn get_settings(&self) -> Result<Option<Settings>, ConfigError> {
        if !self.exists() {
            debug!("No settings file at {}", self.settings_path.display());
            return Ok(None);
        }

        let content = self.read_raw()?;
        let settings: Settings =
            serde_json::from_str(&content).map_err(|e| ConfigError::Corrupt {
                path: self.settings_path.clone(),
                reason: e.to_string(),
            })?;

        if settings.version != CURRENT_SETTINGS_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                expected: CURRENT_SETTINGS_VERSION,
                found: settings.version,
            });
        }

        if let Some(empty) = settings.bangs.iter().find(|b| b.urls.is_empty()) {
            return Err(ConfigError::Corrupt {
                path: self.settings_path.clone(),
                reason: format!("bang `{}` has no URLs", empty.bang),
            });
        }

        debug!("Loaded {} bangs from settings", settings.bangs.len());
        Ok(Some(settings))
    }

    fn save_settings(&self, settings: &Settings) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(settings)?;

        if let Some(parent) = self.settings_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let tx = SettingsTransaction::begin(self)?;
        tx.commit(&content)?;

        self.cleanup_old_backups(MAX_BACKUPS)?;
        info!(
            "Saved {} bangs to {}",
            settings.bangs.len(),
            self.settings_path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests;
