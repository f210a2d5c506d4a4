use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing the settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Settings file does not exist (only for operations that need it).
    #[error("Settings file not found: {0}")]
    NotFound(PathBuf),
    /// Backup directory cannot be created or written to.
    #[error("Backup directory not writable: {0}")]
    BackupDirNotWritable(PathBuf),
    /// Failed to create backup file.
    #[error("Failed to create backup: {0}")]
    BackupFailed(String),
    /// Atomic write operation failed.
    #[error("Atomic write failed: {0}")]
    WriteFailed(String),
    /// Settings file exists but is not a valid settings document.
    #[error("Settings file {path} is corrupt: {reason}")]
    Corrupt {
        /// Offending file
        path: PathBuf,
        /// Parser message
        reason: String,
    },
    /// Settings file was written by a different schema version.
    #[error("Settings file version {found} is not supported (expected {expected})")]
    UnsupportedVersion {
        /// Version this build reads and writes
        expected: u32,
        /// Version found on disk
        found: u32,
    },
    /// Settings could not be serialised.
    #[error("Failed to serialise settings: {0}")]
    Serialize(#[from] serde_json::Error),
    /// Generic I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
