//! User-facing notices
//!
//! The options page reports the outcome of an action as a short toast: a
//! title, an optional description and a status colour. Controller methods
//! return a [`Notice`] instead of raising, and the front end decides how to
//! show it.

use std::fmt;

use crate::codec::ImportError;

/// Severity of a notice
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NoticeStatus {
    /// Neutral information (e.g. a bang was added)
    Info,
    /// An action completed
    Success,
    /// An action was rejected
    Error,
}

/// Outcome message for a single user action
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notice {
    pub title: String,
    pub description: Option<String>,
    pub status: NoticeStatus,
}

impl Notice {
    pub fn info(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: NoticeStatus::Info,
        }
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: Some(description.into()),
            status: NoticeStatus::Success,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: Some(description.into()),
            status: NoticeStatus::Error,
        }
    }

    /// Shown after a new bang is put at the top of the list
    pub fn bang_added() -> Self {
        Self::info("New shortcut added")
    }

    /// Shown after a successful import from `file_name`
    pub fn import_succeeded(file_name: &str) -> Self {
        Self::success(
            "Import successful",
            format!("Loaded from {}. Don't forget to save!", file_name),
        )
    }

    /// Maps an import failure to its toast
    ///
    /// Parser details are logged, not shown: the description only names the
    /// failure kind, plus both versions for a version mismatch.
    pub fn import_failed(error: &ImportError) -> Self {
        let description = match error {
            ImportError::MalformedJson(_) => "Invalid JSON format".to_string(),
            ImportError::VersionMismatch { .. } => error.to_string(),
            ImportError::ConversionError(_) => "Could not convert JSON to bangs".to_string(),
        };
        Self::error("Import failed", description)
    }

    pub fn is_error(&self) -> bool {
        self.status == NoticeStatus::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(description) => write!(f, "{}: {}", self.title, description),
            None => write!(f, "{}", self.title),
        }
    }
}
