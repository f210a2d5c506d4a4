// Copyright 2025 bakri (tidynest@proton.me)
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

//! Bang keyword and URL template validation
//!
//! Checks applied before a collection is saved or reported by `check`:
//! - Keywords must be a single non-empty token without the `!` trigger
//! - URL templates must parse as absolute URLs once the placeholder is filled
//! - Templates without a `%s` placeholder are allowed but flagged, since the
//!   query would be dropped
//!
//! Per-field checks return `ValidationError`. `validate_collection` runs all
//! of them and collects the outcome into a `ValidationReport`, where errors
//! and warnings are kept apart so callers can decide what blocks.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;
use url::Url;

use crate::core::collection::BangCollection;
use crate::core::conflict::ConflictDetector;
use crate::core::types::{BangEntry, BangId, QUERY_PLACEHOLDER};

/// Maximum keyword length
const MAX_KEYWORD_LEN: usize = 64;

/// Maximum URL template length
const MAX_URL_LEN: usize = 2048;

/// A keyword is one run of printable, non-space characters not starting with `!`.
static KEYWORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^!\s]\S*$").expect("keyword pattern should be valid regex")
});

/// Validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Keyword is empty or whitespace
    #[error("Keyword is empty")]
    EmptyKeyword,

    /// Keyword contains whitespace or starts with the trigger character
    #[error("Invalid keyword '{0}': must be a single word without a leading '!'")]
    InvalidKeyword(String),

    /// Keyword exceeds maximum length
    #[error("Keyword too long: {0} characters (max 64)")]
    KeywordTooLong(usize),

    /// URL template does not parse
    #[error("Invalid URL template '{url}': {reason}")]
    InvalidUrl {
        /// The offending template
        url: String,
        /// Parser message
        reason: String,
    },

    /// URL template exceeds maximum length
    #[error("URL template too long: {0} characters (max 2048)")]
    UrlTooLong(usize),
}

/// Validates keyword format
pub fn validate_keyword(keyword: &str) -> Result<(), ValidationError> {
    if keyword.trim().is_empty() {
        return Err(ValidationError::EmptyKeyword);
    }

    let len = keyword.chars().count();
    if len > MAX_KEYWORD_LEN {
        return Err(ValidationError::KeywordTooLong(len));
    }

    if KEYWORD_PATTERN.is_match(keyword) {
        Ok(())
    } else {
        Err(ValidationError::InvalidKeyword(keyword.to_string()))
    }
}

/// Validates a URL template
///
/// The placeholder is replaced with a sample query before parsing, so
/// templates like `https://example.com/?q=%s` parse as ordinary URLs.
pub fn validate_url_template(template: &str) -> Result<(), ValidationError> {
    if template.len() > MAX_URL_LEN {
        return Err(ValidationError::UrlTooLong(template.len()));
    }

    let sample = template.replace(QUERY_PLACEHOLDER, "query");
    Url::parse(&sample).map_err(|e| ValidationError::InvalidUrl {
        url: template.to_string(),
        reason: e.to_string(),
    })?;

    Ok(())
}

/// True when the template contains the query placeholder
pub fn has_placeholder(template: &str) -> bool {
    template.contains(QUERY_PLACEHOLDER)
}

/// Validates a complete bang
///
/// Performs all per-field checks and returns the first failure.
pub fn validate_bang(entry: &BangEntry) -> Result<(), ValidationError> {
    validate_keyword(&entry.keyword)?;

    for url in entry.urls.values() {
        validate_url_template(url)?;
    }

    Ok(())
}

/// Validation severity level
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValidationLevel {
    /// The bang cannot work as written
    Error,
    /// The bang works but probably not as intended
    Warning,
}

/// A single issue found in a collection
#[derive(Clone, Debug)]
pub struct ValidationIssue {
    /// Bang with the issue
    pub bang_id: BangId,
    /// Keyword of that bang, for display
    pub keyword: String,
    /// Severity level
    pub validation_level: ValidationLevel,
    /// Human-readable description of the issue
    pub message: String,
}

/// Every issue found in a collection
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// All issues (errors + warnings) in collection order
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Creates a new empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the report contains any Error-level issues
    pub fn has_errors(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.validation_level == ValidationLevel::Error)
    }

    /// Returns true if nothing was found
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues at one level
    pub fn at_level(&self, level: ValidationLevel) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(move |issue| issue.validation_level == level)
    }

    fn push(&mut self, id: &BangId, entry: &BangEntry, level: ValidationLevel, message: String) {
        self.issues.push(ValidationIssue {
            bang_id: *id,
            keyword: entry.keyword.clone(),
            validation_level: level,
            message,
        });
    }
}

/// Validates every bang in a collection
///
/// Errors: malformed keywords and unparsable URLs.
/// Warnings: templates without `%s`, and keywords shared by several bangs.
pub fn validate_collection(collection: &BangCollection) -> ValidationReport {
    let mut report = ValidationReport::new();

    for (id, entry) in collection.iter() {
        if let Err(e) = validate_keyword(&entry.keyword) {
            report.push(id, entry, ValidationLevel::Error, e.to_string());
        }

        for url in entry.urls.values() {
            match validate_url_template(url) {
                Err(e) => report.push(id, entry, ValidationLevel::Error, e.to_string()),
                Ok(()) if !has_placeholder(url) => report.push(
                    id,
                    entry,
                    ValidationLevel::Warning,
                    format!("URL '{}' has no {} placeholder; the query will be ignored", url, QUERY_PLACEHOLDER),
                ),
                Ok(()) => {}
            }
        }
    }

    let detector = ConflictDetector::from_collection(collection);
    for conflict in detector.find_conflicts() {
        for (id, entry) in &conflict.conflicting_bangs {
            report.push(
                id,
                entry,
                ValidationLevel::Warning,
                format!(
                    "Keyword '{}' is used by {} bangs",
                    conflict.keyword,
                    conflict.conflicting_bangs.len()
                ),
            );
        }
    }

    report
}
