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

//! Import/export of bang documents
//!
//! Converts between the exported JSON document and the editing collection:
//!
//! ```text
//! {"version": 3, "bangs": [{"bang": "g", "urls": ["https://google.com/?q=%s"]}]}
//! ```
//!
//! Parsing is a validated step with three distinguishable failures, checked
//! in this order:
//!
//! 1. **MalformedJson**: the text is not JSON at all
//! 2. **VersionMismatch**: `version` is missing or not numerically equal to
//!    the current version (`3` and `3.0` both match, `"3"` does not)
//! 3. **ConversionError**: `bangs` does not have the stored bang shape, or a
//!    bang has no URL templates
//!
//! No step touches the caller's collection. `merge_import` builds a new
//! collection and the caller swaps it in only on success.
//!
//! # Example
//!
//! ```
//! use custom_bangs::codec::{encode_document, export_document, import_text};
//! use custom_bangs::core::{BangCollection, BangEntry, BangId};
//!
//! let mut bangs = BangCollection::new();
//! bangs.insert(BangId::new(), BangEntry::new("g", ["https://google.com/?q=%s"]));
//!
//! let json = encode_document(&export_document(&bangs))?;
//! let merged = import_text(&BangCollection::new(), &json)?;
//! assert!(merged.content_eq(&bangs));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use atomic_write_file::AtomicWriteFile;
use serde_json::Value;
use std::{
    io::Write,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::types::{BangsExport, StoredBang, CURRENT_SETTINGS_VERSION};
use crate::core::{BangCollection, BangId};

/// File name offered for exports
pub const EXPORT_FILE_NAME: &str = "custombangs.json";

/// Why an import was rejected
#[derive(Debug, Error, PartialEq)]
pub enum ImportError {
    /// Text is not valid JSON
    #[error("Invalid JSON format: {0}")]
    MalformedJson(String),

    /// Document version differs from the current schema version
    #[error("Version mismatch: {} vs {expected}", describe_version(.found))]
    VersionMismatch {
        /// Version this build reads and writes
        expected: u32,
        /// `version` value as found in the document (None if missing)
        found: Option<Value>,
    },

    /// `bangs` is missing or not a list of `{bang, urls}` objects
    #[error("Could not convert JSON to bangs: {0}")]
    ConversionError(String),
}

impl ImportError {
    /// Short label for the failure kind
    pub fn kind(&self) -> ImportErrorKind {
        match self {
            ImportError::MalformedJson(_) => ImportErrorKind::MalformedJson,
            ImportError::VersionMismatch { .. } => ImportErrorKind::VersionMismatch,
            ImportError::ConversionError(_) => ImportErrorKind::ConversionError,
        }
    }
}

/// Failure kinds without their details
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ImportErrorKind {
    /// See [`ImportError::MalformedJson`]
    MalformedJson,
    /// See [`ImportError::VersionMismatch`]
    VersionMismatch,
    /// See [`ImportError::ConversionError`]
    ConversionError,
}

fn describe_version(found: &Option<Value>) -> String {
    match found {
        Some(version) => version.to_string(),
        None => "missing".to_string(),
    }
}

/// Errors writing an export file
#[derive(Debug, Error)]
pub enum ExportError {
    /// Serialisation failed
    #[error("Failed to serialise bangs: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Atomic write operation failed
    #[error("Failed to write export to {path}: {reason}")]
    WriteFailed {
        /// Destination
        path: PathBuf,
        /// Underlying error message
        reason: String,
    },
}

/// Builds the export document for a collection, stamped with the current version
pub fn export_document(collection: &BangCollection) -> BangsExport {
    BangsExport {
        version: CURRENT_SETTINGS_VERSION,
        bangs: collection.to_stored(),
    }
}

/// Serialises an export document as compact JSON
pub fn encode_document(document: &BangsExport) -> Result<String, serde_json::Error> {
    serde_json::to_string(document)
}

/// Parses and validates an import document
pub fn parse_document(raw: &str) -> Result<BangsExport, ImportError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| ImportError::MalformedJson(e.to_string()))?;

    let found = value.get("version");
    if found.and_then(Value::as_f64) != Some(f64::from(CURRENT_SETTINGS_VERSION)) {
        return Err(ImportError::VersionMismatch {
            expected: CURRENT_SETTINGS_VERSION,
            found: found.cloned(),
        });
    }

    let bangs = value
        .get("bangs")
        .ok_or_else(|| ImportError::ConversionError("missing field `bangs`".to_string()))?;

    let bangs: Vec<StoredBang> = serde_json::from_value(bangs.clone())
        .map_err(|e| ImportError::ConversionError(e.to_string()))?;

    if let Some(empty) = bangs.iter().find(|b| b.urls.is_empty()) {
        return Err(ImportError::ConversionError(format!(
            "bang `{}` has no URLs",
            empty.bang
        )));
    }

    Ok(BangsExport {
        version: CURRENT_SETTINGS_VERSION,
        bangs,
    })
}

/// Converts a parsed document to a collection with freshly minted ids
pub fn to_collection(document: &BangsExport) -> BangCollection {
    BangCollection::from_stored(&document.bangs)
}

/// Unions imported bangs into a copy of `existing`
///
/// Existing bangs keep their order and come first, followed by the imported
/// bangs in document order. Nothing is removed. If an imported id is already
/// taken, the imported bang is kept under a newly minted id instead of
/// replacing the existing one.
pub fn merge_import(existing: &BangCollection, imported: &BangCollection) -> BangCollection {
    let mut merged = existing.clone();

    for (id, entry) in imported.iter() {
        let id = if merged.contains(id) {
            let fresh = BangId::new();
            warn!("Imported bang {} collides with an existing id, re-keyed as {}", id, fresh);
            fresh
        } else {
            *id
        };
        merged.insert(id, entry.clone());
    }

    debug!(
        "Merged {} imported bangs into {} existing",
        imported.len(),
        existing.len()
    );
    merged
}

/// Parses, converts and merges an import in one step
pub fn import_text(existing: &BangCollection, raw: &str) -> Result<BangCollection, ImportError> {
    let document = parse_document(raw)?;
    let imported = to_collection(&document);
    Ok(merge_import(existing, &imported))
}

/// Resolves where an export goes: directories get the default file name
pub fn export_path(target: &Path) -> PathBuf {
    if target.is_dir() {
        target.join(EXPORT_FILE_NAME)
    } else {
        target.to_path_buf()
    }
}

/// Writes the export document for `collection` and returns the final path
pub fn write_export(collection: &BangCollection, target: &Path) -> Result<PathBuf, ExportError> {
    let path = export_path(target);
    let json = encode_document(&export_document(collection))?;

    let write_failed = |e: std::io::Error| ExportError::WriteFailed {
        path: path.clone(),
        reason: e.to_string(),
    };

    let mut file = AtomicWriteFile::options().open(&path).map_err(write_failed)?;
    file.write_all(json.as_bytes()).map_err(write_failed)?;
    file.commit().map_err(write_failed)?;

    info!("Exported {} bangs to {}", collection.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests;
