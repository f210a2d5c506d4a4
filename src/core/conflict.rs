//! Duplicate keyword detection
//!
//! Two bangs with the same keyword are allowed in the collection, but only
//! one of them can win when the user types it. This module groups bangs by
//! keyword with a HashMap so duplicates can be shown to the user.
//!
//! # Performance
//! - Add bang: O(1) average case
//! - List all conflicts: O(n) where n = number of unique keywords

use std::collections::HashMap;

use crate::core::collection::BangCollection;
use crate::core::types::{BangEntry, BangId};

/// Groups bangs by keyword.
pub struct ConflictDetector {
    /// Keyword → every bang using it, in the order they were added.
    bangs: HashMap<String, Vec<(BangId, BangEntry)>>,
    /// Keywords in first-seen order, so reports are deterministic.
    order: Vec<String>,
}

/// Several bangs sharing one keyword.
#[derive(Clone, Debug, PartialEq)]
pub struct Conflict {
    /// The shared keyword
    pub keyword: String,

    /// All bangs using it (always 2 or more)
    pub conflicting_bangs: Vec<(BangId, BangEntry)>,
}

impl ConflictDetector {
    /// Creates a new empty conflict detector.
    pub fn new() -> Self {
        Self {
            bangs: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Builds a detector over a whole collection.
    pub fn from_collection(collection: &BangCollection) -> Self {
        let mut detector = Self::new();
        for (id, entry) in collection.iter() {
            detector.add_bang(*id, entry.clone());
        }
        detector
    }

    /// Adds a bang to the detector.
    pub fn add_bang(&mut self, id: BangId, entry: BangEntry) {
        let keyword = entry.keyword.trim().to_string();
        if !self.bangs.contains_key(&keyword) {
            self.order.push(keyword.clone());
        }
        self.bangs.entry(keyword).or_default().push((id, entry));
    }

    /// Finds all keywords used by 2 or more bangs, in first-seen order.
    pub fn find_conflicts(&self) -> Vec<Conflict> {
        self.order
            .iter()
            .filter_map(|keyword| {
                let bangs = self.bangs.get(keyword)?;
                (bangs.len() > 1).then(|| Conflict {
                    keyword: keyword.clone(),
                    conflicting_bangs: bangs.clone(),
                })
            })
            .collect()
    }
}

impl Default for ConflictDetector {
    fn default() -> Self {
        Self::new()
    }
}
