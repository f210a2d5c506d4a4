//! In-memory bang collection
//!
//! The collection is what the options page edits. It maps a `BangId` to a
//! `BangEntry` and keeps insertion order, which is the display order when
//! alphabetical sorting is off. New bangs are placed at the front so they
//! show up at the top of the list regardless of sort mode.
//!
//! Views (`filter`, `sort`, `view`) borrow the collection and never mutate it.

use feruca::Collator;
use hashlink::LinkedHashMap;
use std::cmp::Ordering;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

use crate::core::types::{BangEntry, BangId, StoredBang, UrlId, PLACEHOLDER_URL};

/// Errors from per-row edit operations
#[derive(Debug, Error, PartialEq)]
pub enum CollectionError {
    /// No bang with this id
    #[error("No bang with id {0}")]
    UnknownBang(BangId),

    /// The bang exists but has no URL slot with this id
    #[error("Bang {bang} has no URL with id {url}")]
    UnknownUrl {
        /// Bang that was addressed
        bang: BangId,
        /// Missing URL slot
        url: UrlId,
    },

    /// Every bang keeps at least one URL
    #[error("Cannot remove the only URL of bang {0}")]
    LastUrl(BangId),

    /// The options page never deletes the only remaining bang
    #[error("Cannot remove {0}, it is the only bang left")]
    LastBang(BangId),
}

/// Ordered mapping from bang id to bang definition
#[derive(Clone, Debug, Default)]
pub struct BangCollection {
    entries: LinkedHashMap<BangId, BangEntry>,
}

impl BangCollection {
    /// Creates an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from stored bangs, minting fresh ids
    pub fn from_stored(bangs: &[StoredBang]) -> Self {
        let mut collection = Self::new();
        for bang in bangs {
            collection.insert(BangId::new(), bang.to_entry());
        }
        collection
    }

    /// Converts to the stored shape in natural order
    pub fn to_stored(&self) -> Vec<StoredBang> {
        self.entries.values().map(BangEntry::to_stored).collect()
    }

    /// Inserts at the back of the iteration order
    ///
    /// An existing entry under the same id has its content replaced but
    /// keeps its position.
    pub fn insert(&mut self, id: BangId, entry: BangEntry) {
        if let Some(existing) = self.entries.get_mut(&id) {
            *existing = entry;
        } else {
            self.entries.insert(id, entry);
        }
    }

    /// Adds a placeholder bang at the front and returns its id
    ///
    /// # Example
    /// ```
    /// use custom_bangs::core::BangCollection;
    ///
    /// let mut bangs = BangCollection::new();
    /// let id = bangs.add();
    /// assert_eq!(bangs.ids().first(), Some(&id));
    /// ```
    pub fn add(&mut self) -> BangId {
        let id = BangId::new();
        let old = std::mem::take(&mut self.entries);

        self.entries.insert(id, BangEntry::placeholder());
        for (existing_id, entry) in old {
            self.entries.insert(existing_id, entry);
        }

        debug!("Added bang {}", id);
        id
    }

    /// Removes a bang; missing ids are ignored
    pub fn remove(&mut self, id: &BangId) {
        if self.entries.remove(id).is_some() {
            debug!("Removed bang {}", id);
        }
    }

    /// Replaces every entry with the supplied defaults
    pub fn reset_to_default(&mut self, defaults: &BangCollection) {
        self.entries = defaults.entries.clone();
        debug!("Reset collection to {} default bangs", self.entries.len());
    }

    /// Looks up a bang
    pub fn get(&self, id: &BangId) -> Option<&BangEntry> {
        self.entries.get(id)
    }

    /// True when the id is present
    pub fn contains(&self, id: &BangId) -> bool {
        self.entries.contains_key(id)
    }

    /// Changes a bang's keyword
    pub fn set_keyword(&mut self, id: &BangId, keyword: &str) -> Result<(), CollectionError> {
        let entry = self
            .entries
            .get_mut(id)
            .ok_or(CollectionError::UnknownBang(*id))?;
        entry.keyword = keyword.to_string();
        Ok(())
    }

    /// Changes one URL template of a bang
    pub fn set_url(&mut self, id: &BangId, url_id: &UrlId, url: &str) -> Result<(), CollectionError> {
        let entry = self
            .entries
            .get_mut(id)
            .ok_or(CollectionError::UnknownBang(*id))?;
        let slot = entry.urls.get_mut(url_id).ok_or(CollectionError::UnknownUrl {
            bang: *id,
            url: *url_id,
        })?;
        *slot = url.to_string();
        Ok(())
    }

    /// Appends a placeholder URL slot to a bang and returns the slot id
    pub fn add_url(&mut self, id: &BangId) -> Result<UrlId, CollectionError> {
        let entry = self
            .entries
            .get_mut(id)
            .ok_or(CollectionError::UnknownBang(*id))?;
        let url_id = UrlId::new();
        entry.urls.insert(url_id, PLACEHOLDER_URL.to_string());
        Ok(url_id)
    }

    /// Removes a URL slot; the last remaining slot cannot be removed
    pub fn remove_url(&mut self, id: &BangId, url_id: &UrlId) -> Result<(), CollectionError> {
        let entry = self
            .entries
            .get_mut(id)
            .ok_or(CollectionError::UnknownBang(*id))?;

        if !entry.urls.contains_key(url_id) {
            return Err(CollectionError::UnknownUrl {
                bang: *id,
                url: *url_id,
            });
        }
        if entry.urls.len() == 1 {
            return Err(CollectionError::LastUrl(*id));
        }

        entry.urls.remove(url_id);
        Ok(())
    }

    /// Number of bangs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no bangs
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when exactly one bang is left
    ///
    /// The options page disables the delete button in that case.
    pub fn is_lonely(&self) -> bool {
        self.entries.len() == 1
    }

    /// Ids in natural order
    pub fn ids(&self) -> Vec<BangId> {
        self.entries.keys().copied().collect()
    }

    /// Entries in natural order
    pub fn iter(&self) -> impl Iterator<Item = (&BangId, &BangEntry)> {
        self.entries.iter()
    }

    /// Entries matching `search_term`, in natural order
    ///
    /// A bang matches when its keyword or any of its URLs contains the term,
    /// ignoring case. An empty term matches everything.
    pub fn filter(&self, search_term: &str) -> Vec<(&BangId, &BangEntry)> {
        self.entries
            .iter()
            .filter(|(_, entry)| matches_search(entry, search_term))
            .collect()
    }

    /// Entries ordered for display
    ///
    /// With `by_alpha` the entries are ordered by keyword (stable, so equal
    /// keywords keep their natural order); otherwise natural order is kept.
    pub fn sort(&self, by_alpha: bool) -> Vec<(&BangId, &BangEntry)> {
        let mut rows: Vec<_> = self.entries.iter().collect();
        if by_alpha {
            let mut collator = Collator::default();
            rows.sort_by(|(_, a), (_, b)| collator.collate(a.keyword.as_str(), b.keyword.as_str()));
        }
        rows
    }

    /// Rows the options page shows: sorted, then filtered
    pub fn view(&self, search_term: &str, by_alpha: bool) -> Vec<(&BangId, &BangEntry)> {
        self.sort(by_alpha)
            .into_iter()
            .filter(|(_, entry)| matches_search(entry, search_term))
            .collect()
    }

    /// Compares keyword/URL content, ignoring ids and order
    pub fn content_eq(&self, other: &BangCollection) -> bool {
        if self.len() != other.len() {
            return false;
        }

        let mut counts: HashMap<StoredBang, isize> = HashMap::new();
        for bang in self.to_stored() {
            *counts.entry(bang).or_default() += 1;
        }
        for bang in other.to_stored() {
            *counts.entry(bang).or_default() -= 1;
        }

        counts.values().all(|count| *count == 0)
    }
}

impl FromIterator<(BangId, BangEntry)> for BangCollection {
    fn from_iter<T: IntoIterator<Item = (BangId, BangEntry)>>(iter: T) -> Self {
        let mut collection = Self::new();
        for (id, entry) in iter {
            collection.insert(id, entry);
        }
        collection
    }
}

/// Case-insensitive substring match on keyword and URLs
pub fn matches_search(entry: &BangEntry, search_term: &str) -> bool {
    text_matches(
        &entry.keyword,
        entry.urls.values().map(String::as_str),
        search_term,
    )
}

/// Same match as [`matches_search`] on a bare keyword and URL list
pub fn text_matches<'a, I>(keyword: &str, urls: I, search_term: &str) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    if search_term.is_empty() {
        return true;
    }

    let needle = search_term.to_lowercase();
    keyword.to_lowercase().contains(&needle)
        || urls
            .into_iter()
            .any(|url| url.to_lowercase().contains(&needle))
}

/// Locale-aware keyword comparison
///
/// Uses the Unicode Collation Algorithm with the CLDR root collation, so
/// accented letters sort next to their base letter ("éclair" before "fr")
/// and strings that differ only in case put the lowercase form first.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    Collator::default().collate(a, b)
}
