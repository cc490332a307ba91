//! In-memory symbol index for prefix lookups

use serde::Serialize;
use std::collections::HashSet;
use tracing::info;

use crate::error::{IndexError, Result};
use crate::source::RawRecord;

/// A link from an entry into the generated documentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    /// Relative link, `<page>.html#<anchor>`, exactly as the generator wrote it
    pub url: String,
    /// Owning type, namespace or signature; empty when the generator gave none
    pub scope: String,
    /// Open the link in the parent frame rather than the search frame
    pub open_in_parent: bool,
}

/// One record of the symbol table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    /// Lowercase searchable token
    pub key: String,
    /// Display name
    pub label: String,
    /// Never empty
    pub targets: Vec<Target>,
    /// Position of the record in the loaded input
    #[serde(skip)]
    pub ordinal: usize,
}

impl IndexEntry {
    /// Navigable link for one of this entry's targets.
    ///
    /// Returns `None` when `target` does not belong to the entry.
    pub fn resolve<'a>(&'a self, target: &Target) -> Option<&'a str> {
        self.targets
            .iter()
            .find(|t| *t == target)
            .map(|t| t.url.as_str())
    }
}

/// Immutable prefix index over symbol entries.
///
/// Entries are kept sorted by key, ties in input order, so every lookup is
/// a contiguous slice found by binary search.
#[derive(Debug, Clone, Default)]
pub struct SymbolIndex {
    entries: Vec<IndexEntry>,
}

impl SymbolIndex {
    /// Validate raw records and build the index.
    ///
    /// Fails on the first record that has no key, no label, no targets or a
    /// target without a url. Nothing is kept from a failed load.
    pub fn load(raw: impl IntoIterator<Item = RawRecord>) -> Result<Self> {
        let mut entries = Vec::new();

        for (ordinal, record) in raw.into_iter().enumerate() {
            entries.push(normalize_record(ordinal, record)?);
        }

        // Stable: equal keys stay in input order
        entries.sort_by(|a, b| a.key.cmp(&b.key));

        let index = Self { entries };
        info!(
            "Built symbol index with {} entries, {} distinct keys, {} targets",
            index.len(),
            index.distinct_keys(),
            index.target_count()
        );

        Ok(index)
    }

    /// Entries whose key starts with the lowercased query.
    ///
    /// Ordered by key, then by input position. An empty query matches
    /// nothing.
    pub fn lookup(&self, query: &str) -> Vec<&IndexEntry> {
        if query.is_empty() {
            return Vec::new();
        }

        let prefix = query.to_lowercase();
        self.prefix_range(&prefix)
            .iter()
            .take_while(|e| e.key.starts_with(&prefix))
            .collect()
    }

    /// Entries whose key equals the lowercased query.
    pub fn find_exact(&self, query: &str) -> Vec<&IndexEntry> {
        if query.is_empty() {
            return Vec::new();
        }

        let key = query.to_lowercase();
        self.prefix_range(&key)
            .iter()
            .take_while(|e| e.key == key)
            .collect()
    }

    /// Navigable link for a target of an entry.
    pub fn resolve<'a>(entry: &'a IndexEntry, target: &Target) -> Option<&'a str> {
        entry.resolve(target)
    }

    /// All entries in lookup order
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of targets across all entries
    pub fn target_count(&self) -> usize {
        self.entries.iter().map(|e| e.targets.len()).sum()
    }

    /// Number of unique keys
    pub fn distinct_keys(&self) -> usize {
        // Sorted, so duplicates are adjacent
        self.entries
            .iter()
            .enumerate()
            .filter(|(i, e)| *i == 0 || self.entries[i - 1].key != e.key)
            .count()
    }

    /// Keys that occur in more than one entry, in key order
    pub fn duplicate_keys(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();

        for window in self.entries.windows(2) {
            if window[0].key == window[1].key && seen.insert(window[0].key.as_str()) {
                duplicates.push(window[0].key.as_str());
            }
        }

        duplicates
    }

    /// Entries starting at the first key not less than `prefix`
    fn prefix_range(&self, prefix: &str) -> &[IndexEntry] {
        let start = self
            .entries
            .partition_point(|e| e.key.as_str() < prefix);
        &self.entries[start..]
    }
}

fn normalize_record(ordinal: usize, record: RawRecord) -> Result<IndexEntry> {
    let key = match record.key {
        Some(key) if !key.is_empty() => key.to_lowercase(),
        _ => return Err(IndexError::malformed(ordinal, "missing key")),
    };

    let label = match record.label {
        Some(label) if !label.is_empty() => label,
        _ => {
            return Err(IndexError::malformed(
                ordinal,
                format!("entry '{}' has no label", key),
            ))
        }
    };

    if record.targets.is_empty() {
        return Err(IndexError::malformed(
            ordinal,
            format!("entry '{}' has no targets", key),
        ));
    }

    let mut targets = Vec::with_capacity(record.targets.len());
    for (position, target) in record.targets.into_iter().enumerate() {
        let url = match target.url {
            Some(url) if !url.is_empty() => url,
            _ => {
                return Err(IndexError::malformed(
                    ordinal,
                    format!("target {} of entry '{}' has no url", position, key),
                ))
            }
        };

        targets.push(Target {
            url,
            scope: target.scope.unwrap_or_default(),
            open_in_parent: target.open_in_parent.unwrap_or(true),
        });
    }

    Ok(IndexEntry {
        key,
        label,
        targets,
        ordinal,
    })
}
