//! Readers that turn generated search data files into raw index records.
//!
//! Documentation generators split their search table across many files
//! (`all_0.js` … `all_f.js`, `classes_*.js`, …). Each reader produces
//! [`RawRecord`]s that keep absent fields as `None`; deciding what is
//! malformed is left to [`SymbolIndex::load`].

pub mod doxygen;
pub mod json;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{IndexError, Result};
use crate::symbol::SymbolIndex;

/// One record of the raw table, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub key: Option<String>,
    pub label: Option<String>,
    pub targets: Vec<RawTarget>,
}

/// One link of a raw record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTarget {
    pub url: Option<String>,
    pub scope: Option<String>,
    /// Generator flag asking the viewer to open the link in the parent frame
    pub open_in_parent: Option<bool>,
}

impl RawRecord {
    /// Build a record from a key and `(label, url)` pairs.
    ///
    /// The first pair's label becomes the entry label and every pair's label
    /// becomes the scope of its own target.
    pub fn from_pairs<K, L, U>(key: K, pairs: impl IntoIterator<Item = (L, U)>) -> Self
    where
        K: Into<String>,
        L: Into<String>,
        U: Into<String>,
    {
        let mut label = None;
        let targets = pairs
            .into_iter()
            .map(|(pair_label, url)| {
                let pair_label = pair_label.into();
                if label.is_none() {
                    label = Some(pair_label.clone());
                }
                RawTarget {
                    url: Some(url.into()),
                    scope: Some(pair_label),
                    open_in_parent: None,
                }
            })
            .collect();

        Self {
            key: Some(key.into()),
            label,
            targets,
        }
    }
}

/// Encoding of a search data file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Pick by file extension
    #[default]
    Auto,
    /// JavaScript array literal as written by Doxygen
    Doxygen,
    /// JSON pair form or the normalized export form
    Json,
}

impl SourceFormat {
    /// Resolve `Auto` against a path's extension.
    pub fn for_path(self, path: &Path) -> Result<Self> {
        match self {
            SourceFormat::Auto => match path.extension().and_then(|e| e.to_str()) {
                Some(ext) if ext.eq_ignore_ascii_case("js") => Ok(SourceFormat::Doxygen),
                Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(SourceFormat::Json),
                _ => Err(IndexError::UnsupportedFormat {
                    path: path.to_path_buf(),
                }),
            },
            other => Ok(other),
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceFormat::Auto => write!(f, "auto"),
            SourceFormat::Doxygen => write!(f, "doxygen"),
            SourceFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for SourceFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(SourceFormat::Auto),
            "doxygen" | "js" => Ok(SourceFormat::Doxygen),
            "json" => Ok(SourceFormat::Json),
            other => Err(format!(
                "unknown source format '{}' (expected auto, doxygen or json)",
                other
            )),
        }
    }
}

/// Read raw records from a single file.
pub fn read_path(path: &Path, format: SourceFormat) -> Result<Vec<RawRecord>> {
    let format = format.for_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| IndexError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = match format {
        SourceFormat::Json => json::parse(&content, path)?,
        _ => doxygen::parse(&content, path)?,
    };

    debug!(
        "Read {} records from {} ({})",
        records.len(),
        path.display(),
        format
    );
    Ok(records)
}

/// Load an index from a single file.
pub fn load_path(path: &Path, format: SourceFormat) -> Result<SymbolIndex> {
    SymbolIndex::load(read_path(path, format)?)
}

/// Expand glob patterns into the files they match.
///
/// Matches are sorted per pattern and patterns keep their given order, so
/// record ordinals are stable across runs.
pub fn expand_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let paths = glob::glob(pattern).map_err(|source| IndexError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;

        let mut matched: Vec<PathBuf> = paths
            .filter_map(|entry| entry.ok())
            .filter(|p| p.is_file())
            .collect();
        matched.sort();

        debug!("Pattern '{}' matched {} files", pattern, matched.len());
        files.extend(matched);
    }

    Ok(files)
}

/// Load one index from every file matched by `patterns`.
pub fn load_sources(patterns: &[String], format: SourceFormat) -> Result<SymbolIndex> {
    let files = expand_patterns(patterns)?;
    if files.is_empty() {
        return Err(IndexError::NoSources {
            patterns: patterns.to_vec(),
        });
    }

    let mut records = Vec::new();
    for file in &files {
        records.extend(read_path(file, format)?);
    }

    SymbolIndex::load(records)
}
