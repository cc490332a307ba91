//! Errors raised while reading sources and building the symbol index.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for index construction.
pub type Result<T> = std::result::Result<T, IndexError>;

/// Errors that can occur while loading a symbol index.
///
/// Lookups never fail, so every variant here comes from `load` or from one
/// of the source readers feeding it.
#[derive(Error, Debug)]
pub enum IndexError {
    /// A record violates the structural rules of an index entry.
    #[error("Malformed index record #{record}: {reason}")]
    MalformedIndex {
        /// Zero-based position of the record in the loaded input
        record: usize,
        /// Which rule the record broke
        reason: String,
    },

    /// The search data file is not a valid array literal.
    #[error("Parse error in {path} at line {line}, column {column}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// The file extension does not map to a known source format.
    #[error("Cannot infer source format for {path}")]
    UnsupportedFormat { path: PathBuf },

    /// None of the configured patterns matched a file.
    #[error("No search data files matched {patterns:?}")]
    NoSources { patterns: Vec<String> },

    /// A glob pattern could not be compiled.
    #[error("Invalid source pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// JSON input could not be decoded.
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Reading a source file failed.
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IndexError {
    pub(crate) fn malformed(record: usize, reason: impl Into<String>) -> Self {
        Self::MalformedIndex {
            record,
            reason: reason.into(),
        }
    }

    /// Whether this error came from the structural checks in `load`.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedIndex { .. })
    }
}
