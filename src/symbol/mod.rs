//! Symbol indexing and search module
//!
//! This module holds the immutable symbol table built from a documentation
//! generator's search data, plus the request/response layer a search box
//! uses to query it on every keystroke.

pub mod index;
pub mod search;

pub use index::{IndexEntry, SymbolIndex, Target};
pub use search::{ResolvedTarget, SearchHit, SearchRequest, SearchResponse, SymbolSearcher};
