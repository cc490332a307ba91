//! Subcommand implementations.

pub mod export;
pub mod search;
pub mod stats;

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use crate::cli::SourceArgs;
use crate::config::{resolve_patterns, Config};
use crate::source;
use crate::symbol::SymbolIndex;

/// Load the index named on the command line, or the configured one.
pub fn load_index(root: &Path, config: &Config, args: &SourceArgs) -> Result<SymbolIndex> {
    let patterns = if args.sources.is_empty() {
        config.source_patterns(root)
    } else {
        resolve_patterns(&args.sources, root)
    };
    let format = args.format.unwrap_or(config.index.format);

    debug!("Loading search data from {:?} ({})", patterns, format);

    source::load_sources(&patterns, format)
        .with_context(|| "Failed to load the symbol index; search is unavailable")
}
