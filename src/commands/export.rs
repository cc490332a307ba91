use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::cli::SourceArgs;
use crate::symbol::SymbolIndex;
use crate::Config;

/// Run the export command
///
/// Writes the normalized JSON form, which the JSON source reader accepts
/// back unchanged.
pub fn run(root: &Path, config: &Config, output: Option<PathBuf>, source: &SourceArgs) -> Result<()> {
    let index = super::load_index(root, config, source)?;
    let json = to_json(&index)?;

    match output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write export to {}", path.display()))?;
            info!("Exported {} entries to {}", index.len(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

pub fn to_json(index: &SymbolIndex) -> Result<String> {
    serde_json::to_string_pretty(index.entries()).context("Failed to serialize index")
}
