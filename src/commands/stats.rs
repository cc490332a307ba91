//! Stats command for displaying index statistics

use anyhow::Result;
use std::path::Path;

use crate::cli::SourceArgs;
use crate::symbol::SymbolIndex;
use crate::Config;

/// Run the stats command
pub fn run(root: &Path, config: &Config, source: &SourceArgs) -> Result<()> {
    let index = super::load_index(root, config, source)?;
    print!("{}", format_stats(&index));
    Ok(())
}

fn format_stats(index: &SymbolIndex) -> String {
    let duplicates = index.duplicate_keys();

    let mut out = String::from("Symbol Index Statistics\n=======================\n\n");
    out.push_str(&format!("  Entries:        {}\n", index.len()));
    out.push_str(&format!("  Distinct keys:  {}\n", index.distinct_keys()));
    out.push_str(&format!("  Targets:        {}\n", index.target_count()));
    out.push_str(&format!("  Duplicate keys: {}\n", duplicates.len()));

    if !duplicates.is_empty() {
        out.push('\n');
        for key in duplicates {
            let count = index.find_exact(key).len();
            out.push_str(&format!("    {} ({} entries)\n", key, count));
        }
    }

    out
}
