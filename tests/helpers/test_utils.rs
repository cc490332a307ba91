use std::path::PathBuf;

use docsearch::{load_path, SourceFormat, SymbolIndex};

/// Path to a file under tests/fixtures
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Index built from the generated `search/all_e.js` table
pub fn load_fixture_index() -> SymbolIndex {
    load_path(&fixture_path("search/all_e.js"), SourceFormat::Auto)
        .expect("fixture should load")
}

/// Keys of a lookup result, in order
pub fn keys(entries: &[&docsearch::IndexEntry]) -> Vec<String> {
    entries.iter().map(|e| e.key.clone()).collect()
}
