use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::cli::SourceArgs;
use crate::symbol::{SearchRequest, SearchResponse, SymbolSearcher};
use crate::Config;

/// Run the search command
///
/// # Arguments
///
/// * `query` - Prefix typed by the user
/// * `limit` - Maximum number of entries, falls back to `search.default_limit`
/// * `json` - Print the raw response instead of a listing
pub fn run(
    root: &Path,
    config: &Config,
    query: &str,
    limit: Option<usize>,
    json: bool,
    source: &SourceArgs,
) -> Result<()> {
    let index = super::load_index(root, config, source)?;
    let searcher = SymbolSearcher::new(Arc::new(index), config.search.default_limit);

    let mut request = SearchRequest::new(query);
    request.limit = limit;
    let response = searcher.search(&request);

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    print!("{}", format_response(&response));
    Ok(())
}

/// Render a response the way a search-box result list reads.
fn format_response(response: &SearchResponse) -> String {
    if response.results.is_empty() {
        return format!("No symbols found for: {}\n", response.query);
    }

    let mut out = format!(
        "Found {} symbols for: \"{}\"\n\n",
        response.total_matches, response.query
    );

    for hit in &response.results {
        let label = decode_entities(&hit.label);
        match hit.targets.as_slice() {
            [single] => {
                out.push_str(&format!("{}  {}  {}\n", label, decode_entities(&single.scope), single.url));
            }
            targets => {
                out.push_str(&format!("{}\n", label));
                for target in targets {
                    out.push_str(&format!("    {}  {}\n", decode_entities(&target.scope), target.url));
                }
            }
        }
    }

    if response.results.len() < response.total_matches {
        out.push_str(&format!(
            "\n... and {} more\n",
            response.total_matches - response.results.len()
        ));
    }

    out
}

/// Undo the HTML escaping the generator applies to labels and scopes.
fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
