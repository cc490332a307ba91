use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::source::SourceFormat;

#[derive(Parser)]
#[command(name = "docsearch")]
#[command(author, version, about = "Prefix search over generated documentation symbol tables")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Project root holding .docsearch/config.toml (default: current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where to read the search data from
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Search data file or glob pattern; repeatable, overrides the config
    #[arg(short, long = "source")]
    pub sources: Vec<String>,

    /// Source format: auto, doxygen or json
    #[arg(short, long)]
    pub format: Option<SourceFormat>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up symbols whose key starts with the query
    Search {
        /// Prefix to search for
        query: String,

        /// Maximum number of entries to show (0 = unlimited)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print the response as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Show index statistics
    Stats {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Write the loaded index in normalized JSON form
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        source: SourceArgs,
    },
}
