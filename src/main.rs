use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use docsearch::cli::{Cli, Commands};
use docsearch::config::Config;
use docsearch::logging::init_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let project_root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };

    let config = Config::load(&project_root)?;

    // The guard MUST be held until program exit to ensure logs are flushed
    let _logging_guard = init_logging(&config.logging, &project_root)?;

    tracing::debug!("Project root: {}", project_root.display());

    match cli.command {
        Commands::Search {
            query,
            limit,
            json,
            source,
        } => {
            docsearch::commands::search::run(&project_root, &config, &query, limit, json, &source)?;
        }
        Commands::Stats { source } => {
            docsearch::commands::stats::run(&project_root, &config, &source)?;
        }
        Commands::Export { output, source } => {
            docsearch::commands::export::run(&project_root, &config, output, &source)?;
        }
    }

    Ok(())
}
