pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod source;
pub mod symbol;

pub use config::Config;
pub use error::IndexError;
pub use source::{load_path, load_sources, RawRecord, RawTarget, SourceFormat};
pub use symbol::{IndexEntry, SymbolIndex, Target};
