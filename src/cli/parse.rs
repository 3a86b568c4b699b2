//! CLI parse: clap types for dirtree. No behavior; definitions only.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Dirtree CLI - hierarchical directory tree service
#[derive(Parser, Debug)]
#[command(name = "dirtree")]
#[command(about = "Create, move, delete and list directories in a persistent tree")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create a directory and any missing parents
    Create {
        /// Slash-separated path, e.g. fruits/apples/fuji
        path: String,
    },
    /// Move a directory (and its subtree) under another directory
    Move {
        source: String,
        /// Destination directory; omit to move to the top level
        target: Option<String>,
    },
    /// Delete a directory and everything under it
    Delete { path: String },
    /// Print the tree
    List {
        #[arg(long, value_enum, default_value_t = ListFormat::Text)]
        format: ListFormat,
    },
    /// Run a CREATE/MOVE/DELETE/LIST script from a file or stdin
    Run {
        /// Script file; reads stdin when omitted
        file: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFormat {
    Text,
    Json,
}
