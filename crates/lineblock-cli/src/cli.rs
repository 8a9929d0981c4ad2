//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Lineblock - Synchronize code snippets between source and documentation
#[derive(Parser, Debug)]
#[command(name = "lineblock")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Extract marked blocks from a source into snippet files
    Extract {
        /// Source file or directory to scan
        #[arg(long)]
        source: PathBuf,

        /// Base directory for snippet files
        #[arg(long, default_value = ".")]
        prefix: PathBuf,
    },

    /// Insert snippet files between insert markers
    Insert {
        /// Source file or directory to rewrite
        #[arg(long)]
        source: PathBuf,

        /// Base directory for snippet files
        #[arg(long, default_value = ".")]
        prefix: PathBuf,

        /// Mirror rewritten files under this directory instead of
        /// modifying sources in place
        #[arg(long)]
        output: Option<PathBuf>,

        /// Delete generated content back to the begin markers
        #[arg(long)]
        clear: bool,
    },

    /// Extract and insert across a file or directory tree
    ///
    /// Runs the extract pass over every matched file first, building one
    /// identity map, then splices every insert region from that map.
    Sync {
        /// Target file or directory
        path: PathBuf,

        /// File-name globs to include (directory target only)
        #[arg(short, long)]
        patterns: Vec<String>,

        /// Patterns to exclude (directory target only)
        #[arg(short = 'x', long)]
        excludes: Vec<String>,

        /// File with additional exclusion patterns (directory target only)
        #[arg(long)]
        exclude_file: Option<PathBuf>,

        /// Subdirectories to restrict the walk to (directory target only)
        #[arg(short, long)]
        dirs: Vec<String>,
    },
}
