//! Lineblock CLI
//!
//! Synchronizes source-of-truth snippets into documentation and source
//! files via paired extract/insert markers.

mod cli;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;
use lineblock_core::{SyncOptions, extract_to_dir, insert_from_dir, sync_path};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Extract { source, prefix } => {
            let written = extract_to_dir(&source, &prefix)?;
            println!("Extracted {written} block(s)");
            Ok(())
        }
        Commands::Insert {
            source,
            prefix,
            output,
            clear,
        } => {
            let written = insert_from_dir(&source, &prefix, output.as_deref(), clear)?;
            for path in &written {
                let action = if output.is_some() { "Created" } else { "Updated" };
                println!("{action} file: {}", path.display());
            }
            Ok(())
        }
        Commands::Sync {
            path,
            patterns,
            excludes,
            exclude_file,
            dirs,
        } => {
            let options = SyncOptions {
                patterns: non_empty(patterns),
                excludes,
                exclude_file,
                subdirs: non_empty(dirs),
            };
            let report = sync_path(&path, &options)?;
            for path in &report.files_updated {
                println!("Updated file: {}", path.display());
            }
            println!(
                "Synced {} file(s), {} block(s) extracted, {} updated",
                report.files_scanned,
                report.blocks_extracted,
                report.files_updated.len()
            );
            Ok(())
        }
    }
}

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    if values.is_empty() { None } else { Some(values) }
}
