//! Extract-then-insert synchronization over a file or a file tree

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use lineblock_content::{BlockMap, InsertMode, scan_blocks, splice_blocks};
use lineblock_fs::{self as lfs, WalkOptions, collect_files, load_exclude_patterns, read_lines, write_lines};

use crate::error::{Error, Result};

/// Options for a sync run. All of them are directory-only.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// File-name globs a candidate must match; `None` matches everything.
    pub patterns: Option<Vec<String>>,
    /// Gitignore-style exclusion patterns.
    pub excludes: Vec<String>,
    /// File with additional exclusion patterns, one per line.
    pub exclude_file: Option<PathBuf>,
    /// Restrict the walk to these subdirectories of the root.
    pub subdirs: Option<Vec<String>>,
}

impl SyncOptions {
    /// Names of the options that were supplied, for error reporting.
    fn supplied(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.patterns.is_some() {
            names.push("patterns");
        }
        if !self.excludes.is_empty() {
            names.push("excludes");
        }
        if self.exclude_file.is_some() {
            names.push("exclude-file");
        }
        if self.subdirs.is_some() {
            names.push("dirs");
        }
        names
    }
}

/// Report from a sync run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncReport {
    /// Files scanned during the run
    pub files_scanned: usize,
    /// Blocks collected by the extract pass
    pub blocks_extracted: usize,
    /// Files whose content changed and were rewritten
    pub files_updated: Vec<PathBuf>,
}

/// Synchronize a single file or a directory tree.
///
/// For a tree, extraction runs over every matched file into one global
/// identity map before any insertion begins. Files are rewritten only when
/// the spliced line sequence differs from the original.
pub fn sync_path(path: &Path, options: &SyncOptions) -> Result<SyncReport> {
    if !path.exists() {
        return Err(lfs::Error::NotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    if path.is_file() {
        let supplied = options.supplied();
        if !supplied.is_empty() {
            return Err(Error::incompatible_options(format!(
                "options {} not allowed when target is a file",
                supplied.join(", ")
            )));
        }
        return sync_files(&[path.to_path_buf()]);
    }

    let mut excludes = options.excludes.clone();
    if let Some(exclude_file) = &options.exclude_file {
        excludes.extend(load_exclude_patterns(exclude_file)?);
    }
    let walk = WalkOptions {
        patterns: options.patterns.clone(),
        excludes,
        subdirs: options.subdirs.clone(),
    };
    let files = collect_files(path, &walk)?;
    sync_files(&files)
}

fn sync_files(files: &[PathBuf]) -> Result<SyncReport> {
    let mut report = SyncReport {
        files_scanned: files.len(),
        ..Default::default()
    };

    // Extract pass: the whole tree feeds one identity map.
    let mut map = BlockMap::new();
    for file in files {
        let lines = read_lines(file)?;
        let blocks = scan_blocks(file, &lines)?;
        debug!(file = %file.display(), blocks = blocks.len(), "extract pass");
        map.extend(blocks);
    }
    report.blocks_extracted = map.len();

    // Insert pass, only after extraction has fully completed.
    for file in files {
        let lines = read_lines(file)?;
        let outcome = splice_blocks(file, &lines, &map, InsertMode::Apply)?;
        if outcome.changed {
            write_lines(file, &outcome.lines)?;
            info!(file = %file.display(), "updated file");
            report.files_updated.push(file.clone());
        }
    }

    Ok(report)
}
