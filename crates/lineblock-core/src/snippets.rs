//! Legacy file-per-snippet operations
//!
//! `extract` writes each block to `<prefix>/<identity>`; `insert` resolves
//! identities as snippet files under `<prefix>` and splices them into the
//! target, in place or mirrored under a separate output root.

use std::path::{Path, PathBuf};

use tracing::info;

use lineblock_content::{InsertMode, scan_blocks, splice_blocks};
use lineblock_fs::{self as lfs, WalkOptions, collect_files, read_lines, write_lines};

use crate::error::Result;
use crate::resolver::DirResolver;

/// Extract marked blocks from `source` into snippet files under `prefix`.
///
/// The source may be a file or a directory tree. Snippet parent
/// directories are not created; a missing one is an error. Returns the
/// number of snippet files written. The source is never mutated.
pub fn extract_to_dir(source: &Path, prefix: &Path) -> Result<usize> {
    validate_dir(prefix)?;

    let mut written = 0;
    for file in source_files(source)? {
        let lines = read_lines(&file)?;
        for block in scan_blocks(&file, &lines)? {
            let out = prefix.join(&block.identity);
            if let Some(parent) = out.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(lfs::Error::NotFound {
                        path: parent.to_path_buf(),
                    }
                    .into());
                }
            }
            write_lines(&out, &block.content)?;
            info!(identity = %block.identity, file = %out.display(), "extracted block");
            written += 1;
        }
    }
    Ok(written)
}

/// Splice snippet files under `prefix` into the insert regions of `source`.
///
/// With an output root, rewritten files are mirrored there instead of
/// modified in place: a single file lands at `<output>/<name>`, a tree
/// member at `<output>/<relative path>`. Unchanged files are not written at
/// all. `clear` deletes generated content back to the begin markers.
/// Returns the paths written.
pub fn insert_from_dir(
    source: &Path,
    prefix: &Path,
    output_root: Option<&Path>,
    clear: bool,
) -> Result<Vec<PathBuf>> {
    validate_dir(prefix)?;
    if let Some(output) = output_root {
        validate_dir(output)?;
    }

    let resolver = DirResolver::new(prefix);
    let mode = if clear {
        InsertMode::Clear
    } else {
        InsertMode::Apply
    };

    let single_file = source.is_file();
    let mut written = Vec::new();
    for file in source_files(source)? {
        let lines = read_lines(&file)?;
        let outcome = splice_blocks(&file, &lines, &resolver, mode)?;
        if !outcome.changed {
            continue;
        }
        let target = match output_root {
            None => file.clone(),
            Some(output) if single_file => output.join(file.file_name().unwrap_or_default()),
            Some(output) => {
                let rel = file.strip_prefix(source).unwrap_or(&file);
                output.join(rel)
            }
        };
        write_lines(&target, &outcome.lines)?;
        info!(file = %target.display(), "wrote spliced file");
        written.push(target);
    }
    Ok(written)
}

fn source_files(source: &Path) -> Result<Vec<PathBuf>> {
    if !source.exists() {
        return Err(lfs::Error::NotFound {
            path: source.to_path_buf(),
        }
        .into());
    }
    if source.is_file() {
        Ok(vec![source.to_path_buf()])
    } else {
        Ok(collect_files(source, &WalkOptions::default())?)
    }
}

fn validate_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(lfs::Error::NotFound {
            path: path.to_path_buf(),
        }
        .into());
    }
    if !path.is_dir() {
        return Err(lfs::Error::NotADirectory {
            path: path.to_path_buf(),
        }
        .into());
    }
    Ok(())
}
