//! Deterministic tree traversal with include/exclude filtering
//!
//! Candidate files are yielded in lexical path order so that error messages
//! and output are reproducible across runs. Exclude patterns follow the
//! gitignore style: bare component names, globs against the relative path or
//! file name, and trailing-slash directory patterns.

use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::debug;
use walkdir::WalkDir;

use crate::{Error, Result};

/// Filtering options for a tree walk.
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    /// File-name globs a candidate must match; `None` matches everything.
    pub patterns: Option<Vec<String>>,
    /// Gitignore-style exclusion patterns.
    pub excludes: Vec<String>,
    /// Restrict the walk to these subdirectories of the root.
    pub subdirs: Option<Vec<String>>,
}

struct ExcludeFilter {
    /// Patterns with any trailing '/' stripped, for component matching.
    names: Vec<String>,
    globs: GlobSet,
}

impl ExcludeFilter {
    fn build(patterns: &[String]) -> Result<Self> {
        let mut names = Vec::with_capacity(patterns.len());
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let trimmed = pattern.trim().trim_end_matches('/');
            if trimmed.is_empty() {
                continue;
            }
            names.push(trimmed.to_string());
            builder.add(Glob::new(trimmed).map_err(|e| Error::Pattern {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?);
        }
        Ok(Self {
            names,
            globs: builder.build().map_err(|e| Error::Pattern {
                pattern: String::new(),
                message: e.to_string(),
            })?,
        })
    }

    /// Match against the root-relative path, its file name, and each path
    /// component.
    fn matches(&self, root: &Path, path: &Path) -> bool {
        let rel = path.strip_prefix(root).unwrap_or(path);
        let rel_str = rel.to_string_lossy().replace('\\', "/");
        if self.globs.is_match(rel_str.as_str()) {
            return true;
        }
        if let Some(name) = path.file_name() {
            if self.globs.is_match(Path::new(name)) {
                return true;
            }
        }
        rel_str
            .split('/')
            .any(|part| self.names.iter().any(|n| n == part))
    }
}

fn build_include_set(patterns: &Option<Vec<String>>) -> Result<Option<GlobSet>> {
    let Some(patterns) = patterns else {
        return Ok(None);
    };
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern).map_err(|e| Error::Pattern {
            pattern: pattern.clone(),
            message: e.to_string(),
        })?);
    }
    Ok(Some(builder.build().map_err(|e| Error::Pattern {
        pattern: String::new(),
        message: e.to_string(),
    })?))
}

fn target_dirs(root: &Path, subdirs: &Option<Vec<String>>) -> Result<Vec<PathBuf>> {
    let Some(subdirs) = subdirs else {
        return Ok(vec![root.to_path_buf()]);
    };
    let mut targets = Vec::with_capacity(subdirs.len());
    for subdir in subdirs {
        let target = root.join(subdir);
        if !target.exists() {
            return Err(Error::NotFound { path: target });
        }
        if !target.is_dir() {
            return Err(Error::NotADirectory { path: target });
        }
        targets.push(target);
    }
    if targets.is_empty() {
        targets.push(root.to_path_buf());
    }
    Ok(targets)
}

/// Collect candidate files under `root`, filtered and lexically sorted.
pub fn collect_files(root: &Path, options: &WalkOptions) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(Error::NotFound {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(Error::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let exclude = ExcludeFilter::build(&options.excludes)?;
    let include = build_include_set(&options.patterns)?;

    let mut files = Vec::new();
    for start in target_dirs(root, &options.subdirs)? {
        let walker = WalkDir::new(&start)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                // Prune excluded directories during descent.
                entry.depth() == 0 || !exclude.matches(root, entry.path())
            });
        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(&start).to_path_buf();
                match e.into_io_error() {
                    Some(io) => Error::io(path, io),
                    None => Error::NotFound { path },
                }
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.into_path();
            if let Some(include) = &include {
                let matched = path
                    .file_name()
                    .map(|name| include.is_match(Path::new(name)))
                    .unwrap_or(false);
                if !matched {
                    continue;
                }
            }
            files.push(path);
        }
    }

    files.sort();
    files.dedup();
    debug!(count = files.len(), root = %root.display(), "collected candidate files");
    Ok(files)
}

/// Load exclusion patterns from a file, one per line.
///
/// Blank lines and `#` comments are skipped.
pub fn load_exclude_patterns(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}
