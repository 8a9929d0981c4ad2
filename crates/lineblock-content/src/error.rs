//! Error types for lineblock-content

use std::path::PathBuf;

/// Result type for lineblock-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while scanning and splicing marker blocks
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Orphaned block end marker at line {line} in file '{}'. No corresponding begin marker found: {text}", path.display())]
    OrphanedEndMarker {
        path: PathBuf,
        /// 1-based line number of the offending end marker
        line: usize,
        text: String,
    },

    #[error("Nested block begin marker at line {line} in file '{}'. Missing end marker for the previous block: {text}", path.display())]
    NestedBeginMarker {
        path: PathBuf,
        /// 1-based line number of the second begin marker
        line: usize,
        text: String,
    },

    #[error("Unclosed block starting at line {line} in file '{}'. Expected block end marker before end of file", path.display())]
    UnclosedBlock {
        path: PathBuf,
        /// 1-based line number of the begin marker left open
        line: usize,
    },

    #[error("Block has {lines} lines, not enough to trim head {head} and tail {tail}")]
    MalformedBlock {
        lines: usize,
        head: usize,
        tail: usize,
    },
}

impl Error {
    pub(crate) fn orphaned_end(path: &std::path::Path, line: usize, text: &str) -> Self {
        Self::OrphanedEndMarker {
            path: path.to_path_buf(),
            line,
            text: text.trim().to_string(),
        }
    }

    pub(crate) fn nested_begin(path: &std::path::Path, line: usize, text: &str) -> Self {
        Self::NestedBeginMarker {
            path: path.to_path_buf(),
            line,
            text: text.trim().to_string(),
        }
    }
}
