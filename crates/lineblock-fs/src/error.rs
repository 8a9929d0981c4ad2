//! Error types for lineblock-fs

use std::path::PathBuf;

/// Result type for lineblock-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in lineblock-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Path does not exist: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Not a file: {}", path.display())]
    NotAFile { path: PathBuf },

    #[error("Not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Invalid pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    #[error("Lock acquisition failed for {}", path.display())]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
