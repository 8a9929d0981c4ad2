//! Error types for lineblock-core

/// Result type for lineblock-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while orchestrating a sync run
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error from the marker engine
    #[error(transparent)]
    Content(#[from] lineblock_content::Error),

    /// Error from the filesystem layer
    #[error(transparent)]
    Fs(#[from] lineblock_fs::Error),

    /// Directory-only options supplied against a single-file target, or
    /// similar option conflicts
    #[error("Incompatible options: {message}")]
    IncompatibleOptions { message: String },
}

impl Error {
    pub fn incompatible_options(message: impl Into<String>) -> Self {
        Self::IncompatibleOptions {
            message: message.into(),
        }
    }
}
