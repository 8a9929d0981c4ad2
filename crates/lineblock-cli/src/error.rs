//! Error types for lineblock-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from lineblock-core
    #[error(transparent)]
    Core(#[from] lineblock_core::Error),
}
