//! Sync orchestration for lineblock
//!
//! Drives extract-then-insert over one file or a file tree. Extraction
//! fully completes across the tree before any insertion begins, because an
//! identity defined in one file may be consumed by an insert marker in
//! another.

pub mod error;
pub mod resolver;
pub mod snippets;
pub mod sync;

pub use error::{Error, Result};
pub use resolver::DirResolver;
pub use snippets::{extract_to_dir, insert_from_dir};
pub use sync::{SyncOptions, SyncReport, sync_path};
