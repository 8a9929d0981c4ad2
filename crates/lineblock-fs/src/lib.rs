//! Filesystem collaborators for lineblock
//!
//! Line-preserving reads, atomic whole-file writes, and deterministic tree
//! traversal with include/exclude filtering. The engine crates consume these
//! through plain path-in, lines-out interfaces.

pub mod error;
pub mod io;
pub mod walk;

pub use error::{Error, Result};
pub use io::{read_lines, write_atomic, write_lines};
pub use walk::{WalkOptions, collect_files, load_exclude_patterns};
