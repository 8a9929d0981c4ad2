//! Marker scanning and splicing engine for lineblock
//!
//! Recognizes paired begin/end markers across multiple comment dialects,
//! extracts the delimited blocks into an identity-keyed map, and splices
//! block content back into insert regions with indentation, hop/skip
//! preservation, and an idempotence check that keeps reruns byte-exact.

pub mod block;
pub mod error;
pub mod extract;
pub mod grammar;
pub mod insert;
pub mod transform;

pub use block::{Block, BlockMap, BlockResolver};
pub use error::{Error, Result};
pub use extract::scan_blocks;
pub use grammar::{BeginInfo, Marker, MarkerDialect, MarkerKind, classify, dialects};
pub use insert::{InsertMode, SpliceOutcome, splice_blocks};
