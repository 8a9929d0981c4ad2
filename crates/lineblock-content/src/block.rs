//! Block model and the identity-keyed block map

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::warn;

/// A finalized excerpt produced by extraction.
///
/// Content has the extract marker's indentation applied and head/tail lines
/// trimmed; every line is `\n`-terminated. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Key matching this block to insert regions.
    pub identity: String,
    /// File the block was extracted from.
    pub source: PathBuf,
    /// 1-based line number of the begin marker.
    pub start_line: usize,
    /// 1-based line number of the end marker.
    pub end_line: usize,
    /// Indentation applied to the content (marker column plus delta).
    pub indent: i64,
    /// The reindented, trimmed lines.
    pub content: Vec<String>,
}

/// Source of block content for insert regions.
///
/// The sync orchestrator resolves identities from the in-memory map built by
/// extraction; the legacy file-per-snippet mode resolves them from disk.
pub trait BlockResolver {
    /// Lines for `identity`, or `None` when it is not (yet) available.
    fn resolve(&self, identity: &str) -> Option<Vec<String>>;
}

/// Identity-keyed collection of extracted blocks for one sync run.
///
/// Iteration order is deterministic. The first extraction of an identity
/// wins; later duplicates are dropped with a warning.
#[derive(Debug, Default, Clone)]
pub struct BlockMap {
    inner: BTreeMap<String, Block>,
}

impl BlockMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a block unless its identity is already present.
    pub fn insert(&mut self, block: Block) {
        if let Some(existing) = self.inner.get(&block.identity) {
            warn!(
                identity = %block.identity,
                first = %existing.source.display(),
                duplicate = %block.source.display(),
                "duplicate block identity, keeping first extraction"
            );
            return;
        }
        self.inner.insert(block.identity.clone(), block);
    }

    /// Add every block from an extraction pass.
    pub fn extend(&mut self, blocks: Vec<Block>) {
        for block in blocks {
            self.insert(block);
        }
    }

    pub fn get(&self, identity: &str) -> Option<&Block> {
        self.inner.get(identity)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Identities in lexical order.
    pub fn identities(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.inner.values()
    }
}

impl BlockResolver for BlockMap {
    fn resolve(&self, identity: &str) -> Option<Vec<String>> {
        self.get(identity).map(|block| block.content.clone())
    }
}
