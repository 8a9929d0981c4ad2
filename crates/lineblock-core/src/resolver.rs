//! Directory-backed block resolution for the legacy file-per-snippet mode

use std::path::PathBuf;

use tracing::debug;

use lineblock_content::BlockResolver;
use lineblock_fs::read_lines;

/// Resolves insert identities as snippet files under a prefix directory.
///
/// An identity is a relative path: `block insert examples/fact.md` reads
/// `<prefix>/examples/fact.md`. A missing or unreadable snippet resolves to
/// `None`, which the insert engine downgrades to a warning.
#[derive(Debug, Clone)]
pub struct DirResolver {
    prefix: PathBuf,
}

impl DirResolver {
    pub fn new(prefix: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl BlockResolver for DirResolver {
    fn resolve(&self, identity: &str) -> Option<Vec<String>> {
        let path = self.prefix.join(identity);
        match read_lines(&path) {
            Ok(lines) => Some(lines),
            Err(e) => {
                debug!(identity, error = %e, "snippet file not readable");
                None
            }
        }
    }
}
