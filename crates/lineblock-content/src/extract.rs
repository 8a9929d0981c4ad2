//! Extract engine: single-pass scanner pairing begin/end extract markers

use std::path::Path;

use crate::block::Block;
use crate::error::{Error, Result};
use crate::grammar::{BeginInfo, MarkerDialect, MarkerKind, begin_marker, end_marker};
use crate::transform::{reindent, trim};

struct OpenBlock {
    dialect: &'static MarkerDialect,
    info: BeginInfo,
    /// 1-based line number of the begin marker, for error reporting.
    start_line: usize,
    content: Vec<String>,
}

/// Scan `lines` for extract marker pairs and produce the delimited blocks.
///
/// All dialects are probed against every line. Once a block is open, only
/// the opening dialect's end pattern closes it; a begin marker from any
/// dialect before then is a nesting violation. Extraction never mutates its
/// input.
pub fn scan_blocks(path: &Path, lines: &[String]) -> Result<Vec<Block>> {
    let mut blocks = Vec::new();
    let mut open: Option<OpenBlock> = None;

    for (idx, line) in lines.iter().enumerate() {
        match open.take() {
            Some(mut current) => {
                if current.dialect.is_end(line) {
                    blocks.push(finalize(path, current, idx + 1)?);
                } else if begin_marker(MarkerKind::Extract, line).is_some() {
                    return Err(Error::nested_begin(path, idx + 1, line));
                } else {
                    current.content.push(line.clone());
                    open = Some(current);
                }
            }
            None => {
                if let Some((dialect, info)) = begin_marker(MarkerKind::Extract, line) {
                    open = Some(OpenBlock {
                        dialect,
                        info,
                        start_line: idx + 1,
                        content: Vec::new(),
                    });
                } else if end_marker(MarkerKind::Extract, line).is_some() {
                    return Err(Error::orphaned_end(path, idx + 1, line));
                }
            }
        }
    }

    if let Some(current) = open {
        return Err(Error::UnclosedBlock {
            path: path.to_path_buf(),
            line: current.start_line,
        });
    }

    Ok(blocks)
}

fn finalize(path: &Path, open: OpenBlock, end_line: usize) -> Result<Block> {
    let indented = reindent(&open.content, open.info.total_indent);
    let content = trim(indented, open.info.head, open.info.tail)?;
    Ok(Block {
        identity: open.info.identity,
        source: path.to_path_buf(),
        start_line: open.start_line,
        end_line,
        indent: open.info.total_indent,
        content,
    })
}
