//! Insert engine: splices block content into marked regions
//!
//! The region between an insert begin/end marker pair is owned by the sync
//! process: it is regenerated from the resolved block, never hand-edited.
//! The idempotence check keeps an up-to-date region byte-for-byte untouched,
//! which is what makes repeated runs produce no diff.

use std::path::Path;

use tracing::warn;

use crate::block::BlockResolver;
use crate::error::{Error, Result};
use crate::grammar::{BeginInfo, MarkerDialect, MarkerKind, begin_marker, end_marker};
use crate::transform::reindent;

/// How insert regions are rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertMode {
    /// Splice resolved block content into each region.
    #[default]
    Apply,
    /// Delete generated content and end markers, keeping begin markers and
    /// the preserved hop/skip lines.
    Clear,
}

/// Result of splicing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpliceOutcome {
    /// The rewritten line sequence.
    pub lines: Vec<String>,
    /// Whether the sequence differs from the input. Unchanged files must
    /// not be rewritten.
    pub changed: bool,
}

/// Scan `lines` for insert marker pairs and rewrite each region.
///
/// Unresolved identities are warnings, not errors: the region is left
/// untouched because sync may run before the matching extract exists. A
/// begin marker with no end marker yet is directly insertable and gets a
/// synthesized end tag.
pub fn splice_blocks(
    path: &Path,
    lines: &[String],
    resolver: &dyn BlockResolver,
    mode: InsertMode,
) -> Result<SpliceOutcome> {
    let mut output: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let line = &lines[i];

        // Any end marker reached by the top-level scan has no open begin.
        if end_marker(MarkerKind::Insert, line).is_some() {
            return Err(Error::orphaned_end(path, i + 1, line));
        }

        let Some((dialect, info)) = begin_marker(MarkerKind::Insert, line) else {
            output.push(line.clone());
            i += 1;
            continue;
        };

        // Locate the matching end marker, rejecting a second begin first.
        let mut end_idx = None;
        for (offset, candidate) in lines[i + 1..].iter().enumerate() {
            let j = i + 1 + offset;
            if begin_marker(MarkerKind::Insert, candidate).is_some() {
                return Err(Error::nested_begin(path, j + 1, candidate));
            }
            if dialect.is_end(candidate) {
                end_idx = Some(j);
                break;
            }
        }

        i = match end_idx {
            Some(end) => {
                splice_closed_region(lines, i, end, dialect, &info, resolver, mode, &mut output);
                end + 1
            }
            None => splice_open_region(lines, i, dialect, &info, resolver, mode, &mut output),
        };
    }

    let changed = output != lines;
    Ok(SpliceOutcome {
        lines: output,
        changed,
    })
}

/// Rewrite a begin/end delimited region. The caller advances past the end
/// marker.
#[allow(clippy::too_many_arguments)]
fn splice_closed_region(
    lines: &[String],
    begin: usize,
    end: usize,
    dialect: &MarkerDialect,
    info: &BeginInfo,
    resolver: &dyn BlockResolver,
    mode: InsertMode,
    output: &mut Vec<String>,
) {
    let region = &lines[begin + 1..end];
    // Oversized hop/skip degrade gracefully instead of reading out of
    // bounds.
    let hop = info.head.min(region.len());
    let skip = info.tail.min(region.len() - hop);
    let hop_lines = &region[..hop];
    let skip_lines = &region[region.len() - skip..];

    if mode == InsertMode::Clear {
        output.push(lines[begin].clone());
        output.extend(hop_lines.iter().cloned());
        output.extend(skip_lines.iter().cloned());
        return;
    }

    let Some(content) = resolver.resolve(&info.identity) else {
        warn!(identity = %info.identity, "no block for insert marker, leaving region untouched");
        output.extend(lines[begin..=end].iter().cloned());
        return;
    };

    let block = reindent(&content, info.total_indent);

    // Idempotence check: what the region should contain.
    let mut expected: Vec<String> = hop_lines.to_vec();
    expected.extend(block.iter().cloned());
    expected.extend(skip_lines.iter().cloned());

    if region == expected.as_slice() {
        output.extend(lines[begin..=end].iter().cloned());
        return;
    }

    push_marker_line(&lines[begin], output);
    output.extend(hop_lines.iter().cloned());
    output.extend(block);
    output.extend(skip_lines.iter().cloned());
    output.push(end_tag_line(dialect, info, &lines[begin]));
}

/// Handle a begin marker with no end marker yet. Returns the index the scan
/// resumes from.
fn splice_open_region(
    lines: &[String],
    begin: usize,
    dialect: &MarkerDialect,
    info: &BeginInfo,
    resolver: &dyn BlockResolver,
    mode: InsertMode,
    output: &mut Vec<String>,
) -> usize {
    if mode == InsertMode::Clear {
        // Nothing was generated yet, there is nothing to clear.
        output.push(lines[begin].clone());
        return begin + 1;
    }

    let Some(content) = resolver.resolve(&info.identity) else {
        warn!(identity = %info.identity, "no block for insert marker, leaving region untouched");
        output.push(lines[begin].clone());
        return begin + 1;
    };

    let rest = &lines[begin + 1..];
    let hop = info.head.min(rest.len());
    let skip = info.tail.min(rest.len() - hop);

    push_marker_line(&lines[begin], output);
    output.extend(rest[..hop].iter().cloned());
    output.extend(reindent(&content, info.total_indent));
    output.extend(rest[hop..hop + skip].iter().cloned());
    output.push(end_tag_line(dialect, info, &lines[begin]));

    begin + 1 + hop + skip
}

/// Emit the begin marker, adding a separating newline when the marker was
/// the terminator-less last line of the file.
fn push_marker_line(marker: &str, output: &mut Vec<String>) {
    if marker.ends_with('\n') {
        output.push(marker.to_string());
    } else {
        output.push(format!("{marker}\n"));
    }
}

/// Reconstruct the end tag from the dialect template at the begin marker's
/// original indentation. The trailing newline mirrors the begin line's.
fn end_tag_line(dialect: &MarkerDialect, info: &BeginInfo, marker: &str) -> String {
    let tag = format!("{}{}", " ".repeat(info.original_indent), dialect.end_tag());
    if marker.ends_with('\n') {
        format!("{tag}\n")
    } else {
        tag
    }
}
