//! Pure line transforms: indentation adjustment and head/tail trimming

use crate::error::{Error, Result};

/// Re-indent `lines` by `delta` columns.
///
/// Positive `delta` prepends that many spaces to every line. Negative
/// `delta` strips up to `|delta|` leading spaces from each line
/// independently, never past the first non-space character. Every returned
/// line is terminated with a single `\n` regardless of the input
/// terminator.
pub fn reindent(lines: &[String], delta: i64) -> Vec<String> {
    lines
        .iter()
        .map(|line| {
            let stripped = line.trim_end_matches(['\r', '\n']);
            if delta >= 0 {
                format!("{}{}\n", " ".repeat(delta as usize), stripped)
            } else {
                let leading = stripped.len() - stripped.trim_start_matches(' ').len();
                let remove = (-delta as usize).min(leading);
                format!("{}\n", &stripped[remove..])
            }
        })
        .collect()
}

/// Drop the first `head` and last `tail` lines.
///
/// Fails when nothing (or a negative count) would remain, which makes the
/// trim request ambiguous.
pub fn trim(lines: Vec<String>, head: usize, tail: usize) -> Result<Vec<String>> {
    if lines.len() <= head + tail {
        return Err(Error::MalformedBlock {
            lines: lines.len(),
            head,
            tail,
        });
    }
    let end = lines.len() - tail;
    Ok(lines[head..end].to_vec())
}
