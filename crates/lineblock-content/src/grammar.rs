//! Marker grammar definitions for the supported comment dialects
//!
//! Each dialect is a data row (prefix, suffix, end-tag template); the begin
//! and end patterns are generated from one shape per marker family. Adding a
//! dialect means adding a row, not new control flow.

use regex::Regex;
use std::sync::LazyLock;

/// Which marker family a scan is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// `block extract` / `end extract` markers
    Extract,
    /// `block insert` / `end insert` markers
    Insert,
}

impl MarkerKind {
    fn verb(self) -> &'static str {
        match self {
            Self::Extract => "extract",
            Self::Insert => "insert",
        }
    }
}

/// One row of the dialect table. Prefix and suffix are regex fragments
/// (already escaped); the end tag is the literal line synthesized when an
/// insert region is closed.
struct DialectSpec {
    name: &'static str,
    prefix: &'static str,
    suffix: &'static str,
    insert_end_tag: &'static str,
}

/// Dialect token prefixes are mutually exclusive, so a line matches at most
/// one dialect's begin or end pattern.
const DIALECT_TABLE: &[DialectSpec] = &[
    DialectSpec {
        name: "HTML",
        prefix: "<!--",
        suffix: "-->",
        insert_end_tag: "<!-- end insert -->",
    },
    DialectSpec {
        name: "Python",
        prefix: "#",
        suffix: "",
        insert_end_tag: "# end insert",
    },
    DialectSpec {
        name: "C",
        prefix: "//",
        suffix: "",
        insert_end_tag: "// end insert",
    },
    DialectSpec {
        name: "C Multi-Line",
        prefix: r"/\*",
        suffix: r"\*/",
        insert_end_tag: "/* end insert */",
    },
    DialectSpec {
        name: "SQL",
        prefix: "--",
        suffix: "",
        insert_end_tag: "-- end insert",
    },
    DialectSpec {
        name: "Assembly",
        prefix: ";",
        suffix: "",
        insert_end_tag: "; end insert",
    },
    DialectSpec {
        name: "Ruby",
        prefix: "=begin",
        suffix: "=end",
        insert_end_tag: "=begin end insert =end",
    },
    DialectSpec {
        name: "Visual Basic",
        prefix: "'",
        suffix: "",
        insert_end_tag: "' end insert",
    },
];

/// A compiled marker grammar for one comment dialect and one marker family.
pub struct MarkerDialect {
    pub name: &'static str,
    begin: Regex,
    end: Regex,
    end_tag: &'static str,
}

/// Fields parsed from a begin marker line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeginInfo {
    /// Snippet name/key; quoted (double or single) or bare token.
    pub identity: String,
    /// Leading-whitespace column of the marker line.
    pub original_indent: usize,
    /// `original_indent` plus the optional signed indent argument.
    pub total_indent: i64,
    /// Extract: lines dropped from the block top. Insert: hop count.
    pub head: usize,
    /// Extract: lines dropped from the block bottom. Insert: skip count.
    pub tail: usize,
}

/// Result of classifying a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker {
    Begin(BeginInfo),
    End,
}

impl MarkerDialect {
    fn compile(spec: &DialectSpec, kind: MarkerKind) -> Self {
        let verb = kind.verb();
        // Shape: leading ws, prefix, verb, identity (double-quoted,
        // single-quoted, or bare), then up to three optional integers
        // (indent, head, tail), suffix, trailing junk allowed.
        let begin = format!(
            r#"^(\s*){prefix}\s*block {verb}\s+(?:"([^"]*)"|'([^']*)'|(\S+))(?:\s+(-?\d+))?(?:\s+(\d+))?(?:\s+(\d+))?\s*{suffix}.*"#,
            prefix = spec.prefix,
            verb = verb,
            suffix = spec.suffix,
        );
        // Matched against the trimmed line, so indented end markers count.
        let end = format!(
            r"^{prefix}\s*end {verb}.*?\s*{suffix}.*",
            prefix = spec.prefix,
            verb = verb,
            suffix = spec.suffix,
        );
        Self {
            name: spec.name,
            begin: Regex::new(&begin).expect("invalid begin marker pattern"),
            end: Regex::new(&end).expect("invalid end marker pattern"),
            end_tag: spec.insert_end_tag,
        }
    }

    /// Parse a begin marker from `line`, anchored at the start of the line.
    ///
    /// Returns `None` when the line is not a begin marker of this dialect,
    /// including when the identity capture is empty.
    pub fn parse_begin(&self, line: &str) -> Option<BeginInfo> {
        let caps = self.begin.captures(line)?;
        let original_indent = caps.get(1).map_or(0, |m| m.as_str().len());
        // First non-empty identity group wins.
        let identity = [2, 3, 4]
            .iter()
            .find_map(|&g| caps.get(g).map(|m| m.as_str()).filter(|s| !s.is_empty()))?
            .to_string();
        let indent: i64 = match caps.get(5) {
            Some(m) => m.as_str().parse().ok()?,
            None => 0,
        };
        let head: usize = match caps.get(6) {
            Some(m) => m.as_str().parse().ok()?,
            None => 0,
        };
        let tail: usize = match caps.get(7) {
            Some(m) => m.as_str().parse().ok()?,
            None => 0,
        };
        Some(BeginInfo {
            identity,
            original_indent,
            total_indent: original_indent as i64 + indent,
            head,
            tail,
        })
    }

    /// Check whether `line` is an end marker of this dialect.
    pub fn is_end(&self, line: &str) -> bool {
        self.end.is_match(line.trim())
    }

    /// The literal end-marker line synthesized after a spliced insert
    /// region, without indentation or line terminator.
    pub fn end_tag(&self) -> &'static str {
        self.end_tag
    }
}

static EXTRACT_DIALECTS: LazyLock<Vec<MarkerDialect>> = LazyLock::new(|| {
    DIALECT_TABLE
        .iter()
        .map(|spec| MarkerDialect::compile(spec, MarkerKind::Extract))
        .collect()
});

static INSERT_DIALECTS: LazyLock<Vec<MarkerDialect>> = LazyLock::new(|| {
    DIALECT_TABLE
        .iter()
        .map(|spec| MarkerDialect::compile(spec, MarkerKind::Insert))
        .collect()
});

/// The compiled dialect table for one marker family.
pub fn dialects(kind: MarkerKind) -> &'static [MarkerDialect] {
    match kind {
        MarkerKind::Extract => &EXTRACT_DIALECTS,
        MarkerKind::Insert => &INSERT_DIALECTS,
    }
}

/// Classify `line` against every dialect of the given marker family.
///
/// Begin patterns take precedence over end patterns within a dialect; the
/// dialect token prefixes keep matches mutually exclusive across dialects.
pub fn classify(kind: MarkerKind, line: &str) -> Option<(&'static MarkerDialect, Marker)> {
    for dialect in dialects(kind) {
        if let Some(info) = dialect.parse_begin(line) {
            return Some((dialect, Marker::Begin(info)));
        }
        if dialect.is_end(line) {
            return Some((dialect, Marker::End));
        }
    }
    None
}

/// Find the dialect whose begin pattern matches `line`, if any.
pub fn begin_marker(kind: MarkerKind, line: &str) -> Option<(&'static MarkerDialect, BeginInfo)> {
    dialects(kind)
        .iter()
        .find_map(|d| d.parse_begin(line).map(|info| (d, info)))
}

/// Find the dialect whose end pattern matches `line`, if any.
pub fn end_marker(kind: MarkerKind, line: &str) -> Option<&'static MarkerDialect> {
    dialects(kind).iter().find(|d| d.is_end(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn html_begin_marker_with_all_arguments() {
        let (dialect, info) =
            begin_marker(MarkerKind::Extract, "  <!-- block extract basic.md -2 1 3 -->\n")
                .unwrap();
        assert_eq!(dialect.name, "HTML");
        assert_eq!(info.identity, "basic.md");
        assert_eq!(info.original_indent, 2);
        assert_eq!(info.total_indent, 0);
        assert_eq!(info.head, 1);
        assert_eq!(info.tail, 3);
    }

    #[test]
    fn quoted_identity_allows_spaces() {
        let (_, info) =
            begin_marker(MarkerKind::Insert, "<!-- block insert \"my snippet.md\" -->\n").unwrap();
        assert_eq!(info.identity, "my snippet.md");

        let (_, info) =
            begin_marker(MarkerKind::Insert, "# block insert 'other snippet'\n").unwrap();
        assert_eq!(info.identity, "other snippet");
    }

    #[test]
    fn empty_quoted_identity_is_not_a_marker() {
        assert!(begin_marker(MarkerKind::Insert, "<!-- block insert \"\" -->\n").is_none());
    }

    #[rstest]
    #[case("# block extract snip.py", "Python")]
    #[case("// block extract snip.c 2", "C")]
    #[case("/* block extract snip.c */", "C Multi-Line")]
    #[case("-- block extract snip.sql", "SQL")]
    #[case("; block extract snip.asm", "Assembly")]
    #[case("=begin block extract snip.rb =end", "Ruby")]
    #[case("' block extract snip.vb", "Visual Basic")]
    fn every_dialect_recognizes_its_begin_marker(#[case] line: &str, #[case] name: &str) {
        let (dialect, info) = begin_marker(MarkerKind::Extract, line).unwrap();
        assert_eq!(dialect.name, name);
        assert!(info.identity.starts_with("snip."));
    }

    #[rstest]
    #[case("<!-- end insert -->", "HTML")]
    #[case("# end insert", "Python")]
    #[case("// end insert", "C")]
    #[case("/* end insert */", "C Multi-Line")]
    #[case("-- end insert", "SQL")]
    #[case("; end insert", "Assembly")]
    #[case("=begin end insert =end", "Ruby")]
    #[case("' end insert", "Visual Basic")]
    fn every_dialect_recognizes_its_end_tag(#[case] line: &str, #[case] name: &str) {
        let dialect = end_marker(MarkerKind::Insert, line).unwrap();
        assert_eq!(dialect.name, name);
        assert_eq!(dialect.end_tag(), line);
    }

    #[test]
    fn indented_end_marker_is_recognized() {
        assert!(end_marker(MarkerKind::Extract, "    <!-- end extract -->\n").is_some());
    }

    #[test]
    fn extract_and_insert_markers_do_not_cross_match() {
        assert!(begin_marker(MarkerKind::Extract, "<!-- block insert x.md -->").is_none());
        assert!(end_marker(MarkerKind::Insert, "<!-- end extract -->").is_none());
    }

    #[test]
    fn prose_mentioning_markers_is_not_classified() {
        assert!(classify(MarkerKind::Insert, "the <!-- block insert x --> form is used").is_none());
        assert!(classify(MarkerKind::Insert, "ordinary line of text").is_none());
    }

    #[test]
    fn html_end_marker_does_not_match_sql_dialect() {
        let dialect = end_marker(MarkerKind::Insert, "<!-- end insert -->").unwrap();
        assert_eq!(dialect.name, "HTML");
    }

    #[test]
    fn negative_indent_defaults_and_bare_identity() {
        let (_, info) = begin_marker(MarkerKind::Insert, "<!-- block insert basic.md -->").unwrap();
        assert_eq!(info.total_indent, 0);
        assert_eq!((info.head, info.tail), (0, 0));
    }
}
