//! Markdown Heading Parser
//!
//! Pure, line-oriented recognition of ATX headings in markdown cells.
//! Focused solely on classification; rewriting lives elsewhere.

pub mod ast;
pub mod lexer;

pub use ast::{HeadingLine, MAX_HEADING_LEVEL, ParsedLine};
pub use lexer::{SourceLine, split_lines};

/// Parse a single markdown line (without terminator)
///
/// This is the main entry point for heading recognition. Only a `#` run at
/// the very start of the line counts; setext headings are not recognised.
pub fn parse_heading(line: &str, max_level: u8) -> ParsedLine {
    ast::line_to_parsed_line(line, max_level)
}

/// A source line paired with its classification
#[derive(Debug, Clone, PartialEq)]
pub struct ScannedLine<'a> {
    pub line: SourceLine<'a>,
    pub parsed: ParsedLine,
}

/// Classify every line of a markdown cell, ignoring fenced code
pub fn scan_cell(source: &str, max_level: u8) -> Vec<ScannedLine<'_>> {
    split_lines(source)
        .into_iter()
        .map(|line| {
            let parsed = if line.in_fence {
                ParsedLine::NotAHeading
            } else {
                parse_heading(line.text, max_level)
            };
            ScannedLine { line, parsed }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_heading() {
        let result = parse_heading("## Data loading", MAX_HEADING_LEVEL);

        if let ParsedLine::Heading(h) = result {
            assert_eq!(h.level, 2);
            assert_eq!(h.title, "Data loading");
        } else {
            panic!("Expected heading");
        }
    }

    #[test]
    fn test_closing_sequence_is_stripped() {
        let result = parse_heading("# Intro #", MAX_HEADING_LEVEL);

        if let ParsedLine::Heading(h) = result {
            assert_eq!(h.title, "Intro");
            assert_eq!(h.trailing, " #");
        } else {
            panic!("Expected heading");
        }
    }

    #[test]
    fn test_marker_without_whitespace() {
        assert_eq!(parse_heading("#Intro", 6), ParsedLine::NotAHeading);
        assert_eq!(parse_heading("#", 6), ParsedLine::NotAHeading);
        assert_eq!(parse_heading("##   ", 6), ParsedLine::NotAHeading);
    }

    #[test]
    fn test_marker_mid_line() {
        assert_eq!(parse_heading("see # not a heading", 6), ParsedLine::NotAHeading);
        assert_eq!(parse_heading(" # indented", 6), ParsedLine::NotAHeading);
    }

    #[test]
    fn test_level_cap() {
        assert_eq!(parse_heading("####### Seven", 6), ParsedLine::NotAHeading);
        assert_eq!(parse_heading("### Three", 2), ParsedLine::NotAHeading);
        assert!(matches!(parse_heading("## Two", 2), ParsedLine::Heading(_)));
    }

    #[test]
    fn test_cap_is_clamped() {
        assert!(matches!(parse_heading("# One", 0), ParsedLine::Heading(_)));
        assert_eq!(parse_heading("####### Seven", 200), ParsedLine::NotAHeading);
    }

    #[test]
    fn test_scan_cell_skips_fenced_code() {
        let scanned = scan_cell("# Title\n```bash\n# not a heading\n```\n## Sub\n", 6);

        let levels: Vec<Option<u8>> = scanned
            .iter()
            .map(|s| match &s.parsed {
                ParsedLine::Heading(h) => Some(h.level),
                ParsedLine::NotAHeading => None,
            })
            .collect();
        assert_eq!(levels, vec![Some(1), None, None, None, Some(2)]);
    }
}
