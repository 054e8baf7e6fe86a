//! Heading AST
//!
//! Minimal types representing a parsed markdown line.
//! No rewriting or notebook concerns - pure data plus the line classifier.

use std::sync::LazyLock;

use regex::Regex;

/// Deepest heading level markdown knows about
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Title body followed by an optional closing `#` sequence and trailing blanks
static CLOSING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*?)((?:[ \t]+#+)?[ \t]*)$").expect("closing sequence pattern")
});

/// Anchor target emitted by the rewriter
static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^<a class="anchor" id="[^"]*">\s*</a>\s*"#).expect("anchor pattern")
});

/// Color directive emitted by the rewriter
static COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^<span style="color:\s*[^"]*">(.*)</span>$"#).expect("color pattern")
});

/// Classification of a single markdown line
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    /// Body text, a fenced code line, or anything that fails the ATX rules
    NotAHeading,
    /// An ATX heading like "## Results"
    Heading(HeadingLine),
}

/// An ATX heading split into the pieces needed to reassemble it
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingLine {
    /// Number of `#` markers (1..=6)
    pub level: u8,
    /// The marker run exactly as written
    pub marker: String,
    /// Whitespace between the markers and the title
    pub gap: String,
    /// Title text with any previous anchor/color markup removed
    pub title: String,
    /// Closing `#` sequence and trailing blanks, kept verbatim
    pub trailing: String,
    /// Whether the title was already wrapped by anchor/color markup
    pub wrapped: bool,
}

/// Classify a line (without its terminator) as heading or not
pub fn line_to_parsed_line(line: &str, max_level: u8) -> ParsedLine {
    let max_level = max_level.clamp(1, MAX_HEADING_LEVEL) as usize;

    let marker_len = line.bytes().take_while(|b| *b == b'#').count();
    if marker_len == 0 || marker_len > max_level {
        return ParsedLine::NotAHeading;
    }

    let rest = &line[marker_len..];
    let body = rest.trim_start_matches([' ', '\t']);
    let gap_len = rest.len() - body.len();
    if gap_len == 0 || body.is_empty() || body.bytes().all(|b| b == b'#') {
        return ParsedLine::NotAHeading;
    }

    let (content, trailing) = split_closing_sequence(body);
    let (title, wrapped) = strip_markup(content);
    if title.trim().is_empty() {
        return ParsedLine::NotAHeading;
    }

    ParsedLine::Heading(HeadingLine {
        level: marker_len as u8,
        marker: line[..marker_len].to_string(),
        gap: rest[..gap_len].to_string(),
        title: title.to_string(),
        trailing: trailing.to_string(),
        wrapped,
    })
}

/// Split "Title ##  " into ("Title", " ##  ")
fn split_closing_sequence(body: &str) -> (&str, &str) {
    match CLOSING_RE.captures(body) {
        Some(caps) => {
            let content = caps.get(1).map_or("", |m| m.as_str());
            let trailing = caps.get(2).map_or("", |m| m.as_str());
            (content, trailing)
        }
        None => (body, ""),
    }
}

/// Remove anchor/color markup left by an earlier rewrite
fn strip_markup(content: &str) -> (&str, bool) {
    let mut inner = content;
    let mut wrapped = false;

    if let Some(m) = ANCHOR_RE.find(inner) {
        inner = &inner[m.end()..];
        wrapped = true;
    }

    if let Some(caps) = COLOR_RE.captures(inner) {
        inner = caps.get(1).map_or("", |m| m.as_str());
        wrapped = true;
    }

    (inner, wrapped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(line: &str) -> HeadingLine {
        match line_to_parsed_line(line, MAX_HEADING_LEVEL) {
            ParsedLine::Heading(h) => h,
            ParsedLine::NotAHeading => panic!("Expected heading for {:?}", line),
        }
    }

    #[test]
    fn test_split_closing_sequence() {
        assert_eq!(split_closing_sequence("Title ##"), ("Title", " ##"));
        assert_eq!(split_closing_sequence("Title  "), ("Title", "  "));
        assert_eq!(split_closing_sequence("C# basics"), ("C# basics", ""));
        assert_eq!(split_closing_sequence("Title#"), ("Title#", ""));
    }

    #[test]
    fn test_strip_markup_full_wrapper() {
        let (title, wrapped) = strip_markup(
            r#"<a class="anchor" id="intro"></a><span style="color: #ff0000">Intro</span>"#,
        );
        assert_eq!(title, "Intro");
        assert!(wrapped);
    }

    #[test]
    fn test_strip_markup_partial_wrappers() {
        let (title, wrapped) = strip_markup(r#"<a class="anchor" id="x"></a>Plain"#);
        assert_eq!(title, "Plain");
        assert!(wrapped);

        let (title, wrapped) = strip_markup(r#"<span style="color:red">Red</span>"#);
        assert_eq!(title, "Red");
        assert!(wrapped);

        let (title, wrapped) = strip_markup("<b>Bold</b>");
        assert_eq!(title, "<b>Bold</b>");
        assert!(!wrapped);
    }

    #[test]
    fn test_heading_pieces() {
        let h = heading("##\tSetup ##");
        assert_eq!(h.level, 2);
        assert_eq!(h.marker, "##");
        assert_eq!(h.gap, "\t");
        assert_eq!(h.title, "Setup");
        assert_eq!(h.trailing, " ##");
        assert!(!h.wrapped);
    }

    #[test]
    fn test_empty_title_after_markup_is_not_heading() {
        let line = r#"# <a class="anchor" id="x"></a>"#;
        assert_eq!(
            line_to_parsed_line(line, MAX_HEADING_LEVEL),
            ParsedLine::NotAHeading
        );
    }
}
