//! Table of contents cell generation.
//!
//! The generated cell starts with a sentinel comment so later runs can find
//! and replace it instead of adding a second one.

use crate::rewrite::RewrittenHeading;

/// First line of every generated table of contents
pub const TOC_SENTINEL: &str = "<!-- notebook-toc -->";

/// Default heading shown above the list
pub const DEFAULT_TOC_TITLE: &str = "Table of Contents";

/// Body used when the notebook has no headings
pub const NO_HEADINGS_PLACEHOLDER: &str = "*No headings found.*";

const INDENT: &str = "    ";

/// One linked item of the table of contents
#[derive(Debug, Clone, PartialEq)]
pub struct TocEntry {
    pub level: u8,
    pub title: String,
    pub anchor: String,
}

impl From<&RewrittenHeading> for TocEntry {
    fn from(heading: &RewrittenHeading) -> Self {
        Self {
            level: heading.level,
            title: heading.title.clone(),
            anchor: heading.anchor.clone(),
        }
    }
}

/// Build the markdown source of the table of contents cell
///
/// Items stay in document order; nesting is the heading level minus the
/// shallowest level present.
pub fn build_toc_source(entries: &[TocEntry], title: &str) -> String {
    let mut out = String::new();
    out.push_str(TOC_SENTINEL);
    out.push('\n');
    out.push_str("# ");
    out.push_str(title);
    out.push_str("\n\n");

    let Some(min_level) = entries.iter().map(|e| e.level).min() else {
        out.push_str(NO_HEADINGS_PLACEHOLDER);
        return out;
    };

    let items: Vec<String> = entries
        .iter()
        .map(|entry| {
            let depth = (entry.level - min_level) as usize;
            format!(
                "{}- [{}](#{})",
                INDENT.repeat(depth),
                escape_link_text(&entry.title),
                entry.anchor
            )
        })
        .collect();
    out.push_str(&items.join("\n"));

    out
}

/// Whether a markdown source is a generated table of contents
pub fn is_toc_source(source: &str) -> bool {
    source
        .lines()
        .find(|line| !line.trim().is_empty())
        .is_some_and(|line| line.trim() == TOC_SENTINEL)
}

/// Backslash-escape characters that could end or restyle the link text
fn escape_link_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '[' | ']' | '*' | '_' | '`' | '<' | '>') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
