//! Heading line rewriting.
//!
//! A rewritten heading keeps its marker run, gap and closing sequence, and
//! gets an inline anchor target plus a color span around the title:
//!
//! ```text
//! ## <a class="anchor" id="setup"></a><span style="color: #1f77b4">Setup</span>
//! ```
//!
//! The parser strips this markup again when it sees it, so rewriting an
//! already rewritten line replaces the wrapper instead of nesting it.

use crate::anchor::AnchorGenerator;
use crate::palette::Palette;
use crate::parser::{self, HeadingLine, ParsedLine};

/// A heading found while rewriting a cell
#[derive(Debug, Clone, PartialEq)]
pub struct RewrittenHeading {
    pub level: u8,
    pub title: String,
    pub anchor: String,
    pub color: String,
}

/// Result of rewriting one markdown cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellRewrite {
    pub source: String,
    pub headings: Vec<RewrittenHeading>,
}

impl CellRewrite {
    pub fn changed(&self, original: &str) -> bool {
        self.source != original
    }
}

/// Render a heading line with its anchor and color
pub fn rewrite_heading(heading: &HeadingLine, anchor: &str, color: &str) -> String {
    format!(
        r#"{}{}<a class="anchor" id="{}"></a><span style="color: {}">{}</span>{}"#,
        heading.marker,
        heading.gap,
        escape_attribute(anchor),
        escape_attribute(color),
        heading.title,
        heading.trailing
    )
}

/// Rewrite every heading line of a markdown cell source
///
/// Anchors come from the shared generator so suffixes stay unique across
/// the whole notebook. Everything that is not a heading is copied verbatim,
/// terminators included.
pub fn rewrite_markdown_source(
    source: &str,
    max_level: u8,
    anchors: &mut AnchorGenerator,
    palette: &Palette,
) -> CellRewrite {
    let mut out = String::with_capacity(source.len() + 64);
    let mut headings = Vec::new();

    for scanned in parser::scan_cell(source, max_level) {
        match &scanned.parsed {
            ParsedLine::Heading(heading) => {
                let anchor = anchors.next_anchor(&heading.title);
                let color = palette.color_for(heading.level).to_string();
                log::debug!(
                    "Heading level {} '{}' -> #{} ({}){}",
                    heading.level,
                    heading.title,
                    anchor,
                    color,
                    if heading.wrapped { ", replacing earlier markup" } else { "" }
                );

                out.push_str(&rewrite_heading(heading, &anchor, &color));
                headings.push(RewrittenHeading {
                    level: heading.level,
                    title: heading.title.clone(),
                    anchor,
                    color,
                });
            }
            ParsedLine::NotAHeading => out.push_str(scanned.line.text),
        }
        out.push_str(scanned.line.terminator);
    }

    CellRewrite {
        source: out,
        headings,
    }
}

/// Anchors and colors end up inside double-quoted attributes
fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}
