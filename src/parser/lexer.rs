//! Markdown Line Lexer
//!
//! Splits cell source into lines and tracks fenced code blocks.
//! No heading logic here - a line is either body text or fenced code.

/// A line of cell source with its original terminator
#[derive(Debug, Clone, PartialEq)]
pub struct SourceLine<'a> {
    /// Line text without the terminator
    pub text: &'a str,
    /// "\n", "\r\n" or "" for the final line
    pub terminator: &'a str,
    /// True for fence delimiters and everything between them
    pub in_fence: bool,
}

/// An open code fence: marker character and run length
#[derive(Debug, Clone, Copy, PartialEq)]
struct Fence {
    ch: char,
    len: usize,
}

/// Split source into lines, keeping terminators so the text can be reassembled
pub fn split_lines(source: &str) -> Vec<SourceLine<'_>> {
    let mut lines = Vec::new();
    let mut open: Option<Fence> = None;

    for raw in source.split_inclusive('\n') {
        let (text, terminator) = if let Some(stripped) = raw.strip_suffix("\r\n") {
            (stripped, &raw[stripped.len()..])
        } else if let Some(stripped) = raw.strip_suffix('\n') {
            (stripped, &raw[stripped.len()..])
        } else {
            (raw, "")
        };

        let in_fence = match (open, fence_marker(text)) {
            (None, Some((fence, _))) => {
                open = Some(fence);
                true
            }
            (Some(current), Some((fence, rest))) => {
                if fence.ch == current.ch && fence.len >= current.len && rest.trim().is_empty() {
                    open = None;
                }
                true
            }
            (Some(_), None) => true,
            (None, None) => false,
        };

        lines.push(SourceLine {
            text,
            terminator,
            in_fence,
        });
    }

    lines
}

/// Recognise "```lang" / "~~~" indented by at most three spaces
fn fence_marker(text: &str) -> Option<(Fence, &str)> {
    let indent = text.len() - text.trim_start_matches(' ').len();
    if indent > 3 {
        return None;
    }

    let trimmed = &text[indent..];
    let ch = trimmed.chars().next()?;
    if ch != '`' && ch != '~' {
        return None;
    }

    let len = trimmed.chars().take_while(|c| *c == ch).count();
    if len < 3 {
        return None;
    }

    Some((Fence { ch, len }, &trimmed[len..]))
}
