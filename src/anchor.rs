//! Anchor generation for heading links.
//!
//! Anchors are slugs of the heading title, optionally namespaced with a
//! prefix, and made unique per notebook by appending `-1`, `-2`, ... to
//! repeats. Uniqueness is tracked across the whole document, so the same
//! titles in the same order always produce the same anchors.

use std::collections::{HashMap, HashSet};

/// Used when a title has no alphanumeric characters at all
const EMPTY_SLUG: &str = "section";

/// Lowercase the title and collapse every non-alphanumeric run into one `-`
pub fn slugify(title: &str) -> String {
    let slug = slug_body(title);
    if slug.is_empty() {
        EMPTY_SLUG.to_string()
    } else {
        slug
    }
}

/// Slug without the empty fallback; may be ""
fn slug_body(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}

/// Prefixes are slugged too and joined with `-`, so anchors stay URL-safe
fn normalize_prefix(prefix: &str) -> String {
    let slug = slug_body(prefix);
    if slug.is_empty() { slug } else { slug + "-" }
}

/// Hands out document-unique anchors in document order
#[derive(Debug, Default)]
pub struct AnchorGenerator {
    prefix: String,
    used: HashSet<String>,
    /// Last suffix tried for each base anchor
    suffixes: HashMap<String, usize>,
}

impl AnchorGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: normalize_prefix(&prefix.into()),
            used: HashSet::new(),
            suffixes: HashMap::new(),
        }
    }

    /// Anchor for the next heading with this title
    pub fn next_anchor(&mut self, title: &str) -> String {
        let base = format!("{}{}", self.prefix, slugify(title));

        if self.used.insert(base.clone()) {
            return base;
        }

        let counter = self.suffixes.entry(base.clone()).or_insert(0);
        loop {
            *counter += 1;
            let candidate = format!("{}-{}", base, counter);
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}
