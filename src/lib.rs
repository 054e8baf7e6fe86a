//! Notebook TOC
//!
//! Colors the markdown headings of a Jupyter notebook by level, gives each
//! one an anchor, and adds a linked table of contents cell.
//!
//! This library provides:
//! - Markdown heading parsing
//! - Anchor and color assignment
//! - Idempotent heading rewriting
//! - Table of contents generation
//! - Configuration management

pub mod anchor;
pub mod config;
pub mod core;
pub mod notebook;
pub mod palette;
pub mod parser;
pub mod rewrite;
pub mod rewriter;
pub mod toc;

// Re-exports for clean public API
pub use config::Config;
pub use crate::core::{RewriteError, RewriteReport};
pub use notebook::Notebook;
pub use palette::Palette;
pub use parser::{ParsedLine, parse_heading};
pub use rewriter::{NotebookRewriter, RewriteOptions, RewriteOutcome};
