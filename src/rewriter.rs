//! Notebook rewriting pipeline.
//!
//! Load -> parse cells -> rewrite headings -> place the table of contents ->
//! emit. Cells are processed strictly in document order because anchor
//! suffixes and TOC nesting depend on it. The input [`Notebook`] is never
//! modified; a new one is built from its cells.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::anchor::AnchorGenerator;
use crate::core::{RewriteError, RewriteReport};
use crate::notebook::{self, Cell, Notebook};
use crate::palette::{DEFAULT_COLOR, Palette};
use crate::parser::MAX_HEADING_LEVEL;
use crate::rewrite::rewrite_markdown_source;
use crate::toc::{self, DEFAULT_TOC_TITLE, TocEntry};

/// Default suffix for the derived output file name
pub const DEFAULT_OUTPUT_SUFFIX: &str = "chulo";

/// Cell id given to a new table of contents in notebooks that use ids
const TOC_CELL_ID: &str = "table-of-contents";

/// Everything a rewrite needs; passed explicitly, never global
#[derive(Debug, Clone, PartialEq)]
pub struct RewriteOptions {
    /// Heading colors by level, first entry for level 1
    pub colors: Vec<String>,
    /// Color for every heading when `colors` is empty
    pub default_color: String,
    /// Write the result next to the input
    pub save: bool,
    /// Deepest heading level that is recognised (clamped to 1..=6)
    pub max_heading_level: u8,
    /// Prepended to every generated anchor
    pub anchor_prefix: String,
    /// Output file is `<stem>-<suffix>.<ext>`
    pub output_suffix: String,
    pub toc_title: String,
    /// Where a new table of contents goes when none exists yet
    pub toc_position: usize,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            colors: Vec::new(),
            default_color: DEFAULT_COLOR.to_string(),
            save: true,
            max_heading_level: MAX_HEADING_LEVEL,
            anchor_prefix: String::new(),
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            toc_title: DEFAULT_TOC_TITLE.to_string(),
            toc_position: 1,
        }
    }
}

impl RewriteOptions {
    pub fn palette(&self) -> Palette {
        Palette::new(self.colors.clone(), self.default_color.clone())
    }
}

/// A successful run
#[derive(Debug, Clone)]
pub struct RewriteOutcome {
    pub notebook: Notebook,
    pub report: RewriteReport,
    /// Set when the result was written to disk
    pub output_path: Option<PathBuf>,
}

/// Drives the per-cell rewrite and assembles the output notebook
#[derive(Debug, Clone, Default)]
pub struct NotebookRewriter {
    options: RewriteOptions,
}

impl NotebookRewriter {
    pub fn new(options: RewriteOptions) -> Self {
        Self { options }
    }

    /// Load, rewrite and (if `save` is set) write a notebook file
    ///
    /// Fatal errors surface before anything is written.
    pub fn rewrite_file(&self, path: &Path) -> Result<RewriteOutcome, RewriteError> {
        let notebook = notebook::load_notebook(path)?;
        log::info!(
            "Loaded {} ({} cells)",
            path.display(),
            notebook.len()
        );

        let (rewritten, report) = self.rewrite_notebook(&notebook);

        let output_path = if self.options.save {
            let output = notebook::derive_output_path(path, &self.options.output_suffix);
            notebook::save_notebook(&rewritten, &output, path)?;
            Some(output)
        } else {
            None
        };

        Ok(RewriteOutcome {
            notebook: rewritten,
            report,
            output_path,
        })
    }

    /// Rewrite an in-memory notebook
    pub fn rewrite_notebook(&self, notebook: &Notebook) -> (Notebook, RewriteReport) {
        let palette = self.options.palette();
        let mut report = RewriteReport::new();
        if palette.is_empty() {
            report.add_info(
                None,
                format!(
                    "palette is empty; using default color {}",
                    palette.default_color()
                ),
            );
        }

        let mut anchors = AnchorGenerator::new(self.options.anchor_prefix.clone());
        let mut entries: Vec<TocEntry> = Vec::new();
        let mut cells: Vec<Value> = Vec::with_capacity(notebook.len() + 1);
        let mut existing_toc: Option<(usize, Cell)> = None;

        for (index, value) in notebook.cells().iter().enumerate() {
            let cell = match Cell::from_value(value) {
                Ok(cell) => cell,
                Err(e) => {
                    report.add_warning(Some(index), format!("{}; left unchanged", e));
                    cells.push(value.clone());
                    continue;
                }
            };

            if !cell.is_markdown() {
                cells.push(value.clone());
                continue;
            }

            if toc::is_toc_source(&cell.source) {
                if existing_toc.is_none() {
                    existing_toc = Some((cells.len(), cell));
                    cells.push(value.clone());
                } else {
                    report.add_warning(
                        Some(index),
                        "dropped duplicate table of contents".to_string(),
                    );
                }
                continue;
            }

            let rewrite = rewrite_markdown_source(
                &cell.source,
                self.options.max_heading_level,
                &mut anchors,
                &palette,
            );
            entries.extend(rewrite.headings.iter().map(TocEntry::from));

            if rewrite.changed(&cell.source) {
                let mut cell = cell;
                cell.source = rewrite.source;
                cells.push(cell.to_value());
            } else {
                cells.push(value.clone());
            }
        }

        if entries.is_empty() {
            report.add_info(
                None,
                "no headings found; table of contents holds a placeholder".to_string(),
            );
        }
        report.headings = entries.len();

        let toc_source = toc::build_toc_source(&entries, &self.options.toc_title);
        match existing_toc {
            Some((position, mut cell)) => {
                cell.source = toc_source;
                cells[position] = cell.to_value();
                report.toc_index = position;
                report.toc_replaced = true;
            }
            None => {
                let id = notebook
                    .uses_cell_ids()
                    .then(|| unique_cell_id(notebook.cells(), TOC_CELL_ID));
                let position = self.options.toc_position.min(cells.len());
                cells.insert(position, Cell::markdown(toc_source, id).to_value());
                report.toc_index = position;
            }
        }

        log::info!(
            "Rewrote {} headings; table of contents at cell {}",
            report.headings,
            report.toc_index
        );

        (notebook.with_cells(cells), report)
    }
}

/// `base`, or `base-1`, `base-2`, ... if another cell already has that id
fn unique_cell_id(cells: &[Value], base: &str) -> String {
    let taken: HashSet<&str> = cells
        .iter()
        .filter_map(|cell| cell.get("id").and_then(Value::as_str))
        .collect();

    if !taken.contains(base) {
        return base.to_string();
    }

    (1..)
        .map(|n| format!("{}-{}", base, n))
        .find(|candidate| !taken.contains(candidate.as_str()))
        .unwrap_or_else(|| base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Severity;
    use serde_json::json;

    fn md(source: &str) -> Value {
        json!({"cell_type": "markdown", "metadata": {}, "source": source})
    }

    fn code(source: &str) -> Value {
        json!({"cell_type": "code", "metadata": {}, "outputs": [], "source": source})
    }

    fn rewriter(colors: &[&str]) -> NotebookRewriter {
        NotebookRewriter::new(RewriteOptions {
            colors: colors.iter().map(|c| c.to_string()).collect(),
            save: false,
            ..RewriteOptions::default()
        })
    }

    fn source_of(value: &Value) -> String {
        Cell::from_value(value).unwrap().source
    }

    #[test]
    fn test_toc_inserted_after_first_cell() {
        let notebook =
            Notebook::from_value(json!({"cells": [md("# A"), code("x = 1"), md("## B")]})).unwrap();
        let (out, report) = rewriter(&["red"]).rewrite_notebook(&notebook);

        assert_eq!(out.len(), 4);
        assert_eq!(report.toc_index, 1);
        assert!(!report.toc_replaced);
        assert!(toc::is_toc_source(&source_of(&out.cells()[1])));
        assert_eq!(out.cells()[2], code("x = 1"));
    }

    #[test]
    fn test_existing_toc_replaced_in_place() {
        let stale = format!("{}\n# Table of Contents\n\n- [Old](#old)", toc::TOC_SENTINEL);
        let notebook = Notebook::from_value(json!({
            "cells": [md("intro"), code("x"), md(&stale), md("# New")]
        }))
        .unwrap();
        let (out, report) = rewriter(&[]).rewrite_notebook(&notebook);

        assert_eq!(out.len(), 4);
        assert!(report.toc_replaced);
        assert_eq!(report.toc_index, 2);
        let toc_text = source_of(&out.cells()[2]);
        assert!(toc_text.contains("- [New](#new)"));
        assert!(!toc_text.contains("Old"));
    }

    #[test]
    fn test_duplicate_toc_cells_are_dropped() {
        let stale = format!("{}\n# Table of Contents", toc::TOC_SENTINEL);
        let notebook =
            Notebook::from_value(json!({"cells": [md(&stale), md("# A"), md(&stale)]})).unwrap();
        let (out, report) = rewriter(&[]).rewrite_notebook(&notebook);

        assert_eq!(out.len(), 2);
        assert_eq!(report.warnings().count(), 1);
    }

    #[test]
    fn test_malformed_cell_is_left_verbatim() {
        let broken = json!({"cell_type": "markdown", "source": 42});
        let notebook =
            Notebook::from_value(json!({"cells": [md("# A"), broken.clone(), md("# B")]})).unwrap();
        let (out, report) = rewriter(&["red"]).rewrite_notebook(&notebook);

        assert_eq!(out.cells()[2], broken);
        assert_eq!(report.headings, 2);
        let warning = report.warnings().next().unwrap();
        assert_eq!(warning.cell, Some(1));
        assert_eq!(warning.severity, Severity::Warning);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let notebook = Notebook::from_value(json!({"cells": [md("# A")]})).unwrap();
        let before = notebook.clone();
        let _ = rewriter(&["red"]).rewrite_notebook(&notebook);

        assert_eq!(notebook, before);
    }

    #[test]
    fn test_empty_notebook_gets_toc_at_start() {
        let notebook = Notebook::from_value(json!({"cells": []})).unwrap();
        let (out, report) = rewriter(&[]).rewrite_notebook(&notebook);

        assert_eq!(out.len(), 1);
        assert_eq!(report.toc_index, 0);
        assert!(source_of(&out.cells()[0]).contains(toc::NO_HEADINGS_PLACEHOLDER));
    }

    #[test]
    fn test_toc_cell_id_only_with_ids() {
        let with_ids = Notebook::from_value(json!({"cells": [
            {"cell_type": "markdown", "id": "table-of-contents", "metadata": {}, "source": "# A"}
        ]}))
        .unwrap();
        let (out, _) = rewriter(&[]).rewrite_notebook(&with_ids);
        assert_eq!(out.cells()[1]["id"], json!("table-of-contents-1"));

        let without = Notebook::from_value(json!({"cells": [md("# A")]})).unwrap();
        let (out, _) = rewriter(&[]).rewrite_notebook(&without);
        assert!(out.cells()[1].get("id").is_none());
    }

    #[test]
    fn test_unchanged_cells_keep_their_value() {
        let plain = json!({"cell_type": "markdown", "metadata": {"x": 1}, "source": ["no\n", "heading"]});
        let notebook = Notebook::from_value(json!({"cells": [plain.clone()]})).unwrap();
        let (out, _) = rewriter(&[]).rewrite_notebook(&notebook);

        assert_eq!(out.cells()[0], plain);
    }
}
