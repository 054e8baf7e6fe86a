//! Rewrite Diagnostics
//!
//! Non-fatal problems collected during a run and returned with the result.

/// Severity of a diagnostic message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Info,
}

/// A note about one cell, or about the notebook as a whole
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Index into the input cell list, if the note is about a cell
    pub cell: Option<usize>,
    pub message: String,
    pub severity: Severity,
}

/// Everything a successful run has to say besides the notebook itself
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RewriteReport {
    pub diagnostics: Vec<Diagnostic>,
    /// Number of headings rewritten
    pub headings: usize,
    /// Position of the table of contents in the output cells
    pub toc_index: usize,
    /// Whether an existing table of contents was replaced
    pub toc_replaced: bool,
}

impl RewriteReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_warning(&mut self, cell: Option<usize>, message: String) {
        log::warn!("{}", format_location(cell, &message));
        self.diagnostics.push(Diagnostic {
            cell,
            message,
            severity: Severity::Warning,
        });
    }

    pub fn add_info(&mut self, cell: Option<usize>, message: String) {
        log::info!("{}", format_location(cell, &message));
        self.diagnostics.push(Diagnostic {
            cell,
            message,
            severity: Severity::Info,
        });
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    /// No warnings were recorded (info notes don't count)
    pub fn is_clean(&self) -> bool {
        self.warnings().next().is_none()
    }
}

fn format_location(cell: Option<usize>, message: &str) -> String {
    match cell {
        Some(index) => format!("cell {}: {}", index, message),
        None => message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_severity() {
        let mut report = RewriteReport::new();
        assert!(report.is_clean());

        report.add_info(None, "palette is empty".to_string());
        assert!(report.is_clean()); // Info notes don't make it dirty

        report.add_warning(Some(3), "cell is not a JSON object".to_string());
        assert!(!report.is_clean());
        assert_eq!(report.warnings().count(), 1);
        assert_eq!(report.diagnostics.len(), 2);
    }

    #[test]
    fn test_format_location() {
        assert_eq!(format_location(Some(2), "bad"), "cell 2: bad");
        assert_eq!(format_location(None, "bad"), "bad");
    }
}
