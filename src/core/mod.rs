//! Core Types
//!
//! Error kinds and the per-run diagnostic report shared by the pipeline.

pub mod diagnostics;
pub mod error;

pub use diagnostics::{Diagnostic, RewriteReport, Severity};
pub use error::{CellError, RewriteError};
