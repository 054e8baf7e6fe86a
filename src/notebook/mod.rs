//! Notebook Document Model
//!
//! A notebook is kept close to its JSON: the top-level object is preserved
//! key for key, and cells stay raw `serde_json::Value`s until someone asks
//! for a typed [`Cell`] view. Cells that fail to parse can therefore be
//! written back exactly as they were read.

pub mod cell;
pub mod io;

pub use cell::{Cell, CellKind, SourceStyle};
pub use io::{derive_output_path, load_notebook, save_notebook};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use crate::core::RewriteError;

#[derive(Debug, Clone, PartialEq)]
pub struct Notebook {
    /// Top-level fields; `cells` keeps its slot but its content lives below
    root: Map<String, Value>,
    cells: Vec<Value>,
}

impl Notebook {
    /// Parse notebook JSON
    pub fn from_json(text: &str) -> Result<Self, RewriteError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| RewriteError::malformed(format!("invalid JSON: {}", e)))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, RewriteError> {
        let Value::Object(mut root) = value else {
            return Err(RewriteError::malformed("top level is not a JSON object"));
        };

        let cells = match root.get_mut("cells") {
            Some(Value::Array(cells)) => std::mem::take(cells),
            Some(_) => return Err(RewriteError::malformed("'cells' is not an array")),
            None => return Err(RewriteError::malformed("missing 'cells' array")),
        };

        Ok(Self { root, cells })
    }

    /// Raw cells in document order
    pub fn cells(&self) -> &[Value] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The same notebook with a different cell list
    pub fn with_cells(&self, cells: Vec<Value>) -> Self {
        Self {
            root: self.root.clone(),
            cells,
        }
    }

    /// Whether cells carry `id` fields (nbformat 4.5 and later)
    pub fn uses_cell_ids(&self) -> bool {
        self.cells
            .iter()
            .any(|cell| cell.get("id").is_some_and(Value::is_string))
    }

    pub fn to_value(&self) -> Value {
        let mut root = self.root.clone();
        root.insert("cells".to_string(), Value::Array(self.cells.clone()));
        Value::Object(root)
    }

    /// Serialize the way Jupyter does: one-space indent, trailing newline
    pub fn to_json_pretty(&self) -> Result<String, RewriteError> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b" ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.to_value().serialize(&mut ser)?;
        buf.push(b'\n');

        String::from_utf8(buf).map_err(|e| RewriteError::malformed(e.to_string()))
    }
}
