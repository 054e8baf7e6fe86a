//! Typed view over a single notebook cell.
//!
//! Only `cell_type` and `source` are interpreted; every other field
//! (metadata, id, outputs, attachments, ...) is carried through untouched and
//! in its original order.

use serde_json::{Map, Value};

use crate::core::CellError;

/// The `cell_type` of a cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellKind {
    Markdown,
    Code,
    Raw,
    Other(String),
}

impl CellKind {
    fn from_name(name: &str) -> Self {
        match name {
            "markdown" => CellKind::Markdown,
            "code" => CellKind::Code,
            "raw" => CellKind::Raw,
            other => CellKind::Other(other.to_string()),
        }
    }
}

/// How `source` was stored; nbformat allows both
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStyle {
    /// A single string
    Text,
    /// A list of strings, one per line, each ending in "\n" except the last
    Lines,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub kind: CellKind,
    /// The joined source text
    pub source: String,
    pub style: SourceStyle,
    fields: Map<String, Value>,
}

impl Cell {
    /// Read a cell out of its JSON value
    pub fn from_value(value: &Value) -> Result<Self, CellError> {
        let fields = value.as_object().ok_or(CellError::NotAnObject)?;

        let kind = fields
            .get("cell_type")
            .and_then(Value::as_str)
            .map(CellKind::from_name)
            .ok_or(CellError::MissingCellType)?;

        let (source, style) = match fields.get("source") {
            Some(Value::String(text)) => (text.clone(), SourceStyle::Text),
            Some(Value::Array(parts)) => {
                let mut joined = String::new();
                for part in parts {
                    joined.push_str(part.as_str().ok_or(CellError::InvalidSource)?);
                }
                (joined, SourceStyle::Lines)
            }
            _ => return Err(CellError::InvalidSource),
        };

        Ok(Self {
            kind,
            source,
            style,
            fields: fields.clone(),
        })
    }

    /// A fresh markdown cell in nbformat's key order
    pub fn markdown(source: String, id: Option<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("cell_type".to_string(), Value::from("markdown"));
        if let Some(id) = id {
            fields.insert("id".to_string(), Value::from(id));
        }
        fields.insert("metadata".to_string(), Value::Object(Map::new()));
        fields.insert("source".to_string(), Value::Array(Vec::new()));

        Self {
            kind: CellKind::Markdown,
            source,
            style: SourceStyle::Lines,
            fields,
        }
    }

    pub fn is_markdown(&self) -> bool {
        self.kind == CellKind::Markdown
    }

    /// Back to JSON, writing `source` in the style it was read in
    pub fn to_value(&self) -> Value {
        let mut fields = self.fields.clone();
        let source = match self.style {
            SourceStyle::Text => Value::String(self.source.clone()),
            SourceStyle::Lines => Value::Array(
                self.source
                    .split_inclusive('\n')
                    .map(|line| Value::String(line.to_string()))
                    .collect(),
            ),
        };
        fields.insert("source".to_string(), source);
        Value::Object(fields)
    }
}
