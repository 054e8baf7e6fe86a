//! Reading and writing notebook files.

use std::fs;
use std::path::{Path, PathBuf};

use super::Notebook;
use crate::core::RewriteError;

/// Load a notebook from disk
pub fn load_notebook(path: &Path) -> Result<Notebook, RewriteError> {
    if !path.is_file() {
        return Err(RewriteError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let text = fs::read_to_string(path).map_err(|source| RewriteError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("Read {} bytes from {}", text.len(), path.display());
    Notebook::from_json(&text)
}

/// `analysis.ipynb` + `chulo` -> `analysis-chulo.ipynb`
pub fn derive_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let name = match input.extension() {
        Some(ext) => format!("{}-{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}-{}", stem, suffix),
    };

    input.with_file_name(name)
}

/// Write a notebook, refusing to touch `input`
///
/// The whole document is serialized before the file is opened, so a
/// serialization failure leaves nothing behind.
pub fn save_notebook(notebook: &Notebook, output: &Path, input: &Path) -> Result<(), RewriteError> {
    if same_file(output, input) {
        return Err(RewriteError::OutputWouldOverwrite {
            path: output.to_path_buf(),
        });
    }

    let text = notebook.to_json_pretty()?;
    fs::write(output, text).map_err(|source| RewriteError::Io {
        path: output.to_path_buf(),
        source,
    })?;

    log::debug!("Wrote {}", output.display());
    Ok(())
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_output_path() {
        assert_eq!(
            derive_output_path(Path::new("/tmp/analysis.ipynb"), "chulo"),
            PathBuf::from("/tmp/analysis-chulo.ipynb")
        );
        assert_eq!(
            derive_output_path(Path::new("notes"), "toc"),
            PathBuf::from("notes-toc")
        );
        assert_eq!(
            derive_output_path(Path::new("my.data.ipynb"), "chulo"),
            PathBuf::from("my.data-chulo.ipynb")
        );
    }

    #[test]
    fn test_missing_input() {
        let err = load_notebook(Path::new("/definitely/not/here.ipynb")).unwrap_err();
        assert!(matches!(err, RewriteError::InputNotFound { .. }));
    }

    #[test]
    fn test_refuses_to_overwrite_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.ipynb");
        fs::write(&input, r#"{"cells": []}"#).unwrap();

        let notebook = load_notebook(&input).unwrap();
        let err = save_notebook(&notebook, &input, &input).unwrap_err();

        assert!(matches!(err, RewriteError::OutputWouldOverwrite { .. }));
        assert_eq!(fs::read_to_string(&input).unwrap(), r#"{"cells": []}"#);
    }
}
