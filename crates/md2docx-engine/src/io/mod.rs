use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read a markdown document and return its content
pub fn read_document(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// `notes/ch1.md` → `notes/ch1.docx`.
pub fn derive_output_path(input: &Path) -> PathBuf {
    input.with_extension("docx")
}

/// Absolute directory containing `input`, the base for relative image paths.
pub fn document_dir(input: &Path) -> PathBuf {
    let absolute = std::path::absolute(input).unwrap_or_else(|_| input.to_path_buf());
    absolute
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default()
}

/// Joins a path written in the document onto `base_dir` unless it is
/// already absolute.
pub fn resolve_relative(base_dir: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
