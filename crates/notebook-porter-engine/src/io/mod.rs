use crate::models::Document;
use crate::parsing::{ParseError, parse_document};
use crate::tabular::{TableOptions, TabularError, convert_source};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why one file of a batch was not imported
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error(transparent)]
    Io(#[from] IoError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Tabular(#[from] TabularError),
}

#[derive(Debug)]
pub struct ImportFailure {
    pub file: PathBuf,
    pub error: ImportError,
}

/// Outcome of importing several files: each file succeeds or fails alone.
#[derive(Debug, Default)]
pub struct BatchImport {
    pub documents: Vec<Document>,
    pub failures: Vec<ImportFailure>,
}

impl BatchImport {
    /// The batch is worth committing once a single file made it through
    pub fn any_succeeded(&self) -> bool {
        !self.documents.is_empty()
    }
}

/// Name used when a file or document has none
pub const UNTITLED_NAME: &str = "Untitled";

/// Read a file and return its content
pub fn read_file(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Write content to a file
pub fn write_file(path: &Path, content: &str) -> Result<(), IoError> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(path, content).map_err(IoError::Io)
}

/// Document name for an imported file: its file name minus the last extension
pub fn document_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| UNTITLED_NAME.to_string())
}

/// File name for an export: the requested name, or `fallback` when none was
/// given, plus `extension`. A blank fallback becomes [`UNTITLED_NAME`].
pub fn export_file_name(requested: Option<&str>, fallback: &str, extension: &str) -> String {
    let name = [requested.unwrap_or_default(), fallback]
        .into_iter()
        .map(str::trim)
        .find(|name| !name.is_empty())
        .unwrap_or(UNTITLED_NAME);
    format!("{name}.{extension}")
}

/// Default name for a workspace export, unique per millisecond
pub fn workspace_export_fallback() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default();
    format!("workspace_{millis}")
}

/// Decode each file as fenced notebook text, one document per file
pub fn import_markdown_files<P: AsRef<Path>>(paths: &[P]) -> BatchImport {
    import_each(paths, |path| {
        let content = read_file(path)?;
        Ok(parse_document(&content, Some(&document_name(path)))?)
    })
}

/// Convert each file to a declaration held in a one-code-block document
pub fn import_tabular_files<P: AsRef<Path>>(paths: &[P], options: &TableOptions) -> BatchImport {
    import_each(paths, |path| {
        let content = read_file(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let declaration = convert_source(&file_name, &content, options)?;
        Ok(Document::single_code(document_name(path), declaration))
    })
}

fn import_each<P, F>(paths: &[P], mut convert: F) -> BatchImport
where
    P: AsRef<Path>,
    F: FnMut(&Path) -> Result<Document, ImportError>,
{
    let mut batch = BatchImport::default();
    for path in paths {
        let path: &Path = path.as_ref();
        match convert(path) {
            Ok(document) => {
                log::info!(
                    "Imported {} ({} blocks)",
                    path.display(),
                    document.len()
                );
                batch.documents.push(document);
            }
            Err(error) => {
                log::warn!("Failed to import {}: {error}", path.display());
                batch.failures.push(ImportFailure {
                    file: path.to_path_buf(),
                    error,
                });
            }
        }
    }
    batch
}
