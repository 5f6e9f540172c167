//! Text extraction for uploaded documents.
//!
//! Every extractor returns a list of content units: pages for PDF, rows for
//! CSV, and a single unit holding the whole text for everything else.

mod office;
mod pdf;
mod tabular;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("File type is not supported")]
    UnsupportedType,

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to extract text: {0}")]
    Extraction(String),
}

pub type Result<T> = std::result::Result<T, DocumentError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Word,
    Spreadsheet,
    Presentation,
    Csv,
    Text,
}

impl DocumentKind {
    /// Resolve the format from the file extension, case-insensitively
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" | "doc" => Some(Self::Word),
            "xlsx" | "xls" => Some(Self::Spreadsheet),
            "pptx" | "ppt" => Some(Self::Presentation),
            "csv" => Some(Self::Csv),
            "txt" => Some(Self::Text),
            _ => None,
        }
    }
}

/// Extract all content units of the file at `path` on the blocking pool
pub async fn extract_units(path: PathBuf) -> Result<Vec<String>> {
    let kind = DocumentKind::from_path(&path).ok_or(DocumentError::UnsupportedType)?;
    debug!("Extracting {:?} document: {}", kind, path.display());

    tokio::task::spawn_blocking(move || extract_units_blocking(kind, &path))
        .await
        .map_err(|e| DocumentError::Extraction(format!("extraction task failed: {}", e)))?
}

/// First content unit of the file, or an empty string for an empty document
pub async fn extract_first_unit(path: PathBuf) -> Result<String> {
    Ok(extract_units(path).await?.into_iter().next().unwrap_or_default())
}

fn extract_units_blocking(kind: DocumentKind, path: &Path) -> Result<Vec<String>> {
    match kind {
        DocumentKind::Pdf => pdf::extract_pages(&std::fs::read(path)?),
        DocumentKind::Word => office::extract_docx(&std::fs::read(path)?).map(|t| vec![t]),
        DocumentKind::Presentation => office::extract_pptx(&std::fs::read(path)?).map(|t| vec![t]),
        DocumentKind::Spreadsheet => tabular::extract_workbook(path).map(|t| vec![t]),
        DocumentKind::Csv => tabular::extract_csv_rows(&std::fs::read(path)?),
        DocumentKind::Text => Ok(vec![String::from_utf8_lossy(&std::fs::read(path)?).into_owned()]),
    }
}
