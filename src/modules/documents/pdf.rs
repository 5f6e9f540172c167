use lopdf::Document;
use tracing::warn;

use super::{DocumentError, Result};

/// One unit per page, in page order
pub fn extract_pages(bytes: &[u8]) -> Result<Vec<String>> {
    let document = Document::load_mem(bytes)
        .map_err(|e| DocumentError::Extraction(format!("invalid PDF: {}", e)))?;

    let mut pages = Vec::new();
    for page_number in document.get_pages().into_keys() {
        match document.extract_text(&[page_number]) {
            Ok(text) => pages.push(text),
            Err(e) => {
                // Pages with unsupported encodings still count as units
                warn!("Failed to extract text from PDF page {}: {}", page_number, e);
                pages.push(String::new());
            }
        }
    }

    Ok(pages)
}
