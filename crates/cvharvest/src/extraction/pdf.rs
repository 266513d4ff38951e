//! In-process PDF text extraction.
//!
//! Two independent parsers: `pdf_oxide` (layout-aware reading order) and
//! `lopdf` (raw content-stream text). Both are synchronous and CPU bound;
//! async callers run them on the blocking pool. Pages that yield text are
//! each followed by `\n`, empty pages are skipped.

use crate::{CvHarvestError, Result};
use lopdf::Document;
use pdf_oxide::PdfDocument;
use std::path::Path;

fn push_page(text: &mut String, page_text: &str) {
    if !page_text.is_empty() {
        text.push_str(page_text);
        text.push('\n');
    }
}

/// Extract text with `pdf_oxide`.
pub fn extract_layout_text(path: &Path) -> Result<String> {
    let doc =
        PdfDocument::open(path).map_err(|e| CvHarvestError::parsing(format!("Invalid PDF: {}", e)))?;
    let page_count = doc
        .page_count()
        .map_err(|e| CvHarvestError::parsing(format!("Failed to read page tree: {}", e)))?;

    let mut text = String::new();
    for page_index in 0..page_count {
        let page_text = doc
            .extract_text(page_index)
            .map_err(|e| CvHarvestError::parsing(format!("Failed to extract page {}: {}", page_index + 1, e)))?;
        push_page(&mut text, &page_text);
    }
    Ok(text)
}

/// Extract text with `lopdf`, page by page.
pub fn extract_page_text(path: &Path) -> Result<String> {
    let doc = Document::load(path)?;

    let mut text = String::new();
    for page_number in doc.get_pages().into_keys() {
        let page_text = doc.extract_text(&[page_number])?;
        push_page(&mut text, &page_text);
    }
    Ok(text)
}
