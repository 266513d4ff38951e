//! DOCX extractor.
//!
//! Supports: Microsoft Word (.docx)

use crate::Result;
use crate::core::format::Format;
use crate::extraction::docx::extract_text_from_path;
use crate::plugins::{DocumentExtractor, Plugin};
use crate::text::clean_text;
use async_trait::async_trait;
use std::path::Path;

/// Reads body paragraphs and top-level tables. A malformed container yields
/// empty text rather than an error.
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for DocxExtractor {
    fn name(&self) -> &str {
        "docx-extractor"
    }
}

#[async_trait]
impl DocumentExtractor for DocxExtractor {
    fn format(&self) -> Format {
        Format::Docx
    }

    async fn extract_file(&self, path: &Path) -> Result<String> {
        let owned_path = path.to_path_buf();
        let span = tracing::Span::current();
        let extracted = tokio::task::spawn_blocking(move || {
            let _guard = span.entered();
            extract_text_from_path(&owned_path)
        })
        .await;

        match extracted {
            Ok(Ok(raw)) => Ok(clean_text(&raw)),
            Ok(Err(e)) => {
                tracing::warn!("DOCX extraction failed for {}: {}", path.display(), e);
                Ok(String::new())
            }
            Err(e) => {
                tracing::warn!("DOCX extraction task failed: {}", e);
                Ok(String::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::docx::test_support::{build_docx, paragraph, table};
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_docx_paragraphs_before_tables() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cv.docx");
        let body = format!(
            "{}{}{}",
            paragraph("Name: Jane Doe"),
            table(&[&["Skills:", "C, networking"]]),
            paragraph("Email j@x.com")
        );
        std::fs::write(&path, build_docx(&body)).unwrap();

        let text = DocxExtractor::new().extract_file(&path).await.unwrap();
        assert_eq!(text, "Name: Jane Doe Email jx.com Skills: C, networking");
    }

    #[tokio::test]
    async fn test_corrupt_docx_yields_empty_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cv.docx");
        std::fs::write(&path, b"PK\x03\x04 truncated").unwrap();

        let text = DocxExtractor::new().extract_file(&path).await.unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_missing_file_yields_empty_text() {
        let text = DocxExtractor::new()
            .extract_file(Path::new("/nonexistent/cv.docx"))
            .await
            .unwrap();
        assert_eq!(text, "");
    }
}
