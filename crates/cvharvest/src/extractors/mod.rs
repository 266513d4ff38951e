//! Built-in document extractors, one per supported format.

pub mod doc;
pub mod docx;
pub mod pdf;

pub use doc::DocExtractor;
pub use docx::DocxExtractor;
pub use pdf::{CommandLineTextBackend, LayoutTextBackend, PageTextBackend, PdfExtractor, TextBackend};
