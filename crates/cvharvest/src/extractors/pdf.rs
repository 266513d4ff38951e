//! PDF extractor: an ordered chain of text backends.
//!
//! Backends are tried in order; the first one whose cleaned output is
//! non-empty wins and the rest are never invoked. A backend that fails or
//! yields only noise is logged and skipped. Text from a failed backend is
//! never carried forward.

use crate::{CvHarvestError, Result};
use crate::core::config::ProcessorConfig;
use crate::core::format::Format;
use crate::extraction::pdf::{extract_layout_text, extract_page_text};
use crate::extraction::tools::{ExternalTool, ToolRunner};
use crate::plugins::{DocumentExtractor, Plugin};
use crate::text::{clean_text, cleaned_length};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// One way of turning a PDF file into raw text.
#[async_trait]
pub trait TextBackend: Send + Sync {
    fn name(&self) -> &str;

    async fn extract(&self, path: &Path) -> Result<String>;
}

async fn run_blocking<F>(path: &Path, task: F) -> Result<String>
where
    F: FnOnce(&Path) -> Result<String> + Send + 'static,
{
    let path = path.to_path_buf();
    let span = tracing::Span::current();
    tokio::task::spawn_blocking(move || {
        let _guard = span.entered();
        task(&path)
    })
    .await
    .map_err(|e| CvHarvestError::parsing(format!("PDF extraction task failed: {}", e)))?
}

/// Layout-aware extraction with `pdf_oxide`.
pub struct LayoutTextBackend;

#[async_trait]
impl TextBackend for LayoutTextBackend {
    fn name(&self) -> &str {
        "pdf_oxide"
    }

    async fn extract(&self, path: &Path) -> Result<String> {
        run_blocking(path, extract_layout_text).await
    }
}

/// Per-page content-stream extraction with `lopdf`.
pub struct PageTextBackend;

#[async_trait]
impl TextBackend for PageTextBackend {
    fn name(&self) -> &str {
        "lopdf"
    }

    async fn extract(&self, path: &Path) -> Result<String> {
        run_blocking(path, extract_page_text).await
    }
}

/// `pdftotext -layout <file> -` from poppler-utils.
pub struct CommandLineTextBackend {
    configured_path: Option<PathBuf>,
    runner: Arc<dyn ToolRunner>,
    timeout: Duration,
}

impl CommandLineTextBackend {
    pub fn new(configured_path: Option<PathBuf>, runner: Arc<dyn ToolRunner>, timeout: Duration) -> Self {
        Self {
            configured_path,
            runner,
            timeout,
        }
    }
}

#[async_trait]
impl TextBackend for CommandLineTextBackend {
    fn name(&self) -> &str {
        "pdftotext"
    }

    async fn extract(&self, path: &Path) -> Result<String> {
        let program = ExternalTool::PdfToText.locate(self.configured_path.as_deref())?;
        let args = vec![
            OsString::from("-layout"),
            path.as_os_str().to_os_string(),
            OsString::from("-"),
        ];
        let output = self.runner.run(&program, &args, self.timeout).await?;
        Ok(output.stdout)
    }
}

pub struct PdfExtractor {
    backends: Vec<Box<dyn TextBackend>>,
}

impl PdfExtractor {
    pub fn new(backends: Vec<Box<dyn TextBackend>>) -> Self {
        Self { backends }
    }

    /// `pdf_oxide`, then `lopdf`, then `pdftotext`.
    pub fn with_default_backends(config: &ProcessorConfig, runner: Arc<dyn ToolRunner>) -> Self {
        Self::new(vec![
            Box::new(LayoutTextBackend),
            Box::new(PageTextBackend),
            Box::new(CommandLineTextBackend::new(
                config.pdftotext_path.clone(),
                runner,
                config.tool_timeout(),
            )),
        ])
    }
}

impl Plugin for PdfExtractor {
    fn name(&self) -> &str {
        "pdf-extractor"
    }
}

#[async_trait]
impl DocumentExtractor for PdfExtractor {
    fn format(&self) -> Format {
        Format::Pdf
    }

    async fn extract_file(&self, path: &Path) -> Result<String> {
        for backend in &self.backends {
            match backend.extract(path).await {
                Ok(raw) => {
                    let cleaned = clean_text(&raw);
                    if !cleaned.is_empty() {
                        tracing::debug!(
                            "PDF backend {} extracted {} characters",
                            backend.name(),
                            cleaned_length(&cleaned)
                        );
                        return Ok(cleaned);
                    }
                    tracing::debug!("PDF backend {} yielded no text", backend.name());
                }
                Err(e) => {
                    tracing::warn!("PDF backend {} failed: {}", backend.name(), e);
                }
            }
        }

        Ok(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::pdf::test_support::build_pdf;
    use crate::extraction::tools::ToolOutput;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Outcome {
        Text(&'static str),
        Fail,
    }

    struct FakeBackend {
        name: &'static str,
        outcome: Outcome,
        calls: Arc<AtomicUsize>,
    }

    impl FakeBackend {
        fn boxed(name: &'static str, outcome: Outcome, calls: &Arc<AtomicUsize>) -> Box<dyn TextBackend> {
            Box::new(Self {
                name,
                outcome,
                calls: Arc::clone(calls),
            })
        }
    }

    #[async_trait]
    impl TextBackend for FakeBackend {
        fn name(&self) -> &str {
            self.name
        }

        async fn extract(&self, _path: &Path) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.outcome {
                Outcome::Text(text) => Ok(text.to_string()),
                Outcome::Fail => Err(CvHarvestError::parsing("broken xref table")),
            }
        }
    }

    #[derive(Default)]
    struct RecordingRunner {
        invocations: Mutex<Vec<(PathBuf, Vec<OsString>)>>,
    }

    #[async_trait]
    impl ToolRunner for RecordingRunner {
        async fn run(&self, program: &Path, args: &[OsString], _timeout: Duration) -> Result<ToolOutput> {
            self.invocations
                .lock()
                .unwrap()
                .push((program.to_path_buf(), args.to_vec()));
            Ok(ToolOutput {
                stdout: "  Jane   Doe \n".to_string(),
                stderr: String::new(),
            })
        }
    }

    #[tokio::test]
    async fn test_first_failure_falls_through_to_second() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let third = Arc::new(AtomicUsize::new(0));
        let extractor = PdfExtractor::new(vec![
            FakeBackend::boxed("first", Outcome::Fail, &first),
            FakeBackend::boxed("second", Outcome::Text("  Jane\n\nDoe  "), &second),
            FakeBackend::boxed("third", Outcome::Text("never"), &third),
        ]);

        let text = extractor.extract_file(Path::new("cv.pdf")).await.unwrap();

        assert_eq!(text, "Jane Doe");
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);
        assert_eq!(third.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_noise_only_output_counts_as_empty() {
        let calls = Arc::new(AtomicUsize::new(0));
        let extractor = PdfExtractor::new(vec![
            FakeBackend::boxed("noise", Outcome::Text("\u{2022}\u{2022} ** ##"), &calls),
            FakeBackend::boxed("real", Outcome::Text("Experience"), &calls),
        ]);

        let text = extractor.extract_file(Path::new("cv.pdf")).await.unwrap();
        assert_eq!(text, "Experience");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_all_backends_empty_yields_empty_text() {
        let calls = Arc::new(AtomicUsize::new(0));
        let extractor = PdfExtractor::new(vec![
            FakeBackend::boxed("a", Outcome::Fail, &calls),
            FakeBackend::boxed("b", Outcome::Text("   "), &calls),
            FakeBackend::boxed("c", Outcome::Fail, &calls),
        ]);

        let text = extractor.extract_file(Path::new("cv.pdf")).await.unwrap();
        assert_eq!(text, "");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_default_backend_order() {
        let extractor =
            PdfExtractor::with_default_backends(&ProcessorConfig::default(), Arc::new(RecordingRunner::default()));
        let names: Vec<&str> = extractor.backends.iter().map(|backend| backend.name()).collect();
        assert_eq!(names, vec!["pdf_oxide", "lopdf", "pdftotext"]);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_line_backend_arguments() {
        let runner = Arc::new(RecordingRunner::default());
        let backend = CommandLineTextBackend::new(
            Some(PathBuf::from("/bin/sh")),
            runner.clone(),
            Duration::from_secs(3),
        );

        let raw = backend.extract(Path::new("/tmp/cvharvest-x.pdf")).await.unwrap();
        assert_eq!(raw, "  Jane   Doe \n");

        let invocations = runner.invocations.lock().unwrap();
        assert_eq!(invocations.len(), 1);
        assert_eq!(invocations[0].0, PathBuf::from("/bin/sh"));
        assert_eq!(
            invocations[0].1,
            vec![
                OsString::from("-layout"),
                OsString::from("/tmp/cvharvest-x.pdf"),
                OsString::from("-")
            ]
        );
    }

    #[tokio::test]
    async fn test_command_line_backend_missing_tool() {
        let backend = CommandLineTextBackend::new(
            Some(PathBuf::from("/nonexistent/pdftotext")),
            Arc::new(RecordingRunner::default()),
            Duration::from_secs(3),
        );
        let err = backend.extract(Path::new("cv.pdf")).await.unwrap_err();
        assert!(matches!(err, CvHarvestError::MissingDependency(_)));
    }

    #[tokio::test]
    async fn test_page_backend_on_generated_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.pdf");
        std::fs::write(&path, build_pdf("Hello World!")).unwrap();

        let raw = PageTextBackend.extract(&path).await.unwrap();
        assert!(raw.contains("Hello"));
    }
}
