//! Legacy Word (.doc) extractor backed by `antiword`.

use crate::Result;
use crate::core::config::ProcessorConfig;
use crate::core::format::Format;
use crate::extraction::tools::{ExternalTool, ToolRunner};
use crate::plugins::{DocumentExtractor, Plugin};
use crate::text::clean_text;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Runs `antiword <file>` and cleans its stdout. A missing tool, non-zero
/// exit or timeout yields empty text.
pub struct DocExtractor {
    configured_path: Option<PathBuf>,
    runner: Arc<dyn ToolRunner>,
    timeout: Duration,
}

impl DocExtractor {
    pub fn new(config: &ProcessorConfig, runner: Arc<dyn ToolRunner>) -> Self {
        Self {
            configured_path: config.antiword_path.clone(),
            runner,
            timeout: config.tool_timeout(),
        }
    }

    async fn run_antiword(&self, path: &Path) -> Result<String> {
        let program = ExternalTool::Antiword.locate(self.configured_path.as_deref())?;
        let output = self
            .runner
            .run(&program, &[path.as_os_str().to_os_string()], self.timeout)
            .await?;
        Ok(output.stdout)
    }
}

impl Plugin for DocExtractor {
    fn name(&self) -> &str {
        "doc-extractor"
    }
}

#[async_trait]
impl DocumentExtractor for DocExtractor {
    fn format(&self) -> Format {
        Format::Doc
    }

    async fn extract_file(&self, path: &Path) -> Result<String> {
        match self.run_antiword(path).await {
            Ok(raw) => Ok(clean_text(&raw)),
            Err(e) => {
                tracing::warn!("DOC extraction failed: {}", e);
                Ok(String::new())
            }
        }
    }
}
