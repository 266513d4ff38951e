//! Extractor registration and lookup by format.

use crate::core::config::ProcessorConfig;
use crate::core::format::Format;
use crate::extraction::tools::{SystemToolRunner, ToolRunner};
use crate::extractors::{DocExtractor, DocxExtractor, PdfExtractor};
use crate::plugins::DocumentExtractor;
use crate::{CvHarvestError, Result};
use std::collections::HashMap;
use std::sync::Arc;

fn validate_plugin_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(CvHarvestError::validation("Plugin name cannot be empty"));
    }

    if name.contains(char::is_whitespace) {
        return Err(CvHarvestError::validation(format!(
            "Plugin name '{}' cannot contain whitespace",
            name
        )));
    }

    Ok(())
}

/// One extractor per format; registering a second one for the same format
/// replaces the first.
pub struct ExtractorRegistry {
    extractors: HashMap<Format, Arc<dyn DocumentExtractor>>,
}

impl ExtractorRegistry {
    pub fn new_empty() -> Self {
        Self {
            extractors: HashMap::new(),
        }
    }

    /// Registry with the PDF, DOCX and DOC extractors, using real child
    /// processes for external tools.
    pub fn with_defaults(config: &ProcessorConfig) -> Result<Self> {
        Self::with_tool_runner(config, Arc::new(SystemToolRunner))
    }

    pub fn with_tool_runner(config: &ProcessorConfig, runner: Arc<dyn ToolRunner>) -> Result<Self> {
        let mut registry = Self::new_empty();
        registry.register(Arc::new(PdfExtractor::with_default_backends(config, Arc::clone(&runner))))?;
        registry.register(Arc::new(DocxExtractor::new()))?;
        registry.register(Arc::new(DocExtractor::new(config, runner)))?;
        Ok(registry)
    }

    pub fn register(&mut self, extractor: Arc<dyn DocumentExtractor>) -> Result<()> {
        let format = extractor.format();
        if !format.is_supported() {
            return Err(CvHarvestError::validation(format!(
                "Extractor '{}' cannot be registered for format '{}'",
                extractor.name(),
                format
            )));
        }

        validate_plugin_name(extractor.name())?;

        if let Some(previous) = self.extractors.insert(format, extractor) {
            tracing::debug!("Replacing extractor '{}' for {}", previous.name(), format);
        }

        Ok(())
    }

    pub fn get(&self, format: Format) -> Result<Arc<dyn DocumentExtractor>> {
        self.extractors
            .get(&format)
            .cloned()
            .ok_or_else(|| CvHarvestError::UnsupportedFormat(format.to_string()))
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new_empty()
    }
}
