//! Document extractor plugin trait.

use crate::Result;
use crate::core::format::Format;
use crate::plugins::Plugin;
use async_trait::async_trait;
use std::path::Path;

/// Turns a local file of one [`Format`] into cleaned text.
///
/// Implementations never fail for "nothing usable in this document": they
/// return an empty string, which the caller reports as
/// [`CvHarvestError::NoTextExtracted`](crate::CvHarvestError::NoTextExtracted).
/// Errors are reserved for failures of the extractor itself.
#[async_trait]
pub trait DocumentExtractor: Plugin {
    /// The format this extractor is registered for.
    fn format(&self) -> Format;

    async fn extract_file(&self, path: &Path) -> Result<String>;
}
