//! Base plugin trait definition.

/// Identity shared by all plugins.
pub trait Plugin: Send + Sync {
    /// Unique kebab-case identifier (e.g. `"pdf-extractor"`).
    fn name(&self) -> &str;
}
