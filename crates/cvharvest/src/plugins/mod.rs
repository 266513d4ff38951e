//! Extractor plugin system.
//!
//! Each supported [`Format`](crate::core::format::Format) is served by one
//! [`DocumentExtractor`], looked up through an [`ExtractorRegistry`] owned by
//! the processor. Tests register fakes the same way the defaults are
//! registered.

pub mod extractor;
pub mod registry;
pub mod traits;

pub use extractor::DocumentExtractor;
pub use registry::ExtractorRegistry;
pub use traits::Plugin;
