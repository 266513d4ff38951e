//! Low-level extraction routines.
//!
//! Functions here know a file format (or an external tool) and nothing about
//! the pipeline. The plugin implementations in [`crate::extractors`] compose
//! them into fallback chains.

pub mod docx;
pub mod pdf;
pub mod tools;

pub use tools::{ExternalTool, SystemToolRunner, ToolOutput, ToolRunner};
