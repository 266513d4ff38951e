//! Core pipeline: configuration, format resolution, scratch storage and the
//! processor tying them together.

pub mod config;
pub mod format;
pub mod io;
pub mod processor;

pub use config::ProcessorConfig;
pub use format::{Format, extension_from_url, probe_content_type, resolve_request};
pub use io::ScratchFile;
pub use processor::{ProcessingOutcome, ProcessingStage, Processor};
