//! cvharvest - resume/CV text harvesting.
//!
//! Downloads one document, extracts its plain text with format-specific
//! fallbacks, cleans it and reports the outcome to a callback endpoint.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cvharvest::{Processor, ProcessorConfig};
//!
//! # async fn run() -> cvharvest::Result<()> {
//! let processor = Processor::new(ProcessorConfig::default())?;
//! let outcome = processor
//!     .process(
//!         "https://files.example.com/cv/jane-doe.pdf",
//!         "app-42",
//!         "https://ats.example.com/hooks/cv",
//!         "token",
//!     )
//!     .await;
//! println!("success: {}", outcome.is_success());
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`core`] - configuration, format resolution, scratch files, the [`Processor`]
//! - [`extractors`] - one [`plugins::DocumentExtractor`] per format
//! - [`extraction`] - low-level PDF, DOCX and external-tool routines
//! - [`http`] - download, callback and timestamp collaborators
//! - [`text`] - the text cleaner

#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod extraction;
pub mod extractors;
pub mod http;
pub mod plugins;
pub mod text;
pub mod types;

pub use error::{CvHarvestError, Result};

pub use core::config::ProcessorConfig;
pub use core::format::Format;
pub use core::processor::{ProcessingOutcome, ProcessingStage, Processor};

pub use plugins::{DocumentExtractor, ExtractorRegistry, Plugin};

pub use text::clean_text;

pub use types::{CallbackPayload, ExtractionRequest, ExtractionResult, ProcessingInfo};
