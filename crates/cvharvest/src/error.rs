//! Error types for cvharvest.
//!
//! Every fallible operation in the library returns [`Result`], backed by
//! [`CvHarvestError`]. The variants follow the pipeline's failure taxonomy:
//!
//! - `Download` - the source file could not be fetched
//! - `UnsupportedFormat` - the file type resolved to nothing we can extract
//! - `NoTextExtracted` - every extraction attempt yielded nothing
//! - `Callback` - the result could not be delivered (logged, never fatal)
//! - everything else - unexpected failures inside the pipeline
//!
//! `Io` errors from `std::io::Error` bubble up unchanged via `?`. Application
//! errors carry a message and, where available, the underlying source.
//!
//! The `Display` output of the first three variants is sent verbatim to the
//! callback endpoint, so their wording is part of the wire contract.
use thiserror::Error;

/// Result type alias using `CvHarvestError`.
pub type Result<T> = std::result::Result<T, CvHarvestError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for all cvharvest operations.
#[derive(Debug, Error)]
pub enum CvHarvestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to download file: {message}")]
    Download {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("No text could be extracted from the file")]
    NoTextExtracted,

    #[error("Parsing error: {message}")]
    Parsing {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Callback failed: {message}")]
    Callback {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("External tool '{tool}' failed: {message}")]
    ExternalTool { tool: String, message: String },

    #[error("Missing dependency: {0}")]
    MissingDependency(String),
}

impl From<serde_json::Error> for CvHarvestError {
    fn from(err: serde_json::Error) -> Self {
        CvHarvestError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

// lopdf errors are flattened to their message; the source is not guaranteed `Sync`.
impl From<lopdf::Error> for CvHarvestError {
    fn from(err: lopdf::Error) -> Self {
        CvHarvestError::parsing(format!("Invalid PDF: {}", err))
    }
}

impl From<zip::result::ZipError> for CvHarvestError {
    fn from(err: zip::result::ZipError) -> Self {
        CvHarvestError::Parsing {
            message: format!("Invalid ZIP container: {}", err),
            source: Some(Box::new(err)),
        }
    }
}

impl From<roxmltree::Error> for CvHarvestError {
    fn from(err: roxmltree::Error) -> Self {
        CvHarvestError::Parsing {
            message: format!("Invalid XML: {}", err),
            source: Some(Box::new(err)),
        }
    }
}

macro_rules! error_constructor {
    ($name:ident, $with_source:ident, $variant:ident) => {
        #[doc = concat!("Create a `", stringify!($variant), "` error")]
        pub fn $name<S: Into<String>>(message: S) -> Self {
            Self::$variant {
                message: message.into(),
                source: None,
            }
        }

        #[doc = concat!("Create a `", stringify!($variant), "` error with source")]
        pub fn $with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
            message: S,
            source: E,
        ) -> Self {
            Self::$variant {
                message: message.into(),
                source: Some(Box::new(source)),
            }
        }
    };
}

impl CvHarvestError {
    error_constructor!(download, download_with_source, Download);
    error_constructor!(parsing, parsing_with_source, Parsing);
    error_constructor!(validation, validation_with_source, Validation);
    error_constructor!(callback, callback_with_source, Callback);

    /// Create an `ExternalTool` error.
    pub fn external_tool<T: Into<String>, S: Into<String>>(tool: T, message: S) -> Self {
        Self::ExternalTool {
            tool: tool.into(),
            message: message.into(),
        }
    }
}
