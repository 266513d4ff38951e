//! Request, result and wire types.

use crate::core::format::Format;
use crate::text::cleaned_length;
use serde::{Deserialize, Serialize};

/// What to fetch and how to read it. Built once per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub url: String,
    pub format: Format,
    /// Lowercase dotted extension (`".pdf"`), empty when none was found.
    pub extension: String,
}

impl ExtractionRequest {
    pub fn new(url: impl Into<String>, format: Format, extension: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            format,
            extension: extension.into(),
        }
    }

    /// Extension as shown in error messages.
    pub fn display_extension(&self) -> &str {
        if self.extension.is_empty() {
            "unknown"
        } else {
            &self.extension
        }
    }
}

/// Final outcome of one request.
///
/// Only [`ExtractionResult::success`] and [`ExtractionResult::failure`]
/// construct results, so a successful result always carries non-empty text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    success: bool,
    text: String,
    format: Format,
    extension: String,
    text_length: usize,
    error: Option<String>,
}

impl ExtractionResult {
    /// Successful result for already-cleaned text. Returns `None` for empty text.
    pub fn success(text: String, request: &ExtractionRequest) -> Option<Self> {
        if text.is_empty() {
            return None;
        }
        Some(Self {
            success: true,
            text_length: cleaned_length(&text),
            text,
            format: request.format,
            extension: request.extension.clone(),
            error: None,
        })
    }

    pub fn failure(error: impl Into<String>, format: Format) -> Self {
        Self {
            success: false,
            text: String::new(),
            format,
            extension: String::new(),
            text_length: 0,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn text_length(&self) -> usize {
        self.text_length
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Wire body for the callback endpoint.
    pub fn to_payload(&self, application_id: &str, processing_info: ProcessingInfo) -> CallbackPayload {
        if self.success {
            CallbackPayload {
                success: true,
                application_id: application_id.to_string(),
                extracted_text: Some(self.text.clone()),
                file_type: Some(self.extension.clone()),
                text_length: Some(self.text_length),
                error: None,
                processing_info,
            }
        } else {
            CallbackPayload {
                success: false,
                application_id: application_id.to_string(),
                extracted_text: None,
                file_type: None,
                text_length: None,
                error: self.error.clone(),
                processing_info,
            }
        }
    }
}

/// JSON body POSTed to the callback URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackPayload {
    pub success: bool,
    pub application_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub processing_info: ProcessingInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingInfo {
    pub method: String,
    pub timestamp: String,
}
