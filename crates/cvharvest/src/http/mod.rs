//! Network collaborators: source download, callback delivery and the
//! timestamp service.
//!
//! Every call is a single attempt with its own timeout. Callers decide what a
//! failure means; nothing here retries.

pub mod callback;
pub mod clock;
pub mod download;

pub use callback::send_callback;
pub use clock::{current_timestamp, local_timestamp};
pub use download::download_to_file;

use crate::{CvHarvestError, ProcessorConfig, Result};
use reqwest::Client;

/// Build the HTTP client shared by all requests of one run.
///
/// Timeouts are set per request, so the client itself has none.
pub fn build_client(config: &ProcessorConfig) -> Result<Client> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| CvHarvestError::validation_with_source(format!("Failed to build HTTP client: {}", e), e))
}

/// Short description of a transport error for logs and error messages.
pub(crate) fn describe_request_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {}", err)
    } else if err.is_connect() {
        format!("connection failed: {}", err)
    } else if let Some(status) = err.status() {
        format!("HTTP status {}", status)
    } else {
        err.to_string()
    }
}
