//! Timestamp for `processing_info`.
//!
//! The configured time service is asked first; when it is unset, unreachable,
//! slow or returns something unexpected, the local UTC clock is used instead.
//! A timestamp is always produced.

use super::describe_request_error;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct TimeServiceResponse {
    utc_datetime: String,
}

/// Local UTC time in the time service's format (`2026-10-19T08:00:00.123456+00:00`).
pub fn local_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.6f+00:00").to_string()
}

async fn fetch_remote_timestamp(client: &Client, url: &str, timeout: Duration) -> Result<String, String> {
    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| describe_request_error(&e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(format!("HTTP status {}", status));
    }

    let body: TimeServiceResponse = response.json().await.map_err(|e| format!("invalid response: {}", e))?;
    if body.utc_datetime.trim().is_empty() {
        return Err("empty utc_datetime".to_string());
    }
    Ok(body.utc_datetime)
}

pub async fn current_timestamp(client: &Client, service_url: Option<&str>, timeout: Duration) -> String {
    let Some(url) = service_url else {
        return local_timestamp();
    };

    match fetch_remote_timestamp(client, url, timeout).await {
        Ok(timestamp) => timestamp,
        Err(reason) => {
            tracing::warn!("Time service {} unavailable ({}); using local clock", url, reason);
            local_timestamp()
        }
    }
}
