//! Delivery of the final result to the callback endpoint.

use super::describe_request_error;
use crate::types::CallbackPayload;
use crate::{CvHarvestError, Result};
use reqwest::Client;
use std::time::Duration;

/// POST `payload` as JSON with a bearer token. Non-2xx responses are errors.
pub async fn send_callback(
    client: &Client,
    callback_url: &str,
    auth_token: &str,
    payload: &CallbackPayload,
    timeout: Duration,
) -> Result<()> {
    let response = client
        .post(callback_url)
        .bearer_auth(auth_token)
        .json(payload)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| CvHarvestError::callback_with_source(describe_request_error(&e), e))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(CvHarvestError::callback(format!(
            "HTTP status {}: {}",
            status,
            body.chars().take(200).collect::<String>()
        )));
    }

    Ok(())
}
