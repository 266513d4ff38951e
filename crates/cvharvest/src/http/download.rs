//! Streamed download of the source document.

use super::describe_request_error;
use crate::{CvHarvestError, Result};
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

/// Stream `url` into `destination`, returning the number of bytes written.
///
/// Every failure (transport, non-2xx status, local write) is a
/// `CvHarvestError::Download`; the timeout covers the whole transfer.
pub async fn download_to_file(client: &Client, url: &str, destination: &Path, timeout: Duration) -> Result<u64> {
    let mut response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| CvHarvestError::download_with_source(describe_request_error(&e), e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CvHarvestError::download(format!("HTTP status {}", status)));
    }

    let mut file = tokio::fs::File::create(destination).await.map_err(|e| {
        CvHarvestError::download_with_source(format!("cannot write {}: {}", destination.display(), e), e)
    })?;

    let mut written: u64 = 0;
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| CvHarvestError::download_with_source(describe_request_error(&e), e))?
    {
        file.write_all(&chunk)
            .await
            .map_err(|e| CvHarvestError::download_with_source(format!("write failed: {}", e), e))?;
        written += chunk.len() as u64;
    }

    file.flush()
        .await
        .map_err(|e| CvHarvestError::download_with_source(format!("write failed: {}", e), e))?;

    tracing::debug!("Downloaded {} bytes from {}", written, url);
    Ok(written)
}
