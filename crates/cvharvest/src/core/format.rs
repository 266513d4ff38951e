//! File format resolution.
//!
//! A request's format comes from the extension of the URL path. Only when the
//! path carries no extension at all is the server asked, with a single `HEAD`
//! request, for the `Content-Type` of the resource.

use crate::types::ExtractionRequest;
use reqwest::Client;
use reqwest::Url;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Document container type governing which extractor applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Pdf,
    Docx,
    Doc,
    Unknown,
}

impl Format {
    /// Map a file extension (with or without the leading dot, any case).
    pub fn from_extension(extension: &str) -> Self {
        match extension.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "pdf" => Format::Pdf,
            "docx" => Format::Docx,
            "doc" => Format::Doc,
            _ => Format::Unknown,
        }
    }

    /// Map a `Content-Type` header value by substring, as servers often add
    /// parameters or use vendor variants.
    pub fn from_content_type(content_type: &str) -> Self {
        let content_type = content_type.to_ascii_lowercase();
        if content_type.contains("pdf") {
            Format::Pdf
        } else if content_type.contains("wordprocessingml") {
            Format::Docx
        } else if content_type.contains("msword") {
            Format::Doc
        } else {
            Format::Unknown
        }
    }

    /// Canonical dotted extension, `None` for `Unknown`.
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            Format::Pdf => Some(".pdf"),
            Format::Docx => Some(".docx"),
            Format::Doc => Some(".doc"),
            Format::Unknown => None,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Format::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Pdf => "pdf",
            Format::Docx => "docx",
            Format::Doc => "doc",
            Format::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase dotted extension of the last segment of the URL's path.
///
/// The extension starts at the last `.` of the segment, ignoring leading
/// dots, so `/cv.` yields `"."` while `/.profile` and `/cv.pdf/` yield
/// `None`. Unparsable URLs also yield `None`. Query strings and fragments
/// are ignored.
pub fn extension_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed.path().rsplit('/').next()?;
    let leading_dots = segment.len() - segment.trim_start_matches('.').len();
    let dot = segment[leading_dots..].rfind('.')? + leading_dots;
    Some(segment[dot..].to_ascii_lowercase())
}

/// Ask the server for the resource's content type with one `HEAD` request.
///
/// Any failure (transport error, timeout, missing or non-ASCII header) is
/// logged and reported as `Format::Unknown`; there is no retry.
pub async fn probe_content_type(client: &Client, url: &str, timeout: Duration) -> Format {
    let response = match client.head(url).timeout(timeout).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!("Content-type probe for {} failed: {}", url, e);
            return Format::Unknown;
        }
    };

    match response.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
        Some(content_type) => {
            let format = Format::from_content_type(content_type);
            tracing::debug!("Content-type probe: '{}' -> {}", content_type, format);
            format
        }
        None => {
            tracing::debug!("Content-type probe for {} returned no usable Content-Type", url);
            Format::Unknown
        }
    }
}

/// Build the immutable request for one invocation.
///
/// The URL extension wins whenever present; a recognized probe result
/// supplies the canonical extension of its format.
pub async fn resolve_request(client: &Client, url: &str, probe_timeout: Duration) -> ExtractionRequest {
    if let Some(extension) = extension_from_url(url) {
        let format = Format::from_extension(&extension);
        return ExtractionRequest::new(url, format, extension);
    }

    if Url::parse(url).is_err() {
        tracing::debug!("Source URL {} is not a valid URL; skipping content-type probe", url);
        return ExtractionRequest::new(url, Format::Unknown, String::new());
    }

    let format = probe_content_type(client, url, probe_timeout).await;
    let extension = format.extension().unwrap_or_default().to_string();
    ExtractionRequest::new(url, format, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::HEAD, MockServer};

    const DOCX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

    #[test]
    fn test_from_extension() {
        assert_eq!(Format::from_extension(".pdf"), Format::Pdf);
        assert_eq!(Format::from_extension("PDF"), Format::Pdf);
        assert_eq!(Format::from_extension(".DocX"), Format::Docx);
        assert_eq!(Format::from_extension("doc"), Format::Doc);
        assert_eq!(Format::from_extension(".txt"), Format::Unknown);
        assert_eq!(Format::from_extension(""), Format::Unknown);
    }

    #[test]
    fn test_from_content_type() {
        assert_eq!(Format::from_content_type("application/pdf"), Format::Pdf);
        assert_eq!(Format::from_content_type("application/x-pdf; charset=binary"), Format::Pdf);
        assert_eq!(Format::from_content_type(DOCX_MIME_TYPE), Format::Docx);
        assert_eq!(Format::from_content_type("Application/MSWord"), Format::Doc);
        assert_eq!(Format::from_content_type("text/html"), Format::Unknown);
    }

    #[test]
    fn test_extension_round_trip_for_supported_formats() {
        for format in [Format::Pdf, Format::Docx, Format::Doc] {
            let ext = format.extension().unwrap();
            assert_eq!(Format::from_extension(ext), format);
        }
        assert_eq!(Format::Unknown.extension(), None);
        assert!(!Format::Unknown.is_supported());
    }

    #[test]
    fn test_extension_from_url() {
        assert_eq!(
            extension_from_url("https://cdn.example.com/cv/Jane%20Doe.PDF"),
            Some(".pdf".to_string())
        );
        assert_eq!(
            extension_from_url("https://example.com/files/resume.docx?sig=abc.def#page=2"),
            Some(".docx".to_string())
        );
        assert_eq!(extension_from_url("https://example.com/download/12345"), None);
        assert_eq!(extension_from_url("https://example.com/.profile"), None);
        assert_eq!(extension_from_url("not a url"), None);
    }

    #[test]
    fn test_extension_from_url_edge_segments() {
        assert_eq!(extension_from_url("https://example.com/cv."), Some(".".to_string()));
        assert_eq!(extension_from_url("https://example.com/cv.pdf/"), None);
        assert_eq!(extension_from_url("https://example.com/..pdf"), None);
        assert_eq!(extension_from_url("https://example.com/.hidden.DOC"), Some(".doc".to_string()));
        assert_eq!(extension_from_url("https://example.com/cv.backup.pdf"), Some(".pdf".to_string()));
        assert_eq!(extension_from_url("https://example.com/docs.v2/resume"), None);
    }

    #[test]
    fn test_format_display_and_serde() {
        assert_eq!(Format::Docx.to_string(), "docx");
        assert_eq!(serde_json::to_string(&Format::Pdf).unwrap(), "\"pdf\"");
    }

    #[tokio::test]
    async fn test_resolve_request_uses_url_extension_without_probe() {
        let server = MockServer::start_async().await;
        let probe = server
            .mock_async(|when, then| {
                when.method(HEAD).path("/cv.doc");
                then.status(200).header("content-type", "application/pdf");
            })
            .await;

        let request = resolve_request(&Client::new(), &server.url("/cv.doc"), Duration::from_secs(5)).await;

        assert_eq!(request.format, Format::Doc);
        assert_eq!(request.extension, ".doc");
        assert_eq!(probe.hits_async().await, 0);
    }

    #[tokio::test]
    async fn test_resolve_request_probes_when_extension_missing() {
        let server = MockServer::start_async().await;
        let probe = server
            .mock_async(|when, then| {
                when.method(HEAD).path("/files/42");
                then.status(200).header("content-type", DOCX_MIME_TYPE);
            })
            .await;

        let request = resolve_request(&Client::new(), &server.url("/files/42"), Duration::from_secs(5)).await;

        probe.assert_async().await;
        assert_eq!(request.format, Format::Docx);
        assert_eq!(request.extension, ".docx");
    }

    #[tokio::test]
    async fn test_resolve_request_probe_failure_is_unknown() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(HEAD).path("/files/43");
                then.status(200).header("content-type", "text/html");
            })
            .await;

        let request = resolve_request(&Client::new(), &server.url("/files/43"), Duration::from_secs(5)).await;

        assert_eq!(request.format, Format::Unknown);
        assert_eq!(request.extension, "");
    }

    #[tokio::test]
    async fn test_resolve_request_unreachable_probe_is_unknown() {
        let request = resolve_request(
            &Client::new(),
            "http://127.0.0.1:9/files/44",
            Duration::from_millis(500),
        )
        .await;

        assert_eq!(request.format, Format::Unknown);
    }

    #[tokio::test]
    async fn test_resolve_request_trailing_dot_is_unknown_without_probe() {
        let server = MockServer::start_async().await;
        let probe = server
            .mock_async(|when, then| {
                when.method(HEAD).path("/cv.");
                then.status(200).header("content-type", "application/pdf");
            })
            .await;

        let request = resolve_request(&Client::new(), &server.url("/cv."), Duration::from_secs(5)).await;

        assert_eq!(request.format, Format::Unknown);
        assert_eq!(request.extension, ".");
        assert_eq!(request.display_extension(), ".");
        assert_eq!(probe.hits_async().await, 0);
    }

    #[tokio::test]
    async fn test_resolve_request_trailing_slash_probes() {
        let server = MockServer::start_async().await;
        let probe = server
            .mock_async(|when, then| {
                when.method(HEAD).path("/cv.pdf/");
                then.status(200).header("content-type", "application/pdf");
            })
            .await;

        let request = resolve_request(&Client::new(), &server.url("/cv.pdf/"), Duration::from_secs(5)).await;

        probe.assert_async().await;
        assert_eq!(request.format, Format::Pdf);
        assert_eq!(request.extension, ".pdf");
    }

    #[tokio::test]
    async fn test_resolve_request_unknown_extension_skips_probe() {
        let request = resolve_request(
            &Client::new(),
            "http://127.0.0.1:9/notes.txt",
            Duration::from_millis(500),
        )
        .await;

        assert_eq!(request.format, Format::Unknown);
        assert_eq!(request.extension, ".txt");
    }
}
