//! End-to-end processing of one CV: acquire, extract, clean, report.
//!
//! [`Processor::process`] never returns an error. Every failure before
//! reporting is folded into the [`ExtractionResult`], which is final before
//! the callback is attempted; a failed callback is logged and does not change
//! it. The downloaded file is removed before reporting on every path.

use crate::core::config::ProcessorConfig;
use crate::core::format::resolve_request;
use crate::core::io::ScratchFile;
use crate::http::{build_client, current_timestamp, download_to_file, send_callback};
use crate::plugins::ExtractorRegistry;
use crate::text::clean_text;
use crate::types::{CallbackPayload, ExtractionRequest, ExtractionResult, ProcessingInfo};
use crate::{CvHarvestError, Result};
use reqwest::Client;
use std::fmt;

/// Pipeline stage, logged on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Init,
    Acquiring,
    Extracting,
    Cleaning,
    Reporting,
    Done,
}

impl fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProcessingStage::Init => "init",
            ProcessingStage::Acquiring => "acquiring",
            ProcessingStage::Extracting => "extracting",
            ProcessingStage::Cleaning => "cleaning",
            ProcessingStage::Reporting => "reporting",
            ProcessingStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Everything a caller may want to know after [`Processor::process`].
#[derive(Debug, Clone)]
pub struct ProcessingOutcome {
    pub result: ExtractionResult,
    /// The body that was (or would have been) POSTed to the callback URL.
    pub payload: CallbackPayload,
    pub callback_delivered: bool,
}

impl ProcessingOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_success()
    }
}

pub struct Processor {
    config: ProcessorConfig,
    client: Client,
    registry: ExtractorRegistry,
}

impl Processor {
    /// Processor with the built-in extractors.
    pub fn new(config: ProcessorConfig) -> Result<Self> {
        let registry = ExtractorRegistry::with_defaults(&config)?;
        Self::with_registry(config, registry)
    }

    pub fn with_registry(config: ProcessorConfig, registry: ExtractorRegistry) -> Result<Self> {
        let client = build_client(&config)?;
        Ok(Self {
            config,
            client,
            registry,
        })
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Run the whole pipeline for one invocation.
    pub async fn process(
        &self,
        file_url: &str,
        application_id: &str,
        callback_url: &str,
        auth_token: &str,
    ) -> ProcessingOutcome {
        tracing::info!("Processing CV for application {}", application_id);

        let result = self.extract(file_url).await;
        self.log_result(&result);

        let (payload, callback_delivered) = self.report(&result, application_id, callback_url, auth_token).await;

        log_stage(ProcessingStage::Done);
        ProcessingOutcome {
            result,
            payload,
            callback_delivered,
        }
    }

    /// Acquire and extract without reporting. The scratch file is gone when
    /// this returns.
    pub async fn extract(&self, file_url: &str) -> ExtractionResult {
        log_stage(ProcessingStage::Init);
        let request = resolve_request(&self.client, file_url, self.config.probe_timeout()).await;
        tracing::debug!(
            "Resolved {} as {} (extension '{}')",
            request.url,
            request.format,
            request.extension
        );

        match self.run(&request).await {
            Ok(result) => result,
            Err(e) => ExtractionResult::failure(e.to_string(), request.format),
        }
    }

    async fn run(&self, request: &ExtractionRequest) -> Result<ExtractionResult> {
        let scratch = ScratchFile::create(&request.extension)?;

        log_stage(ProcessingStage::Acquiring);
        let bytes = download_to_file(
            &self.client,
            &request.url,
            scratch.path(),
            self.config.download_timeout(),
        )
        .await?;
        tracing::info!("Downloaded {} bytes to {}", bytes, scratch.path().display());

        if !request.format.is_supported() {
            return Err(CvHarvestError::UnsupportedFormat(request.display_extension().to_string()));
        }

        let extractor = self.registry.get(request.format)?;
        log_stage(ProcessingStage::Extracting);
        tracing::debug!("Using extractor '{}' for {}", extractor.name(), request.format);
        let raw = extractor.extract_file(scratch.path()).await?;

        log_stage(ProcessingStage::Cleaning);
        let text = clean_text(&raw);

        if let Err(e) = scratch.close() {
            tracing::warn!("Failed to remove temporary file: {}", e);
        }

        ExtractionResult::success(text, request).ok_or(CvHarvestError::NoTextExtracted)
    }

    /// Build the callback body and deliver it. Returns the payload and
    /// whether delivery succeeded.
    pub async fn report(
        &self,
        result: &ExtractionResult,
        application_id: &str,
        callback_url: &str,
        auth_token: &str,
    ) -> (CallbackPayload, bool) {
        log_stage(ProcessingStage::Reporting);

        let timestamp = current_timestamp(
            &self.client,
            self.config.time_service_url.as_deref(),
            self.config.probe_timeout(),
        )
        .await;
        let payload = result.to_payload(
            application_id,
            ProcessingInfo {
                method: self.config.method.clone(),
                timestamp,
            },
        );

        match send_callback(
            &self.client,
            callback_url,
            auth_token,
            &payload,
            self.config.callback_timeout(),
        )
        .await
        {
            Ok(()) => {
                tracing::info!("Callback delivered to {}", callback_url);
                (payload, true)
            }
            Err(e) => {
                tracing::warn!("{}", e);
                (payload, false)
            }
        }
    }

    fn log_result(&self, result: &ExtractionResult) {
        if result.is_success() {
            tracing::info!(
                "Extracted {} characters from {} file",
                result.text_length(),
                result.extension()
            );
            if self.config.preview_chars > 0 {
                let preview: String = result.text().chars().take(self.config.preview_chars).collect();
                tracing::info!("Preview: {}", preview);
            }
        } else {
            tracing::error!("Processing failed: {}", result.error().unwrap_or_default());
        }
    }
}

fn log_stage(stage: ProcessingStage) {
    tracing::info!(stage = %stage, "Stage: {}", stage);
}
