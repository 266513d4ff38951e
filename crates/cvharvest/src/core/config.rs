//! Configuration loading and management.
//!
//! Every field has a default, so an empty `cvharvest.toml` (or no file at all)
//! gives the stock behavior: 30 s download/callback/tool timeouts, a 10 s
//! probe, and the public time service with a local clock fallback.

use crate::{CvHarvestError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File name looked up by [`ProcessorConfig::discover`].
pub const CONFIG_FILE_NAME: &str = "cvharvest.toml";

pub const DEFAULT_TIME_SERVICE_URL: &str = "http://worldtimeapi.org/api/ip";

/// Runtime settings for one processing run.
///
/// # Example
///
/// ```rust
/// use cvharvest::ProcessorConfig;
///
/// let config = ProcessorConfig::default();
/// assert_eq!(config.download_timeout().as_secs(), 30);
/// assert_eq!(config.method, "github_actions");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// Timeout for the streamed download of the source file
    pub download_timeout_secs: u64,

    /// Timeout for the callback POST
    pub callback_timeout_secs: u64,

    /// Timeout for the content-type probe and the time service lookup
    pub probe_timeout_secs: u64,

    /// Timeout for each external tool (pdftotext, antiword)
    pub tool_timeout_secs: u64,

    /// Time service returning `{"utc_datetime": ...}` (None = local clock only)
    pub time_service_url: Option<String>,

    /// Value reported as `processing_info.method`
    pub method: String,

    /// User-Agent header for every outgoing request
    pub user_agent: String,

    /// Explicit pdftotext executable (None = env override, then PATH)
    pub pdftotext_path: Option<PathBuf>,

    /// Explicit antiword executable (None = env override, then PATH)
    pub antiword_path: Option<PathBuf>,

    /// Characters of extracted text echoed to the log on success
    pub preview_chars: usize,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            download_timeout_secs: 30,
            callback_timeout_secs: 30,
            probe_timeout_secs: 10,
            tool_timeout_secs: 30,
            time_service_url: Some(DEFAULT_TIME_SERVICE_URL.to_string()),
            method: "github_actions".to_string(),
            user_agent: concat!("cvharvest/", env!("CARGO_PKG_VERSION")).to_string(),
            pdftotext_path: None,
            antiword_path: None,
            preview_chars: 200,
        }
    }
}

impl ProcessorConfig {
    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }

    pub fn callback_timeout(&self) -> Duration {
        Duration::from_secs(self.callback_timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn tool_timeout(&self) -> Duration {
        Duration::from_secs(self.tool_timeout_secs)
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            CvHarvestError::validation(format!("Failed to read config file {}: {}", path.as_ref().display(), e))
        })?;

        let mut config: Self = toml::from_str(&content)
            .map_err(|e| CvHarvestError::validation(format!("Invalid TOML in {}: {}", path.as_ref().display(), e)))?;
        // TOML has no null; an empty string turns the time service off.
        if config.time_service_url.as_deref().is_some_and(|url| url.trim().is_empty()) {
            config.time_service_url = None;
        }
        config.validate()?;
        Ok(config)
    }

    /// Find `cvharvest.toml` in the current directory or any of its ancestors.
    pub fn discover() -> Result<Option<Self>> {
        let mut current = std::env::current_dir().map_err(CvHarvestError::Io)?;

        loop {
            let candidate = current.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                return Ok(Some(Self::from_toml_file(candidate)?));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }

    fn validate(&self) -> Result<()> {
        let timeouts = [
            ("download_timeout_secs", self.download_timeout_secs),
            ("callback_timeout_secs", self.callback_timeout_secs),
            ("probe_timeout_secs", self.probe_timeout_secs),
            ("tool_timeout_secs", self.tool_timeout_secs),
        ];
        if let Some((name, _)) = timeouts.iter().find(|(_, secs)| *secs == 0) {
            return Err(CvHarvestError::validation(format!("{} must be greater than zero", name)));
        }
        if self.method.trim().is_empty() {
            return Err(CvHarvestError::validation("method cannot be empty"));
        }
        Ok(())
    }
}
