//! External command-line tools (pdftotext, antiword).
//!
//! Extraction code depends on the [`ToolRunner`] capability rather than on
//! `tokio::process` directly: "run this program with these arguments, give me
//! its stdout or an error, never take longer than the timeout".
//!
//! Executables are located in this order:
//!
//! 1. an explicit path from the configuration,
//! 2. the tool's environment variable (e.g. `CVHARVEST_PDFTOTEXT_PATH`),
//! 3. a `PATH` lookup.

use crate::{CvHarvestError, Result};
use async_trait::async_trait;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// Captured output of a successful tool run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Run an external program with a bounded wall-clock time.
///
/// Implementations return an error for spawn failures, timeouts and non-zero
/// exit codes.
#[async_trait]
pub trait ToolRunner: Send + Sync {
    async fn run(&self, program: &Path, args: &[OsString], timeout: Duration) -> Result<ToolOutput>;
}

/// [`ToolRunner`] backed by real child processes.
///
/// The child is killed when the timeout elapses.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemToolRunner;

#[async_trait]
impl ToolRunner for SystemToolRunner {
    async fn run(&self, program: &Path, args: &[OsString], timeout_duration: Duration) -> Result<ToolOutput> {
        let tool = tool_name(program);

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| CvHarvestError::external_tool(&tool, format!("failed to execute {}: {}", program.display(), e)))?;

        let child_id = child.id();

        let output = match timeout(timeout_duration, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(CvHarvestError::external_tool(&tool, format!("failed to wait: {}", e)));
            }
            Err(_) => {
                return Err(CvHarvestError::external_tool(
                    &tool,
                    format!("timed out after {:?} (PID: {:?})", timeout_duration, child_id),
                ));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(CvHarvestError::external_tool(
                &tool,
                format!(
                    "exited with code {}: {}",
                    output.status.code().unwrap_or(-1),
                    stderr.trim()
                ),
            ));
        }

        Ok(ToolOutput { stdout, stderr })
    }
}

fn tool_name(program: &Path) -> String {
    program
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.display().to_string())
}

/// An external tool the extractors know how to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalTool {
    PdfToText,
    Antiword,
}

impl ExternalTool {
    pub fn binary_name(&self) -> &'static str {
        match self {
            ExternalTool::PdfToText => "pdftotext",
            ExternalTool::Antiword => "antiword",
        }
    }

    pub fn env_var(&self) -> &'static str {
        match self {
            ExternalTool::PdfToText => "CVHARVEST_PDFTOTEXT_PATH",
            ExternalTool::Antiword => "CVHARVEST_ANTIWORD_PATH",
        }
    }

    fn install_message(&self) -> String {
        let package = match self {
            ExternalTool::PdfToText => "poppler-utils",
            ExternalTool::Antiword => "antiword",
        };
        format!(
            "{} is required. Install: Linux: 'apt install {}', macOS: 'brew install {}'. \
If it is installed in a custom location, set {} to the executable.",
            self.binary_name(),
            package,
            if matches!(self, ExternalTool::PdfToText) { "poppler" } else { "antiword" },
            self.env_var()
        )
    }

    /// Resolve the executable path.
    pub fn locate(&self, configured: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = configured {
            return if path.is_file() {
                Ok(path.to_path_buf())
            } else {
                Err(CvHarvestError::MissingDependency(format!(
                    "configured {} path '{}' does not exist",
                    self.binary_name(),
                    path.display()
                )))
            };
        }

        if let Some(value) = env::var_os(self.env_var()).filter(|v| !v.is_empty()) {
            let path = PathBuf::from(value);
            if path.is_file() {
                return Ok(path);
            }
            tracing::debug!(
                "{}='{}' is not a file; falling back to PATH lookup",
                self.env_var(),
                path.display()
            );
        }

        which::which(self.binary_name()).map_err(|_| CvHarvestError::MissingDependency(self.install_message()))
    }
}
