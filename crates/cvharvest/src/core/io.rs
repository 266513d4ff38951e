//! Scoped local storage for the downloaded document.

use crate::Result;
use std::path::Path;
use tempfile::TempPath;

const SCRATCH_PREFIX: &str = "cvharvest-";

/// Temporary file holding the downloaded document.
///
/// The file is created empty on construction and removed when the value is
/// dropped, on every exit path including unwinding. It carries the source's
/// extension so external tools that sniff file names see the right type.
#[derive(Debug)]
pub struct ScratchFile {
    path: TempPath,
}

impl ScratchFile {
    /// Create an empty scratch file with the given dotted extension (may be empty).
    pub fn create(extension: &str) -> Result<Self> {
        let file = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .suffix(extension)
            .tempfile()?;
        Ok(Self {
            path: file.into_temp_path(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the file now, reporting removal errors instead of ignoring them.
    pub fn close(self) -> Result<()> {
        self.path.close()?;
        Ok(())
    }
}
