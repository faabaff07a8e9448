//! Atomic output writing.
//!
//! The RALF text is written to a temporary file next to the target and
//! renamed into place, so an interrupted run never leaves a partial file.

use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::Result;

/// Write `text` to `path`, creating parent directories as needed
pub fn write_output(path: &Path, text: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(text.as_bytes())?;
    temp_file.flush()?;
    temp_file.persist(path).map_err(|e| e.error)?;

    debug!("Wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}
