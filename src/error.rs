//! Error handling for RALF generation.
//!
//! Only structural problems are errors here. Malformed cells degrade
//! gracefully inside the pipeline and never reach this type.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RalfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Worksheet '{sheet}' not found in {path} (available: {})", .available.join(", "))]
    SheetNotFound {
        path: PathBuf,
        sheet: String,
        available: Vec<String>,
    },

    #[error("Invalid configuration file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Input table is missing required columns: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Unsupported input file: {path} - {reason}")]
    UnsupportedInput { path: PathBuf, reason: String },

    #[error("Processing failed for file: {path} - {reason}")]
    ProcessingFailed { path: PathBuf, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl RalfError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RalfError>;
