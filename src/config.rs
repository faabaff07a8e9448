//! Configuration management and validation.
//!
//! Provides the generation settings consumed by the pipeline, with
//! defaults matching the conventional RALF layout, and JSON loading for
//! the command-line layer.

use crate::constants::{DEFAULT_ACCESS, DEFAULT_BLOCK_NAME, DEFAULT_BYTES_PER_WORD, DEFAULT_SEPARATOR};
use crate::error::{RalfError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Settings for converting a register table into RALF
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RalfConfig {
    /// Word size in bytes written as the `bytes` declaration of every block
    pub bytes_per_word: usize,

    /// Block name used for rows that precede any block name
    pub default_block_name: String,

    /// Access mode used when the access cell is empty
    pub default_access: String,

    /// Render the spreadsheet shorthand `r` as RALF `ro`
    pub expand_read_only_shorthand: bool,

    /// Append `(<Hierarchy>)` to field names when the column is present
    pub hierarchy_in_field_names: bool,

    /// Delimiter of the input table export
    pub separator: char,

    /// Worksheet to read from workbook inputs, by name or zero-based index.
    /// The first sheet is used when unset.
    pub sheet: Option<String>,
}

impl Default for RalfConfig {
    fn default() -> Self {
        Self {
            bytes_per_word: DEFAULT_BYTES_PER_WORD,
            default_block_name: DEFAULT_BLOCK_NAME.to_string(),
            default_access: DEFAULT_ACCESS.to_string(),
            expand_read_only_shorthand: true,
            hierarchy_in_field_names: true,
            separator: DEFAULT_SEPARATOR,
            sheet: None,
        }
    }
}

impl RalfConfig {
    /// Load configuration from a JSON file; absent keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        debug!("Loaded configuration from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Set the word size in bytes
    pub fn with_bytes_per_word(mut self, bytes_per_word: usize) -> Self {
        self.bytes_per_word = bytes_per_word;
        self
    }

    /// Set the input delimiter
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Select the worksheet read from workbook inputs
    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    /// Keep field names undecorated even when a hierarchy column exists
    pub fn without_hierarchy_names(mut self) -> Self {
        self.hierarchy_in_field_names = false;
        self
    }

    /// Pass the `r` access token through verbatim
    pub fn without_read_only_expansion(mut self) -> Self {
        self.expand_read_only_shorthand = false;
        self
    }

    /// Check the configuration for values that cannot produce valid RALF
    pub fn validate(&self) -> Result<()> {
        if self.bytes_per_word == 0 {
            return Err(RalfError::configuration(
                "bytes_per_word must be greater than zero",
            ));
        }

        if self.default_block_name.trim().is_empty() {
            return Err(RalfError::configuration(
                "default_block_name must not be empty",
            ));
        }

        if self.default_access.trim().is_empty() {
            return Err(RalfError::configuration("default_access must not be empty"));
        }

        if !self.separator.is_ascii() {
            return Err(RalfError::configuration(format!(
                "separator must be a single ASCII character, got '{}'",
                self.separator
            )));
        }

        if self.sheet.as_deref().is_some_and(|sheet| sheet.trim().is_empty()) {
            return Err(RalfError::configuration("sheet must not be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = RalfConfig::default();
        assert_eq!(config.bytes_per_word, 4);
        assert_eq!(config.default_block_name, "TOP");
        assert_eq!(config.default_access, "rw");
        assert!(config.expand_read_only_shorthand);
        assert!(config.hierarchy_in_field_names);
        assert_eq!(config.separator, ',');
        assert_eq!(config.sheet, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = RalfConfig::default()
            .with_bytes_per_word(8)
            .with_separator('\t')
            .with_sheet("Registers")
            .without_hierarchy_names()
            .without_read_only_expansion();

        assert_eq!(config.bytes_per_word, 8);
        assert_eq!(config.separator, '\t');
        assert_eq!(config.sheet.as_deref(), Some("Registers"));
        assert!(!config.hierarchy_in_field_names);
        assert!(!config.expand_read_only_shorthand);
    }

    #[test]
    fn test_validate_rejects_zero_bytes() {
        let config = RalfConfig::default().with_bytes_per_word(0);
        assert!(matches!(
            config.validate(),
            Err(RalfError::Configuration { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_blank_block_name() {
        let config = RalfConfig {
            default_block_name: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_sheet() {
        let config = RalfConfig::default().with_sheet(" ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file_partial_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"bytes_per_word": 8, "default_block_name": "CHIP"}}"#).unwrap();

        let config = RalfConfig::from_file(file.path()).unwrap();
        assert_eq!(config.bytes_per_word, 8);
        assert_eq!(config.default_block_name, "CHIP");
        assert_eq!(config.default_access, "rw");
    }

    #[test]
    fn test_from_file_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "bytes_per_word = 8").unwrap();

        assert!(matches!(
            RalfConfig::from_file(file.path()),
            Err(RalfError::Json(_))
        ));
    }
}
