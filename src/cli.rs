//! Command-line interface components.

use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::RalfConfig;
use crate::constants::RALF_EXTENSION;
use crate::error::{RalfError, Result};
use crate::processor::ConversionJob;

#[derive(Parser, Debug)]
#[command(name = "ralf-gen")]
#[command(about = "Convert register spreadsheets (workbooks or CSV/TSV exports) into RALF register models")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Register tables to convert (paths or glob patterns)
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<String>,

    /// Output file (single input) or directory (several inputs)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Word size in bytes for the `bytes` declaration of every block
    #[arg(long, value_name = "N")]
    pub bytes: Option<usize>,

    /// Column delimiter of the input tables (`.tsv` files always use tab)
    #[arg(long, value_name = "CHAR")]
    pub separator: Option<char>,

    /// Worksheet of workbook inputs, by name or zero-based index (default: first)
    #[arg(long, value_name = "NAME|INDEX")]
    pub sheet: Option<String>,

    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Do not append the Hierarchy column to field names
    #[arg(long)]
    pub no_hierarchy: bool,

    /// Print the RALF text to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only report errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Log level derived from `--verbose` / `--quiet`
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Show progress bars and the summary unless quiet
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    /// Layer defaults, the optional config file and command-line flags
    pub fn build_config(&self) -> Result<RalfConfig> {
        let mut config = match &self.config {
            Some(path) => RalfConfig::from_file(path)?,
            None => RalfConfig::default(),
        };

        if let Some(bytes) = self.bytes {
            config = config.with_bytes_per_word(bytes);
        }
        if let Some(separator) = self.separator {
            config = config.with_separator(separator);
        }
        if let Some(sheet) = &self.sheet {
            config = config.with_sheet(sheet);
        }
        if self.no_hierarchy {
            config = config.without_hierarchy_names();
        }

        config.validate()?;
        debug!("Effective configuration: {:?}", config);
        Ok(config)
    }

    /// Expand glob patterns into concrete input files, keeping argument order
    pub fn resolve_inputs(&self) -> Result<Vec<PathBuf>> {
        let mut inputs = Vec::new();

        for pattern in &self.inputs {
            if !is_glob_pattern(pattern) {
                inputs.push(PathBuf::from(pattern));
                continue;
            }

            let paths = glob::glob(pattern).map_err(|e| {
                RalfError::configuration(format!("Invalid input pattern '{}': {}", pattern, e))
            })?;

            let mut matched: Vec<PathBuf> = paths.filter_map(|entry| entry.ok()).collect();
            if matched.is_empty() {
                return Err(RalfError::configuration(format!(
                    "Input pattern '{}' matched no files",
                    pattern
                )));
            }
            matched.sort();
            inputs.append(&mut matched);
        }

        Ok(inputs)
    }

    /// Pair every input with its output path
    pub fn build_jobs(&self, inputs: &[PathBuf]) -> Result<Vec<ConversionJob>> {
        if self.stdout && inputs.len() > 1 {
            return Err(RalfError::configuration(
                "--stdout accepts exactly one input",
            ));
        }

        let jobs = match (&self.output, inputs) {
            (Some(output), [input]) if !output.is_dir() => vec![ConversionJob {
                input: input.clone(),
                output: output.clone(),
            }],
            (Some(output_dir), _) => inputs
                .iter()
                .map(|input| ConversionJob {
                    input: input.clone(),
                    output: output_dir.join(default_output_name(input)),
                })
                .collect(),
            (None, _) => inputs
                .iter()
                .map(|input| ConversionJob {
                    input: input.clone(),
                    output: input.with_extension(RALF_EXTENSION),
                })
                .collect(),
        };

        Ok(jobs)
    }
}

fn is_glob_pattern(text: &str) -> bool {
    text.contains(['*', '?', '['])
}

/// `<stem>.ralf` for an input path
fn default_output_name(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "output".into());
    PathBuf::from(stem).with_extension(RALF_EXTENSION)
}
