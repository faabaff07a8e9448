//! Conversion pipeline.
//!
//! Orchestrates the complete spreadsheet → RALF workflow: table loading,
//! row normalization, field grouping, text emission and atomic output.
//! The generation step itself is pure; only loading and writing touch
//! the filesystem, and they run on the blocking thread pool.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::task;
use tracing::{error, info};

use crate::config::RalfConfig;
use crate::emitter::render_ralf;
use crate::error::{RalfError, Result};
use crate::hierarchy::build_model;
use crate::loader::load_table;
use crate::models::{GenerationStats, RawTable, RegisterModel};
use crate::normalizer::normalize_rows;
use crate::writer::write_output;

/// Result of the in-memory generation step
#[derive(Debug, Clone)]
pub struct Generated {
    pub text: String,
    pub model: RegisterModel,
    pub stats: GenerationStats,
}

/// Generate RALF text from a raw table without any I/O.
///
/// Fails only when a required column is missing; malformed cells are
/// skipped or defaulted.
pub fn generate(table: &RawTable, config: &RalfConfig) -> Result<Generated> {
    let normalized = normalize_rows(table)?;

    let mut stats = GenerationStats::default();
    let model = build_model(&normalized, config, &mut stats);
    let text = render_ralf(&model, config.bytes_per_word);

    Ok(Generated { text, model, stats })
}

/// One input file and where its RALF output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Outcome of a batch of conversions
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub converted: Vec<GenerationStats>,
    pub failed: Vec<(PathBuf, RalfError)>,
    pub processing_time_ms: u128,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total_fields(&self) -> usize {
        self.converted.iter().map(|s| s.fields_emitted).sum()
    }

    pub fn total_registers(&self) -> usize {
        self.converted.iter().map(|s| s.registers).sum()
    }
}

/// Drives conversions of register tables on disk
#[derive(Debug, Clone)]
pub struct RalfProcessor {
    config: RalfConfig,
}

impl RalfProcessor {
    /// Create a processor after validating its configuration
    pub fn new(config: RalfConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Load and convert one file, returning the generated text without writing it
    pub async fn render_file(&self, input: &Path) -> Result<Generated> {
        let table = self.load(input).await?;
        generate(&table, &self.config)
    }

    /// Convert one file and write the result to `output`
    pub async fn convert_file(&self, input: &Path, output: &Path) -> Result<GenerationStats> {
        let start_time = Instant::now();

        let Generated { text, stats, .. } = self.render_file(input).await?;

        let target = output.to_path_buf();
        task::spawn_blocking(move || write_output(&target, &text))
            .await
            .map_err(|e| RalfError::ProcessingFailed {
                path: output.to_path_buf(),
                reason: format!("Failed to spawn output writer task: {}", e),
            })??;

        let stats = GenerationStats {
            output_path: Some(output.to_path_buf()),
            processing_time_ms: start_time.elapsed().as_millis(),
            ..stats
        };

        info!(
            "Converted {} -> {} ({} blocks, {} registers, {} fields, {} rows skipped)",
            input.display(),
            output.display(),
            stats.blocks,
            stats.registers,
            stats.fields_emitted,
            stats.rows_skipped()
        );

        Ok(stats)
    }

    /// Convert every job in order; one failing input does not stop the rest
    pub async fn convert_batch(&self, jobs: &[ConversionJob], show_progress: bool) -> BatchSummary {
        let start_time = Instant::now();
        let mut summary = BatchSummary::default();

        let progress_bar = if show_progress && jobs.len() > 1 {
            let pb = ProgressBar::new(jobs.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        for job in jobs {
            if let Some(pb) = &progress_bar {
                pb.set_message(job.input.display().to_string());
            }

            match self.convert_file(&job.input, &job.output).await {
                Ok(stats) => summary.converted.push(stats),
                Err(e) => {
                    error!("Failed to convert {}: {}", job.input.display(), e);
                    summary.failed.push((job.input.clone(), e));
                }
            }

            if let Some(pb) = &progress_bar {
                pb.inc(1);
            }
        }

        if let Some(pb) = progress_bar {
            pb.finish_and_clear();
        }

        summary.processing_time_ms = start_time.elapsed().as_millis();
        summary
    }

    async fn load(&self, input: &Path) -> Result<RawTable> {
        let path = input.to_path_buf();
        let config = self.config.clone();

        task::spawn_blocking(move || load_table(&path, &config))
            .await
            .map_err(|e| RalfError::ProcessingFailed {
                path: input.to_path_buf(),
                reason: format!("Failed to spawn table loading task: {}", e),
            })?
    }
}

/// Print a colored summary of a batch run
pub fn print_summary(summary: &BatchSummary) {
    println!("\n{}", "Conversion Summary".bright_green().bold());

    for stats in &summary.converted {
        if let Some(path) = &stats.output_path {
            println!(
                "  {} {} ({} blocks, {} registers, {} fields)",
                "Wrote".bright_cyan(),
                path.display().to_string().bright_white(),
                stats.blocks,
                stats.registers,
                stats.fields_emitted
            );
        }
        if stats.rows_skipped() > 0 {
            println!(
                "    {} {} reserved, {} unnamed, {} without valid bits",
                "Skipped rows:".bright_black(),
                stats.skipped_reserved,
                stats.skipped_empty_name,
                stats.skipped_invalid_bits
            );
        }
    }

    for (path, error) in &summary.failed {
        println!(
            "  {} {}: {}",
            "Failed".bright_red().bold(),
            path.display(),
            error
        );
    }

    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        summary.processing_time_ms.to_string().bright_white()
    );
    println!(
        "  {} {} registers, {} fields",
        "Total:".bright_cyan(),
        summary.total_registers().to_string().bright_white().bold(),
        summary.total_fields().to_string().bright_white().bold()
    );
}

#[cfg(test)]
mod tests;
