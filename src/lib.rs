//! RALF Generator Library
//!
//! Converts a flat register table (one row per bit-field) into a nested
//! RALF register model: blocks containing registers containing fields.
//!
//! This library provides tools for:
//! - Loading register spreadsheets from workbooks or CSV/TSV exports
//! - Filling down sparsely-filled block, register and offset columns
//! - Decoding bit ranges, access modes and reset values per field
//! - Grouping fields into registers and blocks in first-seen order
//! - Emitting byte-for-byte deterministic RALF text
//!
//! ## Usage
//!
//! ```rust
//! use ralf_generator::{RalfConfig, RawTable, generate};
//!
//! let table = RawTable::from_records(
//!     &["BlockName", "RegName", "RegOffset", "Bit", "FieldName", "Access", "ResetValue", "Description"],
//!     &[vec!["GPIO", "CTRL", "0x10", "7:0", "EN", "rw", "0x01", "enable"]],
//! );
//!
//! let generated = generate(&table, &RalfConfig::default())?;
//! assert!(generated.text.starts_with("block GPIO {"));
//! # Ok::<(), ralf_generator::RalfError>(())
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod decode;
pub mod emitter;
pub mod error;
pub mod field;
pub mod hierarchy;
pub mod loader;
pub mod models;
pub mod normalizer;
pub mod processor;
pub mod writer;

// Re-export commonly used types
pub use config::RalfConfig;
pub use error::{RalfError, Result};
pub use models::{Block, Field, GenerationStats, RawTable, Register, RegisterModel};
pub use processor::{Generated, RalfProcessor, generate};
