//! Core data structures for RALF generation.
//!
//! Defines the raw table handed over by the loader, the normalized row
//! records, the Block → Register → Field model and the statistics
//! reported for every conversion.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::decode::parse_offset;

/// Tabular input as delivered by a row source, before any normalization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Create a table from column names and row cells aligned with them.
    ///
    /// Empty or whitespace-only cells are stored as absent.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| cell.filter(|value| !value.trim().is_empty()))
                    .collect()
            })
            .collect();
        Self { columns, rows }
    }

    /// Convenience constructor from string slices, `""` meaning an empty cell
    pub fn from_records(columns: &[&str], rows: &[Vec<&str>]) -> Self {
        let columns = columns.iter().map(|c| c.to_string()).collect();
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|cell| Some(cell.to_string())).collect())
            .collect();
        Self::new(columns, rows)
    }

    /// Column names in input order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Check if a column exists in the table
    pub fn has_column(&self, column_name: &str) -> bool {
        self.column_index(column_name).is_some()
    }

    /// Get the index for a given column name
    pub fn column_index(&self, column_name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column_name)
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell value at `row` in the column at `index`; `None` when empty or short
    pub fn cell(&self, row: usize, index: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(index))
            .and_then(|cell| cell.as_deref())
    }
}

/// One input row after the identifying columns have been filled down
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub block_name: Option<String>,
    pub reg_name: Option<String>,
    pub reg_offset: Option<String>,
    pub bit: Option<String>,
    pub field_name: Option<String>,
    pub access: Option<String>,
    pub reset_value: Option<String>,
    pub description: Option<String>,
    pub hierarchy: Option<String>,
}

/// Normalizer output: filled rows plus whether a hierarchy column exists
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedTable {
    pub rows: Vec<Row>,
    pub has_hierarchy: bool,
}

/// Reasons a row contributes no field. Expected outcomes, never errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSkip {
    /// Field name cell is empty
    EmptyName,
    /// Field name is `reserved` in any letter case
    Reserved,
    /// Bit cell is empty or not a bit range
    InvalidBits(String),
}

impl fmt::Display for FieldSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldSkip::EmptyName => write!(f, "empty field name"),
            FieldSkip::Reserved => write!(f, "reserved field"),
            FieldSkip::InvalidBits(bits) if bits.is_empty() => write!(f, "empty bit range"),
            FieldSkip::InvalidBits(bits) => write!(f, "invalid bit range '{}'", bits),
        }
    }
}

/// Decoded `Bit` cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitRange {
    pub high: i64,
    pub low: i64,
}

impl BitRange {
    /// Number of bits covered; zero or negative for inverted ranges.
    /// Computed in `i128` so that no pair of `i64` positions can overflow.
    pub fn width(&self) -> i128 {
        i128::from(self.high) - i128::from(self.low) + 1
    }

    /// Least-significant bit position
    pub fn lsb(&self) -> i64 {
        self.low
    }
}

/// Reset value already truncated to the width of its field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetValue {
    pub width: i128,
    pub value: BigUint,
}

impl fmt::Display for ResetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}'h{:X}", self.width, self.value)
    }
}

/// A named bit range within a register
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Display name, decorated with the hierarchy path when one applies
    pub name: String,
    pub lsb: i64,
    pub width: i128,
    pub access: String,
    pub reset: Option<ResetValue>,
}

/// An addressable register, identified by name and raw offset text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Register {
    pub name: String,
    pub offset: String,
    pub fields: Vec<Field>,
}

impl Register {
    /// Offset as an integer; unparsable offsets count as zero
    pub fn offset_value(&self) -> BigUint {
        parse_offset(&self.offset)
    }
}

/// Top-level grouping of registers for one hardware unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub name: String,
    pub registers: Vec<Register>,
}

/// Complete grouped model, blocks in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterModel {
    pub blocks: Vec<Block>,
}

impl RegisterModel {
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn register_count(&self) -> usize {
        self.blocks.iter().map(|b| b.registers.len()).sum()
    }

    pub fn field_count(&self) -> usize {
        self.blocks
            .iter()
            .flat_map(|b| &b.registers)
            .map(|r| r.fields.len())
            .sum()
    }

    /// Find a block by display name
    pub fn block(&self, name: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.name == name)
    }
}

/// Statistics for one conversion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Data rows read from the input table
    pub rows_read: usize,

    /// Fields written to the model
    pub fields_emitted: usize,

    /// Rows skipped because the field name was empty
    pub skipped_empty_name: usize,

    /// Rows skipped because the field is reserved
    pub skipped_reserved: usize,

    /// Rows skipped because the bit range could not be decoded
    pub skipped_invalid_bits: usize,

    pub registers: usize,
    pub blocks: usize,

    /// Where the RALF text was written, if it was written
    pub output_path: Option<PathBuf>,

    pub processing_time_ms: u128,
}

impl GenerationStats {
    /// Total number of rows that produced no field
    pub fn rows_skipped(&self) -> usize {
        self.skipped_empty_name + self.skipped_reserved + self.skipped_invalid_bits
    }

    /// Count a skipped row under its reason
    pub fn record_skip(&mut self, reason: &FieldSkip) {
        match reason {
            FieldSkip::EmptyName => self.skipped_empty_name += 1,
            FieldSkip::Reserved => self.skipped_reserved += 1,
            FieldSkip::InvalidBits(_) => self.skipped_invalid_bits += 1,
        }
    }
}
