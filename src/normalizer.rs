//! Row normalization for sparsely-filled register tables
//!
//! Spreadsheets usually name a block, register and offset once and leave
//! the following rows of the same register blank. The normalizer checks
//! the table schema and fills those identifying columns down, one
//! independent "last seen" value per column.

use tracing::debug;

use crate::constants::{
    COL_ACCESS, COL_BIT, COL_BLOCK_NAME, COL_DESCRIPTION, COL_FIELD_NAME, COL_HIERARCHY,
    COL_REG_NAME, COL_REG_OFFSET, COL_RESET_VALUE, REQUIRED_COLUMNS,
};
use crate::error::{RalfError, Result};
use crate::models::{NormalizedTable, RawTable, Row};

/// Column positions resolved once against the table header
#[derive(Debug, Clone, Copy)]
struct ColumnIndices {
    block_name: usize,
    reg_name: usize,
    reg_offset: usize,
    bit: usize,
    field_name: usize,
    access: usize,
    reset_value: usize,
    description: usize,
    hierarchy: Option<usize>,
}

impl ColumnIndices {
    /// Resolve every required column, reporting all missing ones at once
    fn resolve(table: &RawTable) -> Result<Self> {
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|column| !table.has_column(column))
            .map(|column| column.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(RalfError::MissingColumns { missing });
        }

        let index = |name: &str| table.column_index(name).unwrap_or_default();

        Ok(Self {
            block_name: index(COL_BLOCK_NAME),
            reg_name: index(COL_REG_NAME),
            reg_offset: index(COL_REG_OFFSET),
            bit: index(COL_BIT),
            field_name: index(COL_FIELD_NAME),
            access: index(COL_ACCESS),
            reset_value: index(COL_RESET_VALUE),
            description: index(COL_DESCRIPTION),
            hierarchy: table.column_index(COL_HIERARCHY),
        })
    }
}

/// Last non-empty value seen in each fill-down column
#[derive(Debug, Clone, Default)]
pub struct ForwardFill {
    block_name: Option<String>,
    reg_name: Option<String>,
    reg_offset: Option<String>,
    hierarchy: Option<String>,
}

impl ForwardFill {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace an empty cell with the carried value, or remember a new one
    fn carry(slot: &mut Option<String>, cell: Option<&str>) -> Option<String> {
        if let Some(value) = cell {
            *slot = Some(value.to_string());
        }
        slot.clone()
    }

    pub fn block_name(&mut self, cell: Option<&str>) -> Option<String> {
        Self::carry(&mut self.block_name, cell)
    }

    pub fn reg_name(&mut self, cell: Option<&str>) -> Option<String> {
        Self::carry(&mut self.reg_name, cell)
    }

    pub fn reg_offset(&mut self, cell: Option<&str>) -> Option<String> {
        Self::carry(&mut self.reg_offset, cell)
    }

    pub fn hierarchy(&mut self, cell: Option<&str>) -> Option<String> {
        Self::carry(&mut self.hierarchy, cell)
    }
}

/// Validate the schema and fill down `BlockName`, `RegName`, `RegOffset`
/// and, when present, `Hierarchy`. Other columns pass through unchanged.
pub fn normalize_rows(table: &RawTable) -> Result<NormalizedTable> {
    let columns = ColumnIndices::resolve(table)?;
    let mut fill = ForwardFill::new();

    let owned = |row: usize, index: usize| table.cell(row, index).map(str::to_string);

    let rows: Vec<Row> = (0..table.row_count())
        .map(|row| Row {
            block_name: fill.block_name(table.cell(row, columns.block_name)),
            reg_name: fill.reg_name(table.cell(row, columns.reg_name)),
            reg_offset: fill.reg_offset(table.cell(row, columns.reg_offset)),
            bit: owned(row, columns.bit),
            field_name: owned(row, columns.field_name),
            access: owned(row, columns.access),
            reset_value: owned(row, columns.reset_value),
            description: owned(row, columns.description),
            hierarchy: columns
                .hierarchy
                .and_then(|index| fill.hierarchy(table.cell(row, index))),
        })
        .collect();

    debug!(
        "Normalized {} rows (hierarchy column: {})",
        rows.len(),
        columns.hierarchy.is_some()
    );

    Ok(NormalizedTable {
        rows,
        has_hierarchy: columns.hierarchy.is_some(),
    })
}
