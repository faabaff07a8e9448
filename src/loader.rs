//! Register table loading.
//!
//! Delimited exports are read with polars and workbooks with calamine.
//! Every cell reaches the decoders as text so that offsets like `0x10`
//! and bit ranges like `7:0` arrive untouched.

use calamine::{Data, Reader, open_workbook_auto};
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info};

use crate::config::RalfConfig;
use crate::constants::{DELIMITED_EXTENSIONS, WORKBOOK_EXTENSIONS};
use crate::error::{RalfError, Result};
use crate::models::RawTable;

/// How an input file is read, decided by its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputFormat {
    Delimited(u8),
    Workbook,
}

impl InputFormat {
    fn detect(path: &Path, separator: char) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("tsv") => Ok(Self::Delimited(b'\t')),
            Some(ext) if DELIMITED_EXTENSIONS.contains(&ext) => u8::try_from(separator)
                .map(Self::Delimited)
                .map_err(|_| RalfError::UnsupportedInput {
                    path: path.to_path_buf(),
                    reason: format!("separator '{}' is not a single byte", separator),
                }),
            Some(ext) if WORKBOOK_EXTENSIONS.contains(&ext) => Ok(Self::Workbook),
            _ => Err(RalfError::UnsupportedInput {
                path: path.to_path_buf(),
                reason: format!(
                    "expected one of: {}, {}",
                    DELIMITED_EXTENSIONS.join(", "),
                    WORKBOOK_EXTENSIONS.join(", ")
                ),
            }),
        }
    }
}

/// Load a register table from a CSV/TSV export or a spreadsheet workbook
pub fn load_table(path: &Path, config: &RalfConfig) -> Result<RawTable> {
    if !path.exists() {
        return Err(RalfError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    info!("Loading register table: {}", path.display());

    let table = match InputFormat::detect(path, config.separator)? {
        InputFormat::Delimited(separator) => load_delimited(path, separator)?,
        InputFormat::Workbook => load_workbook(path, config.sheet.as_deref())?,
    };

    debug!(
        "Loaded {} rows with columns {:?}",
        table.row_count(),
        table.columns()
    );

    Ok(table)
}

fn load_delimited(path: &Path, separator: u8) -> Result<RawTable> {
    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(CsvParseOptions::default().with_separator(separator))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    table_from_frame(&frame)
}

/// Read one worksheet; the first row is the header
fn load_workbook(path: &Path, sheet: Option<&str>) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_name = select_sheet(path, &workbook.sheet_names(), sheet)?;
    debug!("Reading worksheet '{}'", sheet_name);

    let range = workbook.worksheet_range(&sheet_name)?;
    let mut rows = range.rows();

    let columns: Vec<String> = match rows.next() {
        Some(header) => header
            .iter()
            .map(|cell| cell_text(cell).unwrap_or_default())
            .collect(),
        None => Vec::new(),
    };

    let rows: Vec<Vec<Option<String>>> = rows
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    Ok(RawTable::new(columns, rows))
}

/// Resolve the requested worksheet: an exact name first, then a zero-based index
fn select_sheet(path: &Path, available: &[String], requested: Option<&str>) -> Result<String> {
    let Some(requested) = requested else {
        return available
            .first()
            .cloned()
            .ok_or_else(|| RalfError::UnsupportedInput {
                path: path.to_path_buf(),
                reason: "workbook contains no worksheets".to_string(),
            });
    };

    if let Some(name) = available.iter().find(|name| name.as_str() == requested) {
        return Ok(name.clone());
    }

    requested
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|index| available.get(index))
        .cloned()
        .ok_or_else(|| RalfError::SheetNotFound {
            path: path.to_path_buf(),
            sheet: requested.to_string(),
            available: available.to_vec(),
        })
}

/// Text of a worksheet cell. Whole numbers print without a fraction.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(text) => Some(text.clone()),
        Data::Int(value) => Some(value.to_string()),
        Data::Float(value) => Some(value.to_string()),
        other => Some(other.to_string()),
    }
}

/// Convert a string-typed data frame into a [`RawTable`]
pub fn table_from_frame(frame: &DataFrame) -> Result<RawTable> {
    let columns: Vec<String> = frame
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let mut rows: Vec<Vec<Option<String>>> = vec![Vec::with_capacity(columns.len()); frame.height()];

    for name in &columns {
        let column = frame.column(name)?.cast(&DataType::String)?;
        let values = column.as_materialized_series().str()?;

        for (row, value) in rows.iter_mut().zip(values.into_iter()) {
            row.push(value.map(str::to_string));
        }
    }

    Ok(RawTable::new(columns, rows))
}
