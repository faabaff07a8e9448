//! Application constants for the RALF generator
//!
//! Column names of the register spreadsheet, default values for the
//! generated model, and the fixed layout of the RALF text output.

// =============================================================================
// Spreadsheet Columns
// =============================================================================

/// Column holding the block (IP / functional unit) name
pub const COL_BLOCK_NAME: &str = "BlockName";

/// Column holding the register name
pub const COL_REG_NAME: &str = "RegName";

/// Column holding the register offset within its block
pub const COL_REG_OFFSET: &str = "RegOffset";

/// Column holding the bit range of a field ("7:0" or "3")
pub const COL_BIT: &str = "Bit";

/// Column holding the field name
pub const COL_FIELD_NAME: &str = "FieldName";

/// Column holding the access mode of a field
pub const COL_ACCESS: &str = "Access";

/// Column holding the reset value of a field
pub const COL_RESET_VALUE: &str = "ResetValue";

/// Column holding free-form field documentation
pub const COL_DESCRIPTION: &str = "Description";

/// Optional column holding the backdoor hierarchy path of a field
pub const COL_HIERARCHY: &str = "Hierarchy";

/// Columns that must be present in every input table, in reporting order
pub const REQUIRED_COLUMNS: &[&str] = &[
    COL_BLOCK_NAME,
    COL_REG_NAME,
    COL_REG_OFFSET,
    COL_BIT,
    COL_FIELD_NAME,
    COL_ACCESS,
    COL_RESET_VALUE,
    COL_DESCRIPTION,
];

// =============================================================================
// Model Defaults
// =============================================================================

/// Default `bytes` declaration of every block
pub const DEFAULT_BYTES_PER_WORD: usize = 4;

/// Block name used when no block name has been seen yet
pub const DEFAULT_BLOCK_NAME: &str = "TOP";

/// Access mode used when the access cell is empty
pub const DEFAULT_ACCESS: &str = "rw";

/// Field name (compared case-insensitively) that never produces a field
pub const RESERVED_FIELD_NAME: &str = "reserved";

/// Short read-only access token accepted in spreadsheets
pub const ACCESS_READ_ONLY_SHORT: &str = "r";

/// Read-only access token expected by RALF consumers
pub const ACCESS_READ_ONLY: &str = "ro";

/// Widest field for which a negative reset value is still masked
pub const MAX_RESET_MASK_BITS: u64 = 1 << 20;

// =============================================================================
// RALF Layout
// =============================================================================

/// Indent of lines directly inside a block (`bytes`)
pub const BLOCK_BODY_INDENT: &str = "  ";

/// Indent of register headers and closers
pub const REGISTER_INDENT: &str = "    ";

/// Indent of field headers and closers
pub const FIELD_INDENT: &str = "        ";

/// Indent of declarations inside a field
pub const FIELD_BODY_INDENT: &str = "           ";

// =============================================================================
// File Handling
// =============================================================================

/// Extension given to generated files
pub const RALF_EXTENSION: &str = "ralf";

/// Delimited text exports read with polars
pub const DELIMITED_EXTENSIONS: &[&str] = &["csv", "tsv", "txt"];

/// Spreadsheet workbooks read with calamine
pub const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Default delimiter of spreadsheet exports
pub const DEFAULT_SEPARATOR: char = ',';
