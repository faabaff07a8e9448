//! Pipeline tests for the conversion processor
//!
//! Tests the complete load → generate → write workflow using temporary
//! register tables.


use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Header row shared by the test tables
pub const HEADER: &str = "BlockName,RegName,RegOffset,Bit,FieldName,Access,ResetValue,Description";

/// Write a CSV table made of `HEADER` and `rows` into `temp_dir`
pub fn write_table(temp_dir: &TempDir, name: &str, rows: &[&str]) -> PathBuf {
    let mut content = String::from(HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');

    let path = temp_dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}
