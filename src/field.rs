//! Field materialization
//!
//! Turns one normalized row into at most one [`Field`]. Rows without a
//! usable name or bit range are skipped with a [`FieldSkip`] reason.

use tracing::warn;

use crate::config::RalfConfig;
use crate::constants::{ACCESS_READ_ONLY, ACCESS_READ_ONLY_SHORT, RESERVED_FIELD_NAME};
use crate::decode::{mask_reset_value, parse_bit_range, parse_reset_value};
use crate::models::{Field, FieldSkip, Row};

/// Build the field described by `row`
pub fn materialize_field(
    row: &Row,
    config: &RalfConfig,
    has_hierarchy: bool,
) -> Result<Field, FieldSkip> {
    let base_name = row.field_name.as_deref().unwrap_or_default();
    let trimmed = base_name.trim();

    if trimmed.is_empty() {
        return Err(FieldSkip::EmptyName);
    }

    if trimmed.eq_ignore_ascii_case(RESERVED_FIELD_NAME) {
        return Err(FieldSkip::Reserved);
    }

    let bits = parse_bit_range(row.bit.as_deref())?;
    let width = bits.width();
    let lsb = bits.lsb();

    if width <= 0 {
        warn!(
            "Field '{}' has inverted bit range {}:{} (width {})",
            trimmed, bits.high, bits.low, width
        );
    }

    let access = normalize_access(row.access.as_deref(), config);
    let reset = parse_reset_value(row.reset_value.as_deref())
        .and_then(|value| mask_reset_value(value, width));

    let name = match row.hierarchy.as_deref() {
        Some(path) if has_hierarchy && config.hierarchy_in_field_names => {
            format!("{} ({})", base_name, path)
        }
        _ => base_name.to_string(),
    };

    Ok(Field {
        name,
        lsb,
        width,
        access,
        reset,
    })
}

/// Lowercase the access token, defaulting empty cells and expanding `r`
pub fn normalize_access(cell: Option<&str>, config: &RalfConfig) -> String {
    let access = cell
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(config.default_access.as_str())
        .to_lowercase();

    if config.expand_read_only_shorthand && access == ACCESS_READ_ONLY_SHORT {
        ACCESS_READ_ONLY.to_string()
    } else {
        access
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResetValue;
    use num_bigint::BigUint;

    fn field_row(field: &str, bit: &str, access: &str, reset: &str) -> Row {
        let cell = |value: &str| Some(value.to_string()).filter(|v| !v.trim().is_empty());
        Row {
            block_name: Some("BLK".to_string()),
            reg_name: Some("REG".to_string()),
            reg_offset: Some("0x0".to_string()),
            bit: cell(bit),
            field_name: cell(field),
            access: cell(access),
            reset_value: cell(reset),
            description: None,
            hierarchy: None,
        }
    }

    #[test]
    fn test_materialize_basic_field() {
        let config = RalfConfig::default();
        let field = materialize_field(&field_row("EN", "7:0", "RW", "0x01"), &config, false).unwrap();

        assert_eq!(field.name, "EN");
        assert_eq!(field.lsb, 0);
        assert_eq!(field.width, 8);
        assert_eq!(field.access, "rw");
        assert_eq!(
            field.reset,
            Some(ResetValue {
                width: 8,
                value: BigUint::from(1u32)
            })
        );
    }

    #[test]
    fn test_single_bit_field() {
        let config = RalfConfig::default();
        let field = materialize_field(&field_row("IRQ", "3", "", ""), &config, false).unwrap();

        assert_eq!(field.lsb, 3);
        assert_eq!(field.width, 1);
        assert_eq!(field.access, "rw");
        assert_eq!(field.reset, None);
    }

    #[test]
    fn test_reserved_and_empty_names_are_skipped() {
        let config = RalfConfig::default();

        for name in ["reserved", "Reserved", " RESERVED "] {
            assert_eq!(
                materialize_field(&field_row(name, "1", "r", ""), &config, false),
                Err(FieldSkip::Reserved)
            );
        }

        assert_eq!(
            materialize_field(&field_row("", "1", "rw", ""), &config, false),
            Err(FieldSkip::EmptyName)
        );
        assert!(materialize_field(&field_row("reserved_1", "1", "rw", ""), &config, false).is_ok());
    }

    #[test]
    fn test_bad_bits_are_skipped() {
        let config = RalfConfig::default();

        assert_eq!(
            materialize_field(&field_row("EN", "", "rw", ""), &config, false),
            Err(FieldSkip::InvalidBits(String::new()))
        );
        assert_eq!(
            materialize_field(&field_row("EN", "abc", "rw", ""), &config, false),
            Err(FieldSkip::InvalidBits("abc".to_string()))
        );
    }

    #[test]
    fn test_reset_is_masked_to_width() {
        let config = RalfConfig::default();
        let field = materialize_field(&field_row("MODE", "3:0", "rw", "0x1F"), &config, false).unwrap();

        assert_eq!(field.reset.unwrap().to_string(), "4'hF");
    }

    #[test]
    fn test_malformed_reset_is_dropped() {
        let config = RalfConfig::default();
        let field = materialize_field(&field_row("MODE", "3:0", "rw", "zz"), &config, false).unwrap();

        assert_eq!(field.reset, None);
    }

    #[test]
    fn test_inverted_range_has_no_reset() {
        let config = RalfConfig::default();
        let field = materialize_field(&field_row("ODD", "0:3", "rw", "0x1"), &config, false).unwrap();

        assert_eq!(field.width, -2);
        assert_eq!(field.lsb, 3);
        assert_eq!(field.reset, None);
    }

    #[test]
    fn test_extreme_bit_positions_do_not_overflow() {
        let config = RalfConfig::default();

        let field = materialize_field(
            &field_row("HUGE", "9223372036854775807:0", "rw", "1"),
            &config,
            false,
        )
        .unwrap();
        assert_eq!(field.width, 9_223_372_036_854_775_808);
        assert_eq!(field.reset.unwrap().to_string(), "9223372036854775808'h1");

        let field = materialize_field(
            &field_row("LOW", "0:-9223372036854775808", "rw", "-1"),
            &config,
            false,
        )
        .unwrap();
        assert_eq!(field.width, 9_223_372_036_854_775_809);
        assert_eq!(field.lsb, i64::MIN);
        assert_eq!(field.reset, None);
    }

    #[test]
    fn test_negative_reset_on_wide_field() {
        let config = RalfConfig::default();
        let field = materialize_field(&field_row("KEY", "199:0", "rw", "-1"), &config, false).unwrap();

        assert_eq!(
            field.reset.unwrap().to_string(),
            format!("200'h{}", "F".repeat(50))
        );
    }

    #[test]
    fn test_access_normalization() {
        let config = RalfConfig::default();

        assert_eq!(normalize_access(Some("r"), &config), "ro");
        assert_eq!(normalize_access(Some(" R "), &config), "ro");
        assert_eq!(normalize_access(None, &config), "rw");
        assert_eq!(normalize_access(Some("rw"), &config), "rw");
        assert_eq!(normalize_access(Some("W1C"), &config), "w1c");

        let verbatim = RalfConfig::default().without_read_only_expansion();
        assert_eq!(normalize_access(Some("r"), &verbatim), "r");
    }

    #[test]
    fn test_hierarchy_decorates_name() {
        let config = RalfConfig::default();
        let mut row = field_row("lpddr5", "3", "rw", "");
        row.hierarchy = Some("U_apb_slvtop.slvif.ff_regb_ddrc_ch0_lpddr5".to_string());

        let field = materialize_field(&row, &config, true).unwrap();
        assert_eq!(field.name, "lpddr5 (U_apb_slvtop.slvif.ff_regb_ddrc_ch0_lpddr5)");

        let field = materialize_field(&row, &config.clone().without_hierarchy_names(), true).unwrap();
        assert_eq!(field.name, "lpddr5");

        let field = materialize_field(&row, &config, false).unwrap();
        assert_eq!(field.name, "lpddr5");
    }
}
