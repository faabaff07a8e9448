//! RALF text emission
//!
//! Renders a [`RegisterModel`] as nested RALF text:
//!
//! ```text
//! block GPIO {
//!   bytes 4;
//!     register CTRL @'h10 {
//!         field EN @0 {
//!            bits 8;
//!            access rw;
//!            reset 8'h1;
//!         }
//!     }
//!
//! }
//! ```
//!
//! Blocks are separated by one blank line, every register is followed by
//! one blank line, and the text carries no trailing newline.

use crate::constants::{BLOCK_BODY_INDENT, FIELD_BODY_INDENT, FIELD_INDENT, REGISTER_INDENT};
use crate::models::{Block, Field, Register, RegisterModel};

/// Render the complete model with the given `bytes` declaration
pub fn render_ralf(model: &RegisterModel, bytes_per_word: usize) -> String {
    let mut lines: Vec<String> = Vec::new();

    for (index, block) in model.blocks().iter().enumerate() {
        if index > 0 {
            lines.push(String::new());
        }
        render_block(block, bytes_per_word, &mut lines);
    }

    lines.join("\n")
}

fn render_block(block: &Block, bytes_per_word: usize, lines: &mut Vec<String>) {
    lines.push(format!("block {} {{", block.name));
    lines.push(format!("{}bytes {};", BLOCK_BODY_INDENT, bytes_per_word));

    for register in &block.registers {
        render_register(register, lines);
    }

    lines.push("}".to_string());
}

fn render_register(register: &Register, lines: &mut Vec<String>) {
    lines.push(format!(
        "{}register {} @'h{:X} {{",
        REGISTER_INDENT,
        register.name,
        register.offset_value()
    ));

    for field in &register.fields {
        render_field(field, lines);
    }

    lines.push(format!("{}}}", REGISTER_INDENT));
    lines.push(String::new());
}

fn render_field(field: &Field, lines: &mut Vec<String>) {
    lines.push(format!("{}field {} @{} {{", FIELD_INDENT, field.name, field.lsb));
    lines.push(format!("{}bits {};", FIELD_BODY_INDENT, field.width));
    lines.push(format!("{}access {};", FIELD_BODY_INDENT, field.access));
    if let Some(reset) = &field.reset {
        lines.push(format!("{}reset {};", FIELD_BODY_INDENT, reset));
    }
    lines.push(format!("{}}}", FIELD_INDENT));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResetValue;
    use num_bigint::BigUint;

    fn field(name: &str, lsb: i64, width: i128, access: &str, reset: Option<u64>) -> Field {
        Field {
            name: name.to_string(),
            lsb,
            width,
            access: access.to_string(),
            reset: reset.map(|value| ResetValue {
                width,
                value: BigUint::from(value),
            }),
        }
    }

    #[test]
    fn test_render_single_field() {
        let model = RegisterModel {
            blocks: vec![Block {
                name: "GPIO".to_string(),
                registers: vec![Register {
                    name: "CTRL".to_string(),
                    offset: "0x10".to_string(),
                    fields: vec![field("EN", 0, 8, "rw", Some(1))],
                }],
            }],
        };

        let expected = "block GPIO {\n\
                        \x20 bytes 4;\n\
                        \x20   register CTRL @'h10 {\n\
                        \x20       field EN @0 {\n\
                        \x20          bits 8;\n\
                        \x20          access rw;\n\
                        \x20          reset 8'h1;\n\
                        \x20       }\n\
                        \x20   }\n\
                        \n\
                        }";

        assert_eq!(render_ralf(&model, 4), expected);
    }

    #[test]
    fn test_render_blocks_separated_by_blank_line() {
        let model = RegisterModel {
            blocks: vec![
                Block {
                    name: "A".to_string(),
                    registers: vec![],
                },
                Block {
                    name: "B".to_string(),
                    registers: vec![],
                },
            ],
        };

        assert_eq!(
            render_ralf(&model, 8),
            "block A {\n  bytes 8;\n}\n\nblock B {\n  bytes 8;\n}"
        );
    }

    #[test]
    fn test_render_field_without_reset() {
        let model = RegisterModel {
            blocks: vec![Block {
                name: "B".to_string(),
                registers: vec![Register {
                    name: "STAT".to_string(),
                    offset: "255".to_string(),
                    fields: vec![field("BUSY", 3, 1, "ro", None)],
                }],
            }],
        };

        let text = render_ralf(&model, 4);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[2], "    register STAT @'hFF {");
        assert_eq!(lines[3], "        field BUSY @3 {");
        assert_eq!(lines[4], "           bits 1;");
        assert_eq!(lines[5], "           access ro;");
        assert_eq!(lines[6], "        }");
        assert!(!text.contains("reset"));
    }

    #[test]
    fn test_unparsable_offset_renders_zero() {
        let model = RegisterModel {
            blocks: vec![Block {
                name: "B".to_string(),
                registers: vec![Register {
                    name: "R".to_string(),
                    offset: "see note".to_string(),
                    fields: vec![],
                }],
            }],
        };

        assert!(render_ralf(&model, 4).contains("register R @'h0 {"));
    }

    #[test]
    fn test_offset_wider_than_64_bits() {
        let model = RegisterModel {
            blocks: vec![Block {
                name: "MEM".to_string(),
                registers: vec![Register {
                    name: "FAR".to_string(),
                    offset: "0x1_0000_0000_0000_0010".to_string(),
                    fields: vec![],
                }],
            }],
        };

        assert!(render_ralf(&model, 4).contains("register FAR @'h10000000000000010 {"));
    }

    #[test]
    fn test_empty_model_renders_nothing() {
        assert_eq!(render_ralf(&RegisterModel::default(), 4), "");
    }
}
