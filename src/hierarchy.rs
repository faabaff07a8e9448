//! Block → Register → Field grouping
//!
//! Rows are grouped by their filled-down keys in first-seen order. Blocks
//! are keyed by `BlockName`, registers by `(RegName, RegOffset)` within
//! their block. Rows are never reordered.

use std::collections::HashMap;
use tracing::debug;

use crate::config::RalfConfig;
use crate::field::materialize_field;
use crate::models::{Block, GenerationStats, NormalizedTable, Register, RegisterModel};

type RegisterKey = (Option<String>, Option<String>);

/// Accumulates one block while remembering where each register landed
#[derive(Debug)]
struct BlockGroup {
    block: Block,
    register_index: HashMap<RegisterKey, usize>,
}

impl BlockGroup {
    fn new(name: String) -> Self {
        Self {
            block: Block {
                name,
                registers: Vec::new(),
            },
            register_index: HashMap::new(),
        }
    }

    /// Register for `key`, appended on first sight
    fn register_mut(&mut self, key: RegisterKey) -> &mut Register {
        let registers = &mut self.block.registers;
        let index = *self.register_index.entry(key).or_insert_with_key(|(name, offset)| {
            registers.push(Register {
                name: name.clone().unwrap_or_default(),
                offset: offset.clone().unwrap_or_default(),
                fields: Vec::new(),
            });
            registers.len() - 1
        });
        &mut registers[index]
    }
}

/// Group normalized rows into the register model.
///
/// Every row opens its block and register even when it contributes no
/// field, so a register whose rows are all reserved is still emitted.
pub fn build_model(
    table: &NormalizedTable,
    config: &RalfConfig,
    stats: &mut GenerationStats,
) -> RegisterModel {
    let mut groups: Vec<BlockGroup> = Vec::new();
    let mut block_index: HashMap<Option<String>, usize> = HashMap::new();

    for (row_number, row) in table.rows.iter().enumerate() {
        stats.rows_read += 1;

        let index = *block_index.entry(row.block_name.clone()).or_insert_with(|| {
            let name = row
                .block_name
                .clone()
                .unwrap_or_else(|| config.default_block_name.clone());
            groups.push(BlockGroup::new(name));
            groups.len() - 1
        });

        let register =
            groups[index].register_mut((row.reg_name.clone(), row.reg_offset.clone()));

        match materialize_field(row, config, table.has_hierarchy) {
            Ok(field) => {
                register.fields.push(field);
                stats.fields_emitted += 1;
            }
            Err(reason) => {
                debug!("Skipped row {}: {}", row_number + 1, reason);
                stats.record_skip(&reason);
            }
        }
    }

    let model = RegisterModel {
        blocks: groups.into_iter().map(|group| group.block).collect(),
    };

    stats.blocks = model.blocks.len();
    stats.registers = model.register_count();

    model
}
