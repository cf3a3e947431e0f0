//! Column assignment for overlapping scheduled blocks.
//!
//! # Responsibility
//! - Group blocks whose `[start, end)` ranges overlap.
//! - Give each block a column index and its group's column count.
//!
//! # Invariants
//! - Grouping is greedy and single-pass in start order; a block joins the
//!   first group holding any block it overlaps. This can use more columns
//!   than a minimum interval coloring.
//! - Columns inside a group follow insertion order, starting at 0.

use crate::model::block::ScheduledBlock;
use serde::Serialize;
use std::collections::HashMap;

/// Identity of a block in the layout map.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockKey {
    /// External id (or temporary local id).
    Id(String),
    /// Index in the input slice, for blocks without an id.
    Position(usize),
}

impl BlockKey {
    pub fn for_block(block: &ScheduledBlock, position: usize) -> Self {
        match &block.id {
            Some(id) => Self::Id(id.clone()),
            None => Self::Position(position),
        }
    }
}

/// Horizontal placement of one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapColumnInfo {
    pub column: usize,
    pub total_columns: usize,
}

/// Half-open interval overlap test.
pub fn overlaps(a: &ScheduledBlock, b: &ScheduledBlock) -> bool {
    a.start < b.end && a.end > b.start
}

/// Assigns columns, returning one entry per input block in input order.
pub fn assign_column_slots(blocks: &[ScheduledBlock]) -> Vec<OverlapColumnInfo> {
    let mut order: Vec<usize> = (0..blocks.len()).collect();
    order.sort_by(|&left, &right| blocks[left].start.total_cmp(&blocks[right].start));

    let mut groups: Vec<Vec<usize>> = Vec::new();
    for index in order {
        let candidate = &blocks[index];
        let existing = groups.iter_mut().find(|group| {
            group
                .iter()
                .any(|&member| overlaps(&blocks[member], candidate))
        });
        match existing {
            Some(group) => group.push(index),
            None => groups.push(vec![index]),
        }
    }

    let mut slots = vec![
        OverlapColumnInfo {
            column: 0,
            total_columns: 1,
        };
        blocks.len()
    ];
    for group in &groups {
        for (column, &index) in group.iter().enumerate() {
            slots[index] = OverlapColumnInfo {
                column,
                total_columns: group.len(),
            };
        }
    }
    slots
}

/// Assigns columns keyed by block identity.
///
/// Blocks sharing an id (the walker may emit the same node twice) collapse to
/// the entry of the last one in input order. Use [`assign_column_slots`] when
/// every block needs its own entry.
pub fn assign_columns(blocks: &[ScheduledBlock]) -> HashMap<BlockKey, OverlapColumnInfo> {
    assign_column_slots(blocks)
        .into_iter()
        .enumerate()
        .map(|(position, info)| (BlockKey::for_block(&blocks[position], position), info))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::block::Category;

    fn block(id: Option<&str>, start: f64, end: f64) -> ScheduledBlock {
        ScheduledBlock {
            id: id.map(str::to_string),
            start,
            end,
            title: "x".to_string(),
            category: Category::Default,
            highlight: None,
            original_text: String::new(),
            is_task: false,
            checked: false,
        }
    }

    #[test]
    fn touching_ranges_do_not_overlap() {
        assert!(!overlaps(&block(None, 9.0, 10.0), &block(None, 10.0, 11.0)));
        assert!(overlaps(&block(None, 9.0, 10.5), &block(None, 10.0, 11.0)));
    }

    #[test]
    fn greedy_chain_shares_one_group() {
        // b overlaps a and c, a and c do not overlap; all three land in one group.
        let blocks = vec![
            block(None, 9.0, 10.0),
            block(None, 9.5, 11.0),
            block(None, 10.5, 12.0),
        ];
        let slots = assign_column_slots(&blocks);
        assert_eq!(
            slots.iter().map(|slot| slot.column).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert!(slots.iter().all(|slot| slot.total_columns == 3));
    }

    #[test]
    fn unsorted_input_is_placed_by_start_order() {
        let blocks = vec![block(Some("late"), 9.5, 10.5), block(Some("early"), 9.0, 10.0)];
        let map = assign_columns(&blocks);
        assert_eq!(map[&BlockKey::Id("early".to_string())].column, 0);
        assert_eq!(map[&BlockKey::Id("late".to_string())].column, 1);
    }
}
