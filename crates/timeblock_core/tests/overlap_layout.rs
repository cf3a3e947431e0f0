use timeblock_core::model::block::{Category, ScheduledBlock};
use timeblock_core::{assign_column_slots, assign_columns, BlockKey, OverlapColumnInfo};

fn block(id: &str, start: f64, end: f64) -> ScheduledBlock {
    ScheduledBlock {
        id: Some(id.to_string()),
        start,
        end,
        title: id.to_string(),
        category: Category::Default,
        highlight: None,
        original_text: String::new(),
        is_task: false,
        checked: false,
    }
}

fn info(column: usize, total_columns: usize) -> OverlapColumnInfo {
    OverlapColumnInfo {
        column,
        total_columns,
    }
}

#[test]
fn overlapping_pair_and_lone_block() {
    let layout = assign_columns(&[
        block("a", 9.0, 10.0),
        block("b", 9.5, 10.5),
        block("c", 11.0, 12.0),
    ]);

    assert_eq!(layout[&BlockKey::Id("a".to_string())], info(0, 2));
    assert_eq!(layout[&BlockKey::Id("b".to_string())], info(1, 2));
    assert_eq!(layout[&BlockKey::Id("c".to_string())], info(0, 1));
}

#[test]
fn touching_blocks_do_not_overlap() {
    let slots = assign_column_slots(&[block("a", 9.0, 10.0), block("b", 10.0, 11.0)]);
    assert_eq!(slots, vec![info(0, 1), info(0, 1)]);
}

#[test]
fn grouping_is_greedy_in_start_order() {
    // c never overlaps a, yet it gets a third column instead of reusing a's.
    let slots = assign_column_slots(&[
        block("c", 10.5, 11.5),
        block("a", 9.0, 10.0),
        block("b", 9.5, 11.0),
    ]);
    assert_eq!(slots, vec![info(2, 3), info(0, 3), info(1, 3)]);
}

#[test]
fn blocks_without_ids_are_keyed_by_position() {
    let mut first = block("x", 8.0, 9.0);
    first.id = None;
    let mut second = block("y", 8.5, 9.5);
    second.id = None;

    let layout = assign_columns(&[first, second]);
    assert_eq!(layout[&BlockKey::Position(0)], info(0, 2));
    assert_eq!(layout[&BlockKey::Position(1)], info(1, 2));
}

#[test]
fn empty_input_yields_empty_layout() {
    assert!(assign_columns(&[]).is_empty());
}

#[test]
fn shared_ids_keep_every_entry_only_by_position() {
    let blocks = [block("a", 9.0, 10.0), block("a", 9.5, 10.5)];

    let keyed = assign_columns(&blocks);
    assert_eq!(keyed.len(), 1);
    assert_eq!(keyed[&BlockKey::Id("a".to_string())], info(1, 2));

    assert_eq!(assign_column_slots(&blocks), vec![info(0, 2), info(1, 2)]);
}
