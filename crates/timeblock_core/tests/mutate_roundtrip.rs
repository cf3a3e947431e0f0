use timeblock_core::model::block::{is_temporary_id, Category, ScheduledBlock};
use timeblock_core::parse::classify::{classify, Classified};
use timeblock_core::{match_time_range, replace_time_range, replace_title, retitle_task};

fn scheduled(line: &str) -> ScheduledBlock {
    match classify(line, None) {
        Some(Classified::Scheduled(block)) => block,
        other => panic!("`{line}` should classify as scheduled, got {other:?}"),
    }
}

#[test]
fn replaced_range_is_recognized_with_same_title() {
    let updated = replace_time_range("9am-10am Gym", 10.0, 11.0);
    let time = match_time_range(&updated).unwrap();
    assert_eq!((time.start_hour, time.end_hour), (10.0, 11.0));
    assert_eq!(time.title, "Gym");
}

#[test]
fn highlight_wrapper_and_color_survive_rewrite() {
    let updated = replace_time_range(
        "<highlight color=\"blue\">9am-10am Gym</highlight>",
        10.0,
        11.0,
    );
    assert_eq!(updated, "<highlight color=\"blue\">10am-11am Gym</highlight>");
}

#[test]
fn text_after_the_range_is_untouched() {
    let original = "- [x] 8-9am - Write **draft** notes  ";
    let updated = replace_time_range(original, 8.5, 9.5);
    assert_eq!(updated, "- [x] 8:30am-9:30am - Write **draft** notes  ");
}

#[test]
fn title_edit_keeps_range_tokens() {
    let updated = replace_title("- [ ] `1:15pm-2pm`: Draft", "Final review");
    assert_eq!(updated, "- [ ] `1:15pm-2pm`: Final review");
}

#[test]
fn rescheduled_block_rederives_from_text() {
    let block = scheduled("<highlight color=\"green\">- [ ] 9-10 Focus time</highlight>");
    let moved = block.rescheduled(13.0, 14.25);

    assert_eq!(moved.start, 13.0);
    assert_eq!(moved.end, 14.25);
    assert_eq!(moved.title, "Focus time");
    assert_eq!(moved.highlight.as_deref(), Some("green"));
    assert!(moved.is_task);
    assert_eq!(
        moved.original_text,
        "<highlight color=\"green\">- [ ] 1pm-2:15pm Focus time</highlight>"
    );
}

#[test]
fn retitled_block_recategorizes() {
    let block = scheduled("- [ ] 9-10 Write report");
    assert_eq!(block.category, Category::Work);

    let renamed = block.retitled("Team sync");
    assert_eq!(renamed.title, "Team sync");
    assert_eq!(renamed.category, Category::Meeting);
    assert_eq!(renamed.original_text, "- [ ] 9-10 Team sync");
    assert_eq!((renamed.start, renamed.end), (9.0, 10.0));
}

#[test]
fn draft_blocks_carry_temporary_ids() {
    let draft = ScheduledBlock::draft(9.0, 10.5, " Deep work ");
    assert!(is_temporary_id(draft.id.as_deref().unwrap()));
    assert_eq!(draft.original_text, "9am-10:30am Deep work");
    assert_eq!(draft.category, Category::Work);

    let moved = draft.rescheduled(10.0, 11.0);
    assert_eq!(moved.id, draft.id);
    assert_eq!(moved.original_text, "10am-11am Deep work");
}

#[test]
fn scheduling_a_todo_prepends_a_range() {
    let task = match classify("- [ ] Email Sam", None) {
        Some(Classified::Unscheduled(task)) => task,
        other => panic!("todo should classify as unscheduled, got {other:?}"),
    };
    let block = task.schedule(13.0, 13.5);
    assert_eq!((block.start, block.end), (13.0, 13.5));
    assert!(block.original_text.starts_with("1pm-1:30pm "));
    assert!(block.original_text.ends_with("Email Sam"));
}

#[test]
fn kanban_retitle_keeps_checkbox_style() {
    assert_eq!(
        retitle_task("[x] Old title", "  New title ").as_deref(),
        Some("[x] New title")
    );
    assert_eq!(retitle_task("- [ ] Same", "Same"), None);
}
