use timeblock_core::text::time::{
    extract_time_range, format_time_for_display, format_time_for_text, has_task_with_time_pattern,
    has_time_pattern, match_task_with_time_range, match_time_range, parse_time, Meridiem,
};

#[test]
fn end_meridiem_is_inherited_by_start() {
    let time = match_time_range("10-11 AM: Standup").unwrap();
    assert_eq!(time.start_hour, 10.0);
    assert_eq!(time.end_hour, 11.0);
    assert_eq!(time.title, "Standup");
}

#[test]
fn minutes_and_pm_convert_to_decimal_hours() {
    let time = match_time_range("2:30pm-3pm Review").unwrap();
    assert_eq!(time.start_hour, 14.5);
    assert_eq!(time.end_hour, 15.0);
    assert_eq!(time.title, "Review");
}

#[test]
fn checked_task_with_range() {
    let task = match_task_with_time_range("[x] 9-10am Gym").unwrap();
    assert_eq!(task.time.start_hour, 9.0);
    assert_eq!(task.time.end_hour, 10.0);
    assert_eq!(task.time.title, "Gym");
    assert!(task.checked);
}

#[test]
fn start_meridiem_is_not_pushed_to_end() {
    let time = match_time_range("11pm-1 Late shift").unwrap();
    assert_eq!(time.start_hour, 23.0);
    assert_eq!(time.end_hour, 1.0);
}

#[test]
fn alternate_separators_and_backticks() {
    for line in [
        "9 to 10 Planning",
        "9->10 Planning",
        "9→10 Planning",
        "9 — 10 Planning",
        "`9-10`: Planning",
    ] {
        let time = match_time_range(line).unwrap_or_else(|| panic!("`{line}` should match"));
        assert_eq!((time.start_hour, time.end_hour), (9.0, 10.0), "{line}");
        assert_eq!(time.title, "Planning", "{line}");
    }
}

#[test]
fn quarter_hours_survive_text_formatting() {
    for quarter in 0..96 {
        let hour = f64::from(quarter) / 4.0;
        let token = format_time_for_text(hour);
        let line = format!("{token}-{token} Check");
        let time = match_time_range(&line).unwrap_or_else(|| panic!("`{line}` should match"));
        assert_eq!(time.start_hour, hour, "{line}");
        assert_eq!(time.end_hour, hour, "{line}");
    }
}

#[test]
fn twelve_oclock_edges() {
    assert_eq!(parse_time("12", None, Some(Meridiem::Am)), Some(0.0));
    assert_eq!(parse_time("12", None, Some(Meridiem::Pm)), Some(12.0));
    assert_eq!(parse_time("7", Some("45"), None), Some(7.75));
    assert_eq!(parse_time("seven", None, None), None);
    assert_eq!(format_time_for_text(0.0), "12am");
    assert_eq!(format_time_for_text(12.0), "12pm");
    assert_eq!(format_time_for_display(14.5), "2:30 PM");
    assert_eq!(format_time_for_display(9.0), "9 AM");
}

#[test]
fn probes_see_through_highlight_and_bullet() {
    let wrapped = "<highlight color=\"red\">• 9-10 Deep work</highlight>";
    assert!(has_time_pattern(wrapped));
    assert!(!has_task_with_time_pattern(wrapped));
    assert!(has_task_with_time_pattern("- [ ] 1pm-2pm Lunch"));
    assert!(!has_time_pattern("Call the bank"));
}

#[test]
fn extract_prefers_task_form() {
    let task = extract_time_range("<highlight color='blue'>[x] 6:15-7am Run</highlight>").unwrap();
    assert!(task.is_task);
    assert!(task.checked);
    assert_eq!((task.start, task.end), (6.25, 7.0));
    assert_eq!(task.title, "Run");

    let bare = extract_time_range("* 4-5pm Reading").unwrap();
    assert!(!bare.is_task);
    assert_eq!((bare.start, bare.end), (16.0, 17.0));

    assert!(extract_time_range("no range here").is_none());
}
