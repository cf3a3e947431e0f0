//! Single-line classification into scheduled blocks and unscheduled tasks.
//!
//! # Responsibility
//! - Normalize one line (bullet, highlight) and run the recognition cascade.
//! - Apply structural list-style / task-state hints from the host node.
//! - Assign a keyword category to scheduled titles.
//!
//! # Invariants
//! - Cascade order is fixed: task-with-time, bare time, todo, structural task.
//! - Host task state wins over a lexical `[x]` when both are present.
//! - Category rules are evaluated in order; the first match wins.

use crate::model::block::{Category, ScheduledBlock, UnscheduledTask};
use crate::model::payload::ListStyle;
use crate::model::task::TaskState;
use crate::text::markup::{has_checked_box, strip_bullet, strip_checkbox, strip_highlight};
use crate::text::time::{match_task_with_time_range, match_time_range, match_todo};
use once_cell::sync::Lazy;
use regex::Regex;

static CATEGORY_RULES: Lazy<Vec<(Regex, Category)>> = Lazy::new(|| {
    [
        (r"deep work|focus|code|write|develop|build", Category::Work),
        (r"call|meeting|sync|chat|standup|1:1|interview", Category::Meeting),
        (r"gym|exercise|workout|run|yoga|walk|health|meditat", Category::Health),
        (r"lunch|dinner|breakfast|break|personal|family|friend", Category::Personal),
    ]
    .into_iter()
    .map(|(pattern, category)| {
        (
            Regex::new(&format!("(?i){pattern}")).expect("valid category regex"),
            category,
        )
    })
    .collect()
});

/// Structural facts the host reports about a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StructuralHint {
    pub list_style: Option<ListStyle>,
    pub task_state: Option<TaskState>,
}

impl StructuralHint {
    fn is_task_like(&self) -> bool {
        self.list_style.is_some_and(ListStyle::is_task_like)
    }

    /// Checked state from the host, when it reports one.
    fn checked(&self) -> Option<bool> {
        self.task_state.map(|state| state == TaskState::Done)
    }
}

/// Node-level data attached to every entity classified from one line.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineContext<'a> {
    pub id: Option<&'a str>,
    /// Structural color; a highlight wrapper in the text overrides it.
    pub highlight: Option<&'a str>,
    pub hint: Option<StructuralHint>,
}

/// Outcome of classifying one line.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    Scheduled(ScheduledBlock),
    Unscheduled(UnscheduledTask),
}

/// Returns the category of a scheduled title.
pub fn categorize(title: &str) -> Category {
    CATEGORY_RULES
        .iter()
        .find(|(pattern, _)| pattern.is_match(title))
        .map(|(_, category)| *category)
        .unwrap_or(Category::Default)
}

/// Classifies one raw line with an optional structural hint.
pub fn classify(raw_line: &str, hint: Option<StructuralHint>) -> Option<Classified> {
    classify_line(
        raw_line,
        &LineContext {
            hint,
            ..LineContext::default()
        },
    )
}

/// Classifies one raw line; `original_text` of the result is `raw_line` verbatim.
pub fn classify_line(raw_line: &str, context: &LineContext<'_>) -> Option<Classified> {
    let trimmed = raw_line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let stripped = strip_highlight(strip_bullet(trimmed));
    let text = stripped.content.trim();
    let highlight = stripped
        .color
        .or_else(|| context.highlight.map(str::to_string));
    let structural_checked = context.hint.and_then(|hint| hint.checked());
    let id = context.id.map(str::to_string);

    let scheduled = |start: f64, end: f64, title: String, is_task: bool, checked: bool| {
        Classified::Scheduled(ScheduledBlock {
            id: id.clone(),
            start,
            end,
            category: categorize(&title),
            title,
            highlight: highlight.clone(),
            original_text: raw_line.to_string(),
            is_task,
            checked,
        })
    };

    if let Some(task) = match_task_with_time_range(text) {
        let checked = structural_checked.unwrap_or(task.checked);
        return Some(scheduled(
            task.time.start_hour,
            task.time.end_hour,
            task.time.title,
            true,
            checked,
        ));
    }

    if let Some(time) = match_time_range(text) {
        return Some(scheduled(
            time.start_hour,
            time.end_hour,
            time.title,
            false,
            false,
        ));
    }

    if let Some(todo) = match_todo(text) {
        return Some(Classified::Unscheduled(UnscheduledTask {
            id,
            text: todo.text,
            checked: structural_checked.unwrap_or(todo.checked),
            original_text: raw_line.to_string(),
        }));
    }

    let hint = context.hint?;
    if !hint.is_task_like() {
        return None;
    }
    let body = strip_checkbox(text);
    if body.is_empty() || match_time_range(body).is_some() {
        return None;
    }
    Some(Classified::Unscheduled(UnscheduledTask {
        id,
        text: body.to_string(),
        checked: structural_checked.unwrap_or_else(|| has_checked_box(text)),
        original_text: raw_line.to_string(),
    }))
}
