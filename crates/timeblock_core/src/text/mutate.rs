//! In-place rewriting of time ranges and titles inside note lines.
//!
//! # Responsibility
//! - Replace only the time tokens of a line, keeping prefix, backticks,
//!   separator and everything after the range byte-for-byte.
//! - Replace only the title of a line, keeping the time tokens intact.
//! - Re-emit a highlight wrapper around the edited inner content.
//!
//! # Invariants
//! - Rewriting never fails; a line without a range gets a fresh one prepended.
//! - Re-emitted wrappers always use the canonical `<highlight color="…">` form.

use crate::text::markup::{checkbox_prefix, find_highlight, wrap_highlight};
use crate::text::time::format_time_range_for_text;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static TIME_RANGE_REPLACEMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)^(?P<prefix>.*?)(?P<open>`?)",
        r"[0-9]{1,2}(?::[0-9]{2})?\s*(?:am|pm)?",
        r"\s*(?:[-–—]+|to|->|→)\s*",
        r"[0-9]{1,2}(?::[0-9]{2})?\s*(?:am|pm)?",
        r"(?P<close>`?)(?P<sep>\s*(?:[-–—:]|\s)\s*)",
    ))
    .expect("valid time range replacement regex")
});
static FALLBACK_BULLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[•\-*+]\s*").expect("valid fallback bullet regex"));
static LINE_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:[•\-*+]\s+)?(?:\[[ xX]?\]\s*)?").expect("valid line prefix regex")
});

/// Applies `edit` to the highlight inner content when present, else to the whole line.
fn edit_inside_highlight(original: &str, edit: impl FnOnce(&str) -> String) -> String {
    match find_highlight(original) {
        Some(span) => format!(
            "{}{}{}",
            span.before,
            wrap_highlight(&edit(span.inner), span.color),
            span.after
        ),
        None => edit(original),
    }
}

fn group<'t>(caps: &Captures<'t>, name: &str) -> &'t str {
    caps.name(name).map(|m| m.as_str()).unwrap_or("")
}

/// Rewrites the time range of `original_text` to `new_start`-`new_end`.
///
/// Without an existing range, strips one leading bullet and prepends the new
/// range to the remaining text.
pub fn replace_time_range(original_text: &str, new_start: f64, new_end: f64) -> String {
    edit_inside_highlight(original_text, |content| {
        replace_time_in_content(content, new_start, new_end)
    })
}

fn replace_time_in_content(content: &str, new_start: f64, new_end: f64) -> String {
    let range = format_time_range_for_text(new_start, new_end);
    let Some(caps) = TIME_RANGE_REPLACEMENT_RE.captures(content) else {
        let title = FALLBACK_BULLET_RE.replace(content, "");
        return format!("{range} {}", title.trim());
    };

    let matched_end = caps.get(0).map(|m| m.end()).unwrap_or(0);
    format!(
        "{}{}{}{}{}{}",
        group(&caps, "prefix"),
        group(&caps, "open"),
        range,
        group(&caps, "close"),
        group(&caps, "sep"),
        &content[matched_end..]
    )
}

/// Replaces the title that follows the time range, keeping the range untouched.
///
/// A line without a range keeps its bullet/checkbox prefix and gets the new
/// title after it.
pub fn replace_title(original_text: &str, new_title: &str) -> String {
    let new_title = new_title.trim();
    edit_inside_highlight(original_text, |content| {
        match TIME_RANGE_REPLACEMENT_RE.find(content) {
            Some(found) => format!("{}{new_title}", &content[..found.end()]),
            None => {
                let prefix_end = LINE_PREFIX_RE.find(content).map(|m| m.end()).unwrap_or(0);
                format!("{}{new_title}", &content[..prefix_end])
            }
        }
    })
}

/// Rewrites a Kanban task line with new text behind its checkbox prefix.
///
/// Returns `None` when the new text is blank or the line would not change.
pub fn retitle_task(markdown: &str, new_text: &str) -> Option<String> {
    let trimmed = new_text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let updated = format!("{}{trimmed}", checkbox_prefix(markdown));
    if updated == markdown {
        return None;
    }
    Some(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::time::match_time_range;

    #[test]
    fn replaces_only_time_tokens() {
        let updated = replace_time_range("9am-10am Gym", 10.0, 11.0);
        assert_eq!(updated, "10am-11am Gym");
        let time = match_time_range(&updated).expect("updated line should parse");
        assert_eq!((time.start_hour, time.end_hour), (10.0, 11.0));
        assert_eq!(time.title, "Gym");
    }

    #[test]
    fn keeps_prefix_backticks_and_separator() {
        let updated = replace_time_range("- [ ] `8:45am - 9:45am`: Write *draft*", 13.25, 14.0);
        assert_eq!(updated, "- [ ] `1:15pm-2pm`: Write *draft*");
    }

    #[test]
    fn rewrites_inside_highlight_wrapper() {
        let updated = replace_time_range(
            "<highlight color='blue'>9am-10am Gym</highlight>",
            10.0,
            11.0,
        );
        assert_eq!(updated, "<highlight color=\"blue\">10am-11am Gym</highlight>");
    }

    #[test]
    fn prepends_range_when_none_exists() {
        assert_eq!(replace_time_range("- Buy milk", 9.5, 10.0), "9:30am-10am Buy milk");
        assert_eq!(replace_time_range("Buy milk", 9.0, 10.0), "9am-10am Buy milk");
    }

    #[test]
    fn replace_title_keeps_range_and_wrapper() {
        assert_eq!(
            replace_title("- `9-10 AM`: Standup", "Planning"),
            "- `9-10 AM`: Planning"
        );
        assert_eq!(
            replace_title("<highlight color=\"red\">[x] 1pm-2pm Lunch</highlight>", " Dinner "),
            "<highlight color=\"red\">[x] 1pm-2pm Dinner</highlight>"
        );
        assert_eq!(replace_title("- [ ] Old text", "New text"), "- [ ] New text");
    }

    #[test]
    fn retitle_task_uses_checkbox_prefix() {
        assert_eq!(
            retitle_task("- [x] Old", "New").as_deref(),
            Some("- [x] New")
        );
        assert_eq!(retitle_task("Plain", "New").as_deref(), Some("- [ ] New"));
        assert_eq!(retitle_task("- [ ] Same", "Same"), None);
        assert_eq!(retitle_task("- [ ] Same", "   "), None);
    }
}
