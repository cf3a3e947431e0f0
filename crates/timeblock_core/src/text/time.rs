//! Time-range recognition and formatting.
//!
//! # Responsibility
//! - Decode `H[:MM][am|pm] <sep> H[:MM][am|pm] <sep> title` expressions.
//! - Convert between 12-hour tokens and decimal hours.
//! - Format decimal hours for note text and for display.
//!
//! # Invariants
//! - Patterns are tried as a strict first-match cascade: task-with-time,
//!   bare time, then todo.
//! - Meridiem is inherited from end to start only, never start to end.
//! - Hour values are not range-checked; `25-26 Gym` decodes as-is.

use crate::text::markup::{strip_bullet, strip_highlight};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Range part shared by every recognition pattern.
///
/// Start/end tokens, the between-times separator (dash run, `to`, arrow), an
/// optional backtick pair and the title separator (dash, colon, whitespace).
const RANGE_BODY: &str = concat!(
    r"`?(?P<sh>[0-9]{1,2})(?::(?P<sm>[0-9]{2}))?\s*(?P<sp>am|pm)?",
    r"\s*(?:[-–—]+|to|->|→)\s*",
    r"(?P<eh>[0-9]{1,2})(?::(?P<em>[0-9]{2}))?\s*(?P<ep>am|pm)?",
    r"`?\s*(?:[-–—:]|\s)\s*(?P<title>.+)$",
);

static TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)^(?:[•\-*+]\s+)?{RANGE_BODY}")).expect("valid time regex")
});
static TASK_WITH_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)^-?\s*\[(?P<box>[ x]?)\]\s*{RANGE_BODY}"))
        .expect("valid task-with-time regex")
});
static TODO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^-?\s*\[(?P<box>[ x]?)\]\s*(?P<text>.+)$").expect("valid todo regex")
});

/// AM/PM designator of a 12-hour time token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    /// Parses `am` / `pm` in any letter case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "am" => Some(Self::Am),
            "pm" => Some(Self::Pm),
            _ => None,
        }
    }
}

/// Decoded time range plus its title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeExpression {
    /// Decimal hour, e.g. `14.5` for 2:30 PM.
    pub start_hour: f64,
    /// Decimal hour; not guaranteed to be after `start_hour`.
    pub end_hour: f64,
    /// Trimmed title text following the range.
    pub title: String,
}

/// Time expression found behind a checkbox token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedTask {
    #[serde(flatten)]
    pub time: TimeExpression,
    pub checked: bool,
}

/// Checkbox line without a time range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub text: String,
    pub checked: bool,
}

/// Result of [`extract_time_range`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedRange {
    pub start: f64,
    pub end: f64,
    pub title: String,
    pub is_task: bool,
    pub checked: bool,
}

/// Converts hour/minute/meridiem tokens to a decimal hour.
///
/// `12 AM` maps to 0 and `12 PM` to 12; a bare hour passes through unchanged.
/// Returns `None` when `hours` is not numeric.
pub fn parse_time(hours: &str, minutes: Option<&str>, meridiem: Option<Meridiem>) -> Option<f64> {
    let mut hour: u32 = hours.trim().parse().ok()?;
    let minute: u32 = match minutes {
        Some(raw) => raw.trim().parse().ok()?,
        None => 0,
    };

    match meridiem {
        Some(Meridiem::Pm) if hour != 12 => hour += 12,
        Some(Meridiem::Am) if hour == 12 => hour = 0,
        _ => {}
    }

    Some(f64::from(hour) + f64::from(minute) / 60.0)
}

fn decode_range(caps: &Captures<'_>) -> Option<TimeExpression> {
    let end_meridiem = caps.name("ep").and_then(|m| Meridiem::parse(m.as_str()));
    let start_meridiem = caps
        .name("sp")
        .and_then(|m| Meridiem::parse(m.as_str()))
        .or(end_meridiem);

    let start_hour = parse_time(
        caps.name("sh")?.as_str(),
        caps.name("sm").map(|m| m.as_str()),
        start_meridiem,
    )?;
    let end_hour = parse_time(
        caps.name("eh")?.as_str(),
        caps.name("em").map(|m| m.as_str()),
        end_meridiem,
    )?;

    let title = caps.name("title")?.as_str().trim();
    if title.is_empty() {
        return None;
    }

    Some(TimeExpression {
        start_hour,
        end_hour,
        title: title.to_string(),
    })
}

fn box_is_checked(caps: &Captures<'_>) -> bool {
    caps.name("box")
        .map(|m| m.as_str().eq_ignore_ascii_case("x"))
        .unwrap_or(false)
}

/// Matches a bare time range (optionally behind one bullet glyph).
pub fn match_time_range(text: &str) -> Option<TimeExpression> {
    let caps = TIME_RE.captures(text)?;
    decode_range(&caps)
}

/// Matches `[ ]` / `[x]` followed by a time range.
pub fn match_task_with_time_range(text: &str) -> Option<TimedTask> {
    let caps = TASK_WITH_TIME_RE.captures(text)?;
    let time = decode_range(&caps)?;
    Some(TimedTask {
        time,
        checked: box_is_checked(&caps),
    })
}

/// Matches a checkbox line with no time requirement.
pub fn match_todo(text: &str) -> Option<TodoItem> {
    let caps = TODO_RE.captures(text)?;
    let body = caps.name("text")?.as_str().trim();
    if body.is_empty() {
        return None;
    }
    Some(TodoItem {
        text: body.to_string(),
        checked: box_is_checked(&caps),
    })
}

fn normalize_for_probe(text: &str) -> String {
    let stripped = strip_highlight(text);
    strip_bullet(&stripped.content).trim().to_string()
}

/// Returns whether the text holds a bare time range after markup stripping.
pub fn has_time_pattern(text: &str) -> bool {
    TIME_RE.is_match(&normalize_for_probe(text))
}

/// Returns whether the text holds a checkbox + time range after markup stripping.
pub fn has_task_with_time_pattern(text: &str) -> bool {
    TASK_WITH_TIME_RE.is_match(&normalize_for_probe(text))
}

/// Extracts a time range from a raw line, trying the task form first.
pub fn extract_time_range(text: &str) -> Option<ExtractedRange> {
    let normalized = normalize_for_probe(text);

    if let Some(task) = match_task_with_time_range(&normalized) {
        return Some(ExtractedRange {
            start: task.time.start_hour,
            end: task.time.end_hour,
            title: task.time.title,
            is_task: true,
            checked: task.checked,
        });
    }

    match_time_range(&normalized).map(|time| ExtractedRange {
        start: time.start_hour,
        end: time.end_hour,
        title: time.title,
        is_task: false,
        checked: false,
    })
}

/// Splits a decimal hour into `(display_hour, minutes, is_pm)`.
fn clock_parts(hour: f64) -> (i64, i64, bool) {
    let mut whole = hour.floor() as i64;
    let mut minutes = ((hour - hour.floor()) * 60.0).round() as i64;
    if minutes == 60 {
        whole += 1;
        minutes = 0;
    }
    // 24 and above wrap to the early hours, never to noon.
    whole = whole.rem_euclid(24);
    let is_pm = whole >= 12;
    let display = if whole == 0 {
        12
    } else if whole > 12 {
        whole - 12
    } else {
        whole
    };
    (display, minutes, is_pm)
}

/// Formats a decimal hour for note text: `9am`, `2:30pm`, `12am`.
pub fn format_time_for_text(hour: f64) -> String {
    let (display, minutes, is_pm) = clock_parts(hour);
    let period = if is_pm { "pm" } else { "am" };
    if minutes == 0 {
        format!("{display}{period}")
    } else {
        format!("{display}:{minutes:02}{period}")
    }
}

/// Formats a decimal hour for display: `9 AM`, `2:30 PM`.
pub fn format_time_for_display(hour: f64) -> String {
    let (display, minutes, is_pm) = clock_parts(hour);
    let period = if is_pm { "PM" } else { "AM" };
    if minutes == 0 {
        format!("{display} {period}")
    } else {
        format!("{display}:{minutes:02} {period}")
    }
}

/// Formats the canonical `start-end` range token used when rewriting text.
pub fn format_time_range_for_text(start: f64, end: f64) -> String {
    format!(
        "{}-{}",
        format_time_for_text(start),
        format_time_for_text(end)
    )
}
