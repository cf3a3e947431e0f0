//! Scheduled blocks and unscheduled tasks parsed from note lines.
//!
//! # Responsibility
//! - Define `ScheduledBlock`, `UnscheduledTask` and the parse result envelope.
//! - Produce edited copies whose cached fields are re-derived from new text.
//!
//! # Invariants
//! - `id == None` means the external service has not assigned an id yet.
//! - Temporary ids start with [`TEMP_ID_PREFIX`] and must be swapped for the
//!   service id once the insert round-trip completes.

use crate::parse::classify::{categorize, classify_line, Classified, LineContext};
use crate::text::mutate::{replace_time_range, replace_title};
use crate::text::time::format_time_range_for_text;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix marking locally generated ids.
pub const TEMP_ID_PREFIX: &str = "local-";

/// Generates a temporary id for a block not yet persisted.
pub fn temporary_id() -> String {
    format!("{TEMP_ID_PREFIX}{}", Uuid::new_v4())
}

/// Returns whether `id` was produced by [`temporary_id`].
pub fn is_temporary_id(id: &str) -> bool {
    id.starts_with(TEMP_ID_PREFIX)
}

/// Keyword category of a scheduled block title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Work,
    Meeting,
    Health,
    Personal,
    Default,
}

/// Line that carries both a start and an end time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledBlock {
    pub id: Option<String>,
    /// Decimal hour.
    pub start: f64,
    /// Decimal hour; may be equal to or before `start`.
    pub end: f64,
    pub title: String,
    pub category: Category,
    /// Color name or hex value from the wrapper or the node fields.
    pub highlight: Option<String>,
    /// Verbatim source line.
    pub original_text: String,
    pub is_task: bool,
    pub checked: bool,
}

impl ScheduledBlock {
    /// Creates a new, not-yet-persisted block with a temporary id.
    pub fn draft(start: f64, end: f64, title: &str) -> Self {
        let title = title.trim();
        Self {
            id: Some(temporary_id()),
            start,
            end,
            title: title.to_string(),
            category: categorize(title),
            highlight: None,
            original_text: format!("{} {title}", format_time_range_for_text(start, end)),
            is_task: false,
            checked: false,
        }
    }

    /// Returns a copy moved/resized to `start`-`end` with rewritten text.
    pub fn rescheduled(&self, start: f64, end: f64) -> Self {
        let text = replace_time_range(&self.original_text, start, end);
        self.rederived(text).unwrap_or_else(|text| Self {
            start,
            end,
            original_text: text,
            ..self.clone()
        })
    }

    /// Returns a copy with a new title and rewritten text.
    pub fn retitled(&self, title: &str) -> Self {
        let text = replace_title(&self.original_text, title);
        self.rederived(text).unwrap_or_else(|text| Self {
            title: title.trim().to_string(),
            category: categorize(title),
            original_text: text,
            ..self.clone()
        })
    }

    /// Returns whether `hour` falls inside `[start, end)`.
    pub fn is_current_at(&self, hour: f64) -> bool {
        self.start <= hour && hour < self.end
    }

    /// Re-derives the cached fields from `text`, handing the text back on failure.
    fn rederived(&self, text: String) -> Result<Self, String> {
        let context = LineContext {
            id: self.id.as_deref(),
            highlight: self.highlight.as_deref(),
            hint: None,
        };
        match classify_line(&text, &context) {
            Some(Classified::Scheduled(block)) => Ok(block),
            _ => Err(text),
        }
    }
}

/// Checkbox line with no time range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnscheduledTask {
    pub id: Option<String>,
    pub text: String,
    pub checked: bool,
    /// Verbatim source line.
    pub original_text: String,
}

impl UnscheduledTask {
    /// Schedules the task at `start`-`end`, producing a scheduled block.
    pub fn schedule(&self, start: f64, end: f64) -> ScheduledBlock {
        let text = replace_time_range(&self.original_text, start, end);
        let context = LineContext {
            id: self.id.as_deref(),
            highlight: None,
            hint: None,
        };
        match classify_line(&text, &context) {
            Some(Classified::Scheduled(block)) => block,
            _ => ScheduledBlock {
                id: self.id.clone(),
                start,
                end,
                title: self.text.clone(),
                category: categorize(&self.text),
                highlight: None,
                original_text: text,
                is_task: true,
                checked: self.checked,
            },
        }
    }
}

/// Output of the note walker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedBlocks {
    /// Sorted ascending by start time; ties keep discovery order.
    pub scheduled: Vec<ScheduledBlock>,
    /// Discovery order.
    pub unscheduled: Vec<UnscheduledTask>,
}
