//! External task shape consumed by the Kanban board.
//!
//! # Responsibility
//! - Mirror the task JSON returned by the note service.
//! - Resolve provenance and the effective date used for bucketing.
//!
//! # Invariants
//! - Tasks are read-only here; the note service owns them.
//! - Empty or malformed date strings decode as "no date".

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Task lifecycle state reported by the note service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Todo,
    Done,
    #[serde(alias = "cancelled")]
    Canceled,
    /// Any state this crate does not know; treated as open.
    #[serde(other)]
    Other,
}

impl TaskState {
    /// Returns whether the task is finished (done or canceled).
    pub fn is_closed(self) -> bool {
        matches!(self, Self::Done | Self::Canceled)
    }
}

/// Task metadata attached by the note service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInfo {
    #[serde(default)]
    pub state: Option<TaskState>,
    #[serde(
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub schedule_date: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub deadline_date: Option<NaiveDate>,
}

/// Where a task lives in the note service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LocationType {
    Inbox,
    DailyNote,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskLocation {
    #[serde(rename = "type")]
    pub kind: LocationType,
    #[serde(
        default,
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<NaiveDate>,
}

/// Task as returned by the note service task API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CraftTask {
    pub id: String,
    #[serde(default)]
    pub markdown: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_info: Option<TaskInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<TaskLocation>,
}

/// Provenance of a task for bucketing purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOrigin {
    /// Inbox task; its date is the optional schedule date.
    Inbox,
    /// Task embedded in a daily note; its date is the note's date.
    DailyNote,
    /// Missing or unrecognized location.
    Unknown,
}

impl CraftTask {
    pub fn state(&self) -> Option<TaskState> {
        self.task_info.as_ref().and_then(|info| info.state)
    }

    /// Returns whether the task is neither done nor canceled.
    pub fn is_open(&self) -> bool {
        !self.state().is_some_and(TaskState::is_closed)
    }

    pub fn schedule_date(&self) -> Option<NaiveDate> {
        self.task_info.as_ref().and_then(|info| info.schedule_date)
    }

    pub fn origin(&self) -> TaskOrigin {
        match self.location.as_ref().map(|location| location.kind) {
            Some(LocationType::Inbox) => TaskOrigin::Inbox,
            Some(LocationType::DailyNote) => TaskOrigin::DailyNote,
            Some(LocationType::Other) | None => TaskOrigin::Unknown,
        }
    }

    /// Date used for bucketing: note date for daily-note tasks, schedule date
    /// for inbox tasks, none otherwise.
    pub fn effective_date(&self) -> Option<NaiveDate> {
        match self.origin() {
            TaskOrigin::DailyNote => self.location.as_ref().and_then(|location| location.date),
            TaskOrigin::Inbox => self.schedule_date(),
            TaskOrigin::Unknown => None,
        }
    }
}

/// Parses an ISO `YYYY-MM-DD` prefix; anything else is `None`.
pub(crate) fn parse_date_prefix(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date_prefix))
}
