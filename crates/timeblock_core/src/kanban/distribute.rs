//! Task-to-column distribution for the Kanban board.
//!
//! # Responsibility
//! - Drop closed (done/canceled) tasks.
//! - Bucket open tasks by provenance and effective date against "today" or
//!   a week window.
//! - Merge task lists fetched from several scopes.
//!
//! # Invariants
//! - Distribution is a pure function of `(tasks, today, options)`.
//! - Tasks keep their input order inside each column.
//! - Standard mode always yields `inbox, backlog, today, future`; week mode
//!   yields `inbox, backlog, <one column per window day>, future`.

use crate::kanban::window::{WeekStart, WeekWindow};
use crate::model::task::{CraftTask, TaskOrigin};
use chrono::{Duration, NaiveDate};
use log::debug;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// Column identity: a fixed bucket name or a window date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnId {
    Inbox,
    Backlog,
    Today,
    Date(NaiveDate),
    Future,
}

impl Display for ColumnId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inbox => write!(f, "inbox"),
            Self::Backlog => write!(f, "backlog"),
            Self::Today => write!(f, "today"),
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Future => write!(f, "future"),
        }
    }
}

impl Serialize for ColumnId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One board column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    /// Whether this column represents "today".
    pub is_today: bool,
    pub tasks: Vec<CraftTask>,
}

impl Column {
    fn empty(id: ColumnId, title: impl Into<String>, is_today: bool) -> Self {
        Self {
            id,
            title: title.into(),
            is_today,
            tasks: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoardMode {
    /// Four fixed columns around today.
    #[default]
    Standard,
    /// Inbox, backlog, one column per window day, future.
    Week,
}

/// Distribution options.
///
/// In week mode a missing window is derived from `today` and `week_start`; a
/// start without an end spans seven days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DistributeOptions {
    pub mode: BoardMode,
    pub window_start: Option<NaiveDate>,
    pub window_end: Option<NaiveDate>,
    pub week_start: WeekStart,
}

impl DistributeOptions {
    pub fn standard() -> Self {
        Self::default()
    }

    pub fn week(week_start: WeekStart) -> Self {
        Self {
            mode: BoardMode::Week,
            week_start,
            ..Self::default()
        }
    }

    /// Window used in week mode; `None` in standard mode.
    pub fn window(&self, today: NaiveDate) -> Option<WeekWindow> {
        if self.mode != BoardMode::Week {
            return None;
        }
        Some(match (self.window_start, self.window_end) {
            (Some(start), Some(end)) => WeekWindow { start, end },
            (Some(start), None) => WeekWindow {
                start,
                end: start + Duration::days(6),
            },
            _ => WeekWindow::containing(today, self.week_start),
        })
    }
}

/// Column a task belongs to, or `None` for closed tasks.
pub fn column_for_task(
    task: &CraftTask,
    today: NaiveDate,
    options: &DistributeOptions,
) -> Option<ColumnId> {
    if !task.is_open() {
        return None;
    }
    Some(match options.window(today) {
        None => standard_column(task, today),
        Some(window) => week_column(task, window),
    })
}

fn standard_column(task: &CraftTask, today: NaiveDate) -> ColumnId {
    let date = match (task.origin(), task.effective_date()) {
        (TaskOrigin::Unknown, _) | (TaskOrigin::Inbox, None) => return ColumnId::Inbox,
        (TaskOrigin::DailyNote, None) => return ColumnId::Today,
        (_, Some(date)) => date,
    };
    match date.cmp(&today) {
        Ordering::Less => ColumnId::Backlog,
        Ordering::Equal => ColumnId::Today,
        Ordering::Greater => ColumnId::Future,
    }
}

fn week_column(task: &CraftTask, window: WeekWindow) -> ColumnId {
    let date = match (task.origin(), task.effective_date()) {
        (TaskOrigin::Unknown, _) | (TaskOrigin::Inbox, None) => return ColumnId::Inbox,
        (TaskOrigin::DailyNote, None) => return ColumnId::Backlog,
        (_, Some(date)) => date,
    };
    if date < window.start {
        ColumnId::Backlog
    } else if date > window.end {
        ColumnId::Future
    } else {
        ColumnId::Date(date)
    }
}

fn empty_columns(today: NaiveDate, window: Option<WeekWindow>) -> Vec<Column> {
    let mut columns = vec![
        Column::empty(ColumnId::Inbox, "Inbox", false),
        Column::empty(ColumnId::Backlog, "Backlog", false),
    ];
    match window {
        None => columns.push(Column::empty(ColumnId::Today, "Today", true)),
        Some(window) => {
            for day in window.days() {
                let weekday = day.format("%a").to_string();
                let is_today = day == today;
                let title = if is_today {
                    format!("{weekday} (Today)")
                } else {
                    weekday
                };
                columns.push(Column::empty(ColumnId::Date(day), title, is_today));
            }
        }
    }
    columns.push(Column::empty(ColumnId::Future, "Future", false));
    columns
}

/// Distributes open tasks into board columns.
pub fn distribute(
    tasks: &[CraftTask],
    today: NaiveDate,
    options: &DistributeOptions,
) -> Vec<Column> {
    let window = options.window(today);
    let mut columns = empty_columns(today, window);
    let positions: HashMap<ColumnId, usize> = columns
        .iter()
        .enumerate()
        .map(|(index, column)| (column.id, index))
        .collect();

    let mut skipped = 0usize;
    for task in tasks {
        let Some(column_id) = column_for_task(task, today, options) else {
            skipped += 1;
            continue;
        };
        if let Some(&index) = positions.get(&column_id) {
            columns[index].tasks.push(task.clone());
        }
    }

    debug!(
        "event=distribute module=kanban status=ok mode={:?} columns={} tasks={} skipped={}",
        options.mode,
        columns.len(),
        tasks.len(),
        skipped
    );
    columns
}

/// Merges task lists fetched from several scopes, de-duplicating by id.
///
/// A later copy of a task replaces an earlier one but keeps its first-seen
/// position.
pub fn merge_task_scopes(scopes: &[Vec<CraftTask>]) -> Vec<CraftTask> {
    let mut merged: Vec<CraftTask> = Vec::new();
    let mut index_by_id: HashMap<String, usize> = HashMap::new();

    for task in scopes.iter().flatten() {
        match index_by_id.get(&task.id) {
            Some(&index) => merged[index] = task.clone(),
            None => {
                index_by_id.insert(task.id.clone(), merged.len());
                merged.push(task.clone());
            }
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::{LocationType, TaskInfo, TaskLocation, TaskState};

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    fn daily(id: &str, day: &str) -> CraftTask {
        CraftTask {
            id: id.to_string(),
            markdown: format!("- [ ] {id}"),
            task_info: None,
            location: Some(TaskLocation {
                kind: LocationType::DailyNote,
                date: Some(date(day)),
            }),
        }
    }

    fn inbox(id: &str, scheduled: Option<&str>) -> CraftTask {
        CraftTask {
            id: id.to_string(),
            markdown: format!("- [ ] {id}"),
            task_info: Some(TaskInfo {
                state: Some(TaskState::Todo),
                schedule_date: scheduled.map(date),
                deadline_date: None,
            }),
            location: Some(TaskLocation {
                kind: LocationType::Inbox,
                date: None,
            }),
        }
    }

    fn ids(column: &Column) -> Vec<&str> {
        column.tasks.iter().map(|task| task.id.as_str()).collect()
    }

    #[test]
    fn standard_mode_buckets_by_effective_date() {
        let tasks = vec![
            daily("past", "2024-06-05"),
            daily("now", "2024-06-10"),
            daily("later", "2024-06-20"),
            inbox("loose", None),
            inbox("planned", Some("2024-06-10")),
        ];
        let columns = distribute(&tasks, date("2024-06-10"), &DistributeOptions::standard());

        let order: Vec<ColumnId> = columns.iter().map(|column| column.id).collect();
        assert_eq!(
            order,
            vec![
                ColumnId::Inbox,
                ColumnId::Backlog,
                ColumnId::Today,
                ColumnId::Future
            ]
        );
        assert_eq!(ids(&columns[0]), vec!["loose"]);
        assert_eq!(ids(&columns[1]), vec!["past"]);
        assert_eq!(ids(&columns[2]), vec!["now", "planned"]);
        assert_eq!(ids(&columns[3]), vec!["later"]);
        assert!(columns[2].is_today);
    }

    #[test]
    fn closed_tasks_are_excluded() {
        let mut done = inbox("done", None);
        done.task_info.as_mut().unwrap().state = Some(TaskState::Done);
        let mut canceled = daily("canceled", "2024-06-10");
        canceled.task_info = Some(TaskInfo {
            state: Some(TaskState::Canceled),
            ..TaskInfo::default()
        });

        let columns = distribute(
            &[done, canceled],
            date("2024-06-10"),
            &DistributeOptions::standard(),
        );
        assert!(columns.iter().all(|column| column.tasks.is_empty()));
    }

    #[test]
    fn distribution_is_idempotent() {
        let tasks = vec![daily("a", "2024-06-01"), inbox("b", Some("2024-07-01"))];
        let today = date("2024-06-10");
        let options = DistributeOptions::standard();
        assert_eq!(
            distribute(&tasks, today, &options),
            distribute(&tasks, today, &options)
        );
    }

    #[test]
    fn week_mode_has_one_column_per_day() {
        let tasks = vec![
            daily("before", "2024-06-09"),
            daily("wed", "2024-06-12"),
            inbox("sun", Some("2024-06-16")),
            daily("after", "2024-06-17"),
        ];
        let today = date("2024-06-12");
        let columns = distribute(&tasks, today, &DistributeOptions::week(WeekStart::Monday));

        assert_eq!(columns.len(), 10);
        assert_eq!(columns[2].id, ColumnId::Date(date("2024-06-10")));
        assert_eq!(columns[2].title, "Mon");
        assert_eq!(columns[4].title, "Wed (Today)");
        assert!(columns[4].is_today);
        assert_eq!(ids(&columns[1]), vec!["before"]);
        assert_eq!(ids(&columns[4]), vec!["wed"]);
        assert_eq!(ids(&columns[8]), vec!["sun"]);
        assert_eq!(ids(&columns[9]), vec!["after"]);
    }

    #[test]
    fn explicit_window_start_spans_seven_days() {
        let options = DistributeOptions {
            window_start: Some(date("2024-06-03")),
            ..DistributeOptions::week(WeekStart::Monday)
        };
        let window = options.window(date("2024-06-12")).unwrap();
        assert_eq!(window.end, date("2024-06-09"));
        assert_eq!(
            column_for_task(&daily("x", "2024-06-12"), date("2024-06-12"), &options),
            Some(ColumnId::Future)
        );
    }

    #[test]
    fn merge_keeps_first_position_and_latest_copy() {
        let first = vec![inbox("a", None), inbox("b", None)];
        let mut updated = inbox("a", Some("2024-06-11"));
        updated.markdown = "- [ ] a (moved)".to_string();
        let second = vec![daily("c", "2024-06-10"), updated.clone()];

        let merged = merge_task_scopes(&[first, second]);
        let merged_ids: Vec<&str> = merged.iter().map(|task| task.id.as_str()).collect();
        assert_eq!(merged_ids, vec!["a", "b", "c"]);
        assert_eq!(merged[0], updated);
    }
}
