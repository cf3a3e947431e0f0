//! Drop planning for dragging a task onto a board column.
//!
//! # Responsibility
//! - Decide whether a drop is allowed and which update the note service
//!   needs for it.
//!
//! # Invariants
//! - Planning is pure; the caller performs the update and re-distributes.
//! - Inbox cannot take daily-note tasks or scheduled inbox tasks, because the
//!   note service cannot clear a schedule date.

use crate::kanban::distribute::{column_for_task, ColumnId, DistributeOptions};
use crate::model::task::{CraftTask, TaskOrigin};
use chrono::NaiveDate;
use std::fmt::{Display, Formatter};

/// Why a drop was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropRejection {
    /// Task is done or canceled and not shown on the board.
    ClosedTask,
    /// Daily-note tasks always carry a date.
    DailyNoteToInbox,
    /// Schedule dates cannot be cleared.
    ScheduledInboxToInbox,
    /// Task provenance is unknown, so no update can be chosen.
    UnknownLocation,
}

impl Display for DropRejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ClosedTask => write!(f, "task is already closed"),
            Self::DailyNoteToInbox => write!(f, "daily note tasks cannot move to inbox"),
            Self::ScheduledInboxToInbox => {
                write!(f, "scheduled inbox tasks cannot be unscheduled")
            }
            Self::UnknownLocation => write!(f, "task location is unknown"),
        }
    }
}

/// Update required to realize a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropPlan {
    /// Task already sits in the target column.
    NoOp,
    Rejected(DropRejection),
    /// Set `taskInfo.scheduleDate` of an inbox task.
    SetScheduleDate { task_id: String, date: NaiveDate },
    /// Move a daily-note task to the daily note of `date`.
    MoveToDailyNote { task_id: String, date: NaiveDate },
}

/// Plans dropping `task` onto `target`.
pub fn plan_drop(
    task: &CraftTask,
    target: ColumnId,
    today: NaiveDate,
    options: &DistributeOptions,
) -> DropPlan {
    let Some(current) = column_for_task(task, today, options) else {
        return DropPlan::Rejected(DropRejection::ClosedTask);
    };
    if current == target {
        return DropPlan::NoOp;
    }

    let window = options.window(today);
    let date = match target {
        ColumnId::Inbox => {
            return match task.origin() {
                TaskOrigin::DailyNote => DropPlan::Rejected(DropRejection::DailyNoteToInbox),
                TaskOrigin::Inbox => DropPlan::Rejected(DropRejection::ScheduledInboxToInbox),
                TaskOrigin::Unknown => DropPlan::NoOp,
            };
        }
        ColumnId::Today => today,
        ColumnId::Date(date) => date,
        ColumnId::Backlog => {
            let edge = window.map(|window| window.start).unwrap_or(today);
            edge.pred_opt().unwrap_or(edge)
        }
        ColumnId::Future => {
            let edge = window.map(|window| window.end).unwrap_or(today);
            edge.succ_opt().unwrap_or(edge)
        }
    };

    let task_id = task.id.clone();
    match task.origin() {
        TaskOrigin::Inbox => DropPlan::SetScheduleDate { task_id, date },
        TaskOrigin::DailyNote => DropPlan::MoveToDailyNote { task_id, date },
        TaskOrigin::Unknown => DropPlan::Rejected(DropRejection::UnknownLocation),
    }
}
