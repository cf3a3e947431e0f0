//! Core logic for timeblock planning on top of Craft notes.
//! Parses note text into timeblocks, lays them out, and projects tasks onto a
//! Kanban board. Everything outside `settings` and `logging` is pure.

pub mod kanban;
pub mod layout;
pub mod logging;
pub mod model;
pub mod parse;
pub mod settings;
pub mod text;

pub use kanban::distribute::{
    column_for_task, distribute, merge_task_scopes, BoardMode, Column, ColumnId,
    DistributeOptions,
};
pub use kanban::drop::{plan_drop, DropPlan, DropRejection};
pub use kanban::window::{WeekStart, WeekWindow};
// `assign_column_slots` is positional; `assign_columns` keeps one entry per id.
pub use layout::overlap::{assign_column_slots, assign_columns, BlockKey, OverlapColumnInfo};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::block::{
    is_temporary_id, Category, ParsedBlocks, ScheduledBlock, UnscheduledTask,
};
pub use model::payload::{
    parse_iso_date, parse_tasks_json, NoteBlock, NotePayload, PayloadError, PayloadResult,
};
pub use model::task::{CraftTask, TaskInfo, TaskLocation, TaskOrigin, TaskState};
pub use parse::classify::{classify, StructuralHint};
pub use parse::walker::parse_blocks;
pub use settings::{SettingsError, SettingsResult, Theme, TimeblockSettings};
pub use text::mutate::{replace_time_range, replace_title, retitle_task};
pub use text::time::{format_time_for_text, match_time_range, TimeExpression};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
