//! Week window used by the 7-day board.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// First day of the displayed week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

/// Inclusive date range shown as one column per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekWindow {
    /// Seven-day window containing `date`.
    pub fn containing(date: NaiveDate, week_start: WeekStart) -> Self {
        let offset = match week_start {
            WeekStart::Monday => date.weekday().num_days_from_monday(),
            WeekStart::Sunday => date.weekday().num_days_from_sunday(),
        };
        let start = date - Duration::days(i64::from(offset));
        Self {
            start,
            end: start + Duration::days(6),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every date in the window, in order.
    pub fn days(&self) -> Vec<NaiveDate> {
        self.start
            .iter_days()
            .take_while(|day| *day <= self.end)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn monday_and_sunday_first_windows() {
        // 2024-06-12 is a Wednesday.
        let monday = WeekWindow::containing(date("2024-06-12"), WeekStart::Monday);
        assert_eq!(monday.start, date("2024-06-10"));
        assert_eq!(monday.end, date("2024-06-16"));

        let sunday = WeekWindow::containing(date("2024-06-12"), WeekStart::Sunday);
        assert_eq!(sunday.start, date("2024-06-09"));
        assert_eq!(sunday.days().len(), 7);
    }

    #[test]
    fn window_start_day_maps_to_itself() {
        let window = WeekWindow::containing(date("2024-06-09"), WeekStart::Sunday);
        assert_eq!(window.start, date("2024-06-09"));
        assert!(window.contains(date("2024-06-15")));
        assert!(!window.contains(date("2024-06-16")));
    }
}
