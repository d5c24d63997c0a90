use crate::utils::time::parse_clock_opt;
use chrono::NaiveDate;
use serde::Serialize;

/// A stored work interval, as read back (with project/task names joined in).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WorkInterval {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,                // ⇔ work_intervals.date (TEXT "YYYY-MM-DD")
    pub start_time: Option<String>,     // ⇔ start_time (TEXT "HH:mm")
    pub end_time: Option<String>,       // NULL while the timer runs
    pub duration_minutes: Option<i64>,  // NULL while the timer runs
    pub project_id: Option<i64>,
    pub project_name: Option<String>,
    pub task_id: Option<i64>,
    pub task_name: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl WorkInterval {
    /// Open = still running (no end recorded yet).
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    pub fn start_minutes(&self) -> Option<i64> {
        parse_clock_opt(self.start_time.as_deref())
    }

    pub fn end_minutes(&self) -> Option<i64> {
        parse_clock_opt(self.end_time.as_deref())
    }

    /// Both endpoints parse and end > start.
    pub fn closed_range(&self) -> Option<(i64, i64)> {
        match (self.start_minutes(), self.end_minutes()) {
            (Some(s), Some(e)) if e > s => Some((s, e)),
            _ => None,
        }
    }
}

/// Input for a fully specified (manual) work interval.
#[derive(Debug, Clone, Default)]
pub struct NewWorkInterval {
    pub date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub project_id: Option<i64>,
    pub task_id: Option<i64>,
    pub notes: Option<String>,
}

/// Partial update: `None` keeps the stored value. For nullable columns
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct WorkIntervalPatch {
    pub date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub project_id: Option<Option<i64>>,
    pub task_id: Option<Option<i64>>,
    pub notes: Option<Option<String>>,
}
