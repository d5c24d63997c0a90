use chrono::NaiveDate;
use serde::Serialize;

/// Legacy flat time entry: like a work interval without timer semantics.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TimeEntry {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub duration_minutes: i64,
    pub billable: bool,
    pub project_id: Option<i64>,
    pub project_name: Option<String>,
    pub task_id: Option<i64>,
    pub task_name: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default)]
pub struct NewTimeEntry {
    pub date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub duration_minutes: Option<i64>,
    pub billable: bool,
    pub project_id: Option<i64>,
    pub task_id: Option<i64>,
    pub notes: Option<String>,
}
