//! Read-side results of the daily and period aggregators.

use super::work_interval::WorkInterval;
use chrono::{NaiveDate, NaiveDateTime, Weekday};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub work_minutes: i64,
    pub break_minutes: i64,
    /// work − break, floored at zero
    pub recorded_minutes: i64,
    pub running_minutes: i64,
    pub effective_minutes: i64,
    pub first_start: Option<String>,
    pub last_end: Option<String>,
    pub running_since: Option<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DayOverview {
    pub weekday: Weekday,
    pub working_day: bool,
    #[serde(flatten)]
    pub summary: DaySummary,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PeriodTotals {
    pub working_days: i64,
    pub must_minutes: i64,
    pub work_minutes: i64,
    pub break_minutes: i64,
    pub recorded_minutes: i64,
    /// recorded − must
    pub balance_minutes: i64,
}

impl PeriodTotals {
    pub fn absorb(&mut self, other: &PeriodTotals) {
        self.working_days += other.working_days;
        self.must_minutes += other.must_minutes;
        self.work_minutes += other.work_minutes;
        self.break_minutes += other.break_minutes;
        self.recorded_minutes += other.recorded_minutes;
        self.balance_minutes = self.recorded_minutes - self.must_minutes;
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthOverview {
    pub year: i32,
    pub month: u32,
    pub days: Vec<DayOverview>,
    pub totals: PeriodTotals,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TaskRollup {
    pub task_id: Option<i64>,
    pub task_name: String,
    pub minutes: i64,
}

/// Minutes per project; `project_id == None` is the "Unassigned" bucket.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProjectRollup {
    pub project_id: Option<i64>,
    pub project_name: String,
    pub minutes: i64,
    pub tasks: Vec<TaskRollup>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthProjects {
    pub year: i32,
    pub month: u32,
    pub projects: Vec<ProjectRollup>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct YearMonth {
    pub month: u32,
    #[serde(flatten)]
    pub totals: PeriodTotals,
    pub projects: Vec<ProjectRollup>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct YearSummary {
    pub year: i32,
    pub months: Vec<YearMonth>,
    pub totals: PeriodTotals,
    pub projects: Vec<ProjectRollup>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TimerStatus {
    pub date: NaiveDate,
    pub running: bool,
    pub interval: Option<WorkInterval>,
    pub live_minutes: i64,
    pub server_time: NaiveDateTime,
}
