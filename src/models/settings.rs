use serde::Serialize;

/// Singleton settings row.
///
/// Only `target_hours_per_day` feeds a computation (must-work minutes). The
/// remaining limits are stored and shown but nothing enforces them.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Settings {
    pub target_hours_per_day: i64,
    pub max_hours_per_day: i64,
    pub max_hours_per_week: i64,
    pub work_window_start: String,
    pub work_window_end: String,
    pub missing_hours_reminder_time: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_hours_per_day: 8,
            max_hours_per_day: 10,
            max_hours_per_week: 48,
            work_window_start: "06:00".to_string(),
            work_window_end: "22:00".to_string(),
            missing_hours_reminder_time: "18:00".to_string(),
        }
    }
}

impl Settings {
    pub fn target_minutes_per_day(&self) -> i64 {
        self.target_hours_per_day * 60
    }
}
