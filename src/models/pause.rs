use crate::utils::time::parse_clock_opt;
use chrono::NaiveDate;
use serde::Serialize;

/// A break. Either positioned (start/end) or duration-only; the duration is
/// always resolved once stored.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Break {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub duration_minutes: i64,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Break {
    pub fn closed_range(&self) -> Option<(i64, i64)> {
        match (
            parse_clock_opt(self.start_time.as_deref()),
            parse_clock_opt(self.end_time.as_deref()),
        ) {
            (Some(s), Some(e)) if e > s => Some((s, e)),
            _ => None,
        }
    }

    pub fn is_duration_only(&self) -> bool {
        self.start_time.is_none() && self.end_time.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewBreak {
    pub date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub duration_minutes: Option<i64>,
    pub notes: Option<String>,
}

/// Partial update of a break; `Some(None)` clears a nullable column.
#[derive(Debug, Clone, Default)]
pub struct BreakPatch {
    pub date: Option<NaiveDate>,
    pub start_time: Option<Option<String>>,
    pub end_time: Option<Option<String>>,
    pub duration_minutes: Option<Option<i64>>,
    pub notes: Option<Option<String>>,
}
