//! Row builders shared by the calculator tests.

use crate::models::pause::Break;
use crate::models::work_interval::WorkInterval;
use crate::utils::time::parse_clock;
use chrono::NaiveDate;

pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn work(id: i64, start: &str, end: Option<&str>) -> WorkInterval {
    work_on(id, "2025-06-02", start, end)
}

pub fn work_on(id: i64, date: &str, start: &str, end: Option<&str>) -> WorkInterval {
    let duration = end.and_then(|e| {
        let (s, e) = (parse_clock(start)?, parse_clock(e)?);
        Some(crate::utils::time::round_up_to_quarter_hour(e - s))
    });
    WorkInterval {
        id,
        user_id: 1,
        date: day(date),
        start_time: Some(start.to_string()),
        end_time: end.map(str::to_string),
        duration_minutes: duration,
        project_id: None,
        project_name: None,
        task_id: None,
        task_name: None,
        notes: None,
        created_at: String::new(),
        updated_at: String::new(),
    }
}

pub fn brk(id: i64, start: Option<&str>, end: Option<&str>, minutes: i64) -> Break {
    brk_on(id, "2025-06-02", start, end, minutes)
}

pub fn brk_on(id: i64, date: &str, start: Option<&str>, end: Option<&str>, minutes: i64) -> Break {
    Break {
        id,
        user_id: 1,
        date: day(date),
        start_time: start.map(str::to_string),
        end_time: end.map(str::to_string),
        duration_minutes: minutes,
        notes: None,
        created_at: String::new(),
        updated_at: String::new(),
    }
}
