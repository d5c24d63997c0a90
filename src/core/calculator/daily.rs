//! Daily aggregation: a pure function of one date's rows plus the
//! previous date's intervals (for the rest rule) and the sampled clock.

use super::rest::{first_start_clock, last_end_clock, rest_warning};
use crate::models::pause::Break;
use crate::models::summary::DaySummary;
use crate::models::work_interval::WorkInterval;
use crate::utils::time::minutes_of_day;
use chrono::{NaiveDate, NaiveDateTime};

/// Elapsed minutes of an open interval, floored at zero so a start in the
/// future (or clock skew) never yields negative time.
pub fn live_minutes(start_minutes: i64, now_minutes: i64) -> i64 {
    (now_minutes - start_minutes).max(0)
}

/// The interval a running timer refers to: open, latest start first.
pub fn open_interval(intervals: &[WorkInterval]) -> Option<&WorkInterval> {
    intervals
        .iter()
        .filter(|wi| wi.is_open())
        .max_by_key(|wi| (wi.start_minutes(), wi.id))
}

pub fn summarize_day(
    date: NaiveDate,
    intervals: &[WorkInterval],
    breaks: &[Break],
    previous_day: &[WorkInterval],
    now: NaiveDateTime,
) -> DaySummary {
    let work_minutes: i64 = intervals.iter().filter_map(|wi| wi.duration_minutes).sum();
    let break_minutes: i64 = breaks.iter().map(|b| b.duration_minutes).sum();
    let recorded_minutes = (work_minutes - break_minutes).max(0);

    let running = open_interval(intervals);
    let running_minutes = running
        .and_then(|wi| wi.start_minutes())
        .map(|start| live_minutes(start, minutes_of_day(now.time())))
        .unwrap_or(0);

    let warnings: Vec<String> = rest_warning(previous_day, intervals).into_iter().collect();

    DaySummary {
        date,
        work_minutes,
        break_minutes,
        recorded_minutes,
        running_minutes,
        effective_minutes: recorded_minutes + running_minutes,
        first_start: first_start_clock(intervals),
        last_end: last_end_clock(intervals),
        running_since: running.and_then(|wi| wi.start_time.clone()),
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calculator::test_support::{brk, day, work, work_on};

    fn at(clock: &str) -> NaiveDateTime {
        day("2025-06-02").and_time(chrono::NaiveTime::parse_from_str(clock, "%H:%M").unwrap())
    }

    #[test]
    fn recorded_is_work_minus_breaks() {
        let intervals = vec![work(1, "08:00", Some("12:00")), work(2, "12:30", Some("16:30"))];
        let breaks = vec![brk(1, None, None, 30)];
        let s = summarize_day(day("2025-06-02"), &intervals, &breaks, &[], at("18:00"));

        assert_eq!(s.work_minutes, 480);
        assert_eq!(s.break_minutes, 30);
        assert_eq!(s.recorded_minutes, 450);
        assert_eq!(s.running_minutes, 0);
        assert_eq!(s.effective_minutes, 450);
        assert_eq!(s.first_start.as_deref(), Some("08:00"));
        assert_eq!(s.last_end.as_deref(), Some("16:30"));
    }

    #[test]
    fn recorded_is_clamped_at_zero() {
        let intervals = vec![work(1, "08:00", Some("16:00"))];
        let breaks = vec![brk(1, None, None, 500)];
        let s = summarize_day(day("2025-06-02"), &intervals, &breaks, &[], at("18:00"));
        assert_eq!(s.recorded_minutes, 0);
    }

    #[test]
    fn running_interval_adds_live_minutes() {
        let intervals = vec![work(1, "08:00", Some("12:00")), work(2, "13:00", None)];
        let s = summarize_day(day("2025-06-02"), &intervals, &[], &[], at("14:20"));

        assert_eq!(s.work_minutes, 240);
        assert_eq!(s.running_minutes, 80);
        assert_eq!(s.effective_minutes, 320);
        assert_eq!(s.running_since.as_deref(), Some("13:00"));
    }

    #[test]
    fn future_start_never_goes_negative() {
        let intervals = vec![work(1, "15:00", None)];
        let s = summarize_day(day("2025-06-02"), &intervals, &[], &[], at("14:00"));
        assert_eq!(s.running_minutes, 0);
        assert_eq!(live_minutes(900, 840), 0);
    }

    #[test]
    fn rest_warning_is_attached() {
        let prev = vec![work_on(9, "2025-06-01", "16:00", Some("23:30"))];
        let intervals = vec![work(1, "06:00", Some("10:00"))];
        let s = summarize_day(day("2025-06-02"), &intervals, &[], &prev, at("12:00"));
        assert_eq!(s.warnings, vec!["11-hour rest rule not met: only 6h 30m".to_string()]);
    }
}
