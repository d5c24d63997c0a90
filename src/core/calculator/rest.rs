//! Inter-day rest rule: at least 11 hours between the last work of one
//! date and the first work of the next.
//!
//! Only the latest end of the previous date and the earliest start of the
//! current date are compared; gaps inside a day are not considered.

use crate::models::work_interval::WorkInterval;
use crate::utils::time::{MINUTES_PER_DAY, format_clock, format_hm};

pub const MIN_REST_MINUTES: i64 = 11 * 60;

/// Latest end among closed intervals, in minutes.
pub fn last_end(intervals: &[WorkInterval]) -> Option<i64> {
    intervals
        .iter()
        .filter_map(|wi| wi.closed_range())
        .map(|(_, end)| end)
        .max()
}

/// Earliest start among closed intervals, in minutes.
pub fn first_start(intervals: &[WorkInterval]) -> Option<i64> {
    intervals
        .iter()
        .filter_map(|wi| wi.closed_range())
        .map(|(start, _)| start)
        .min()
}

/// Rest between the previous date and the current one, when both sides
/// have closed work.
pub fn rest_minutes(previous_day: &[WorkInterval], current_day: &[WorkInterval]) -> Option<i64> {
    let prev_end = last_end(previous_day)?;
    let curr_start = first_start(current_day)?;
    Some(curr_start + (MINUTES_PER_DAY - prev_end))
}

/// Warning text reporting the actual rest when it is shorter than 11 hours.
pub fn rest_warning(previous_day: &[WorkInterval], current_day: &[WorkInterval]) -> Option<String> {
    let rest = rest_minutes(previous_day, current_day)?;
    (rest < MIN_REST_MINUTES).then(|| format!("11-hour rest rule not met: only {}", format_hm(rest)))
}

/// "HH:mm" helpers for summaries.
pub fn first_start_clock(intervals: &[WorkInterval]) -> Option<String> {
    first_start(intervals).map(format_clock)
}

pub fn last_end_clock(intervals: &[WorkInterval]) -> Option<String> {
    last_end(intervals).map(format_clock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calculator::test_support::work_on;

    #[test]
    fn short_rest_reports_actual_rest() {
        let prev = vec![work_on(1, "2025-06-01", "15:00", Some("23:30"))];
        let curr = vec![work_on(2, "2025-06-02", "06:00", Some("10:00"))];

        assert_eq!(rest_minutes(&prev, &curr), Some(390));
        assert_eq!(
            rest_warning(&prev, &curr).as_deref(),
            Some("11-hour rest rule not met: only 6h 30m")
        );
    }

    #[test]
    fn exactly_eleven_hours_is_enough() {
        let prev = vec![work_on(1, "2025-06-01", "12:00", Some("20:00"))];
        let curr = vec![work_on(2, "2025-06-02", "07:00", Some("12:00"))];
        assert_eq!(rest_minutes(&prev, &curr), Some(660));
        assert_eq!(rest_warning(&prev, &curr), None);
    }

    #[test]
    fn uses_latest_end_and_earliest_start() {
        let prev = vec![
            work_on(1, "2025-06-01", "08:00", Some("12:00")),
            work_on(2, "2025-06-01", "18:00", Some("22:00")),
        ];
        let curr = vec![
            work_on(3, "2025-06-02", "13:00", Some("15:00")),
            work_on(4, "2025-06-02", "07:30", Some("09:00")),
        ];
        // 22:00 → 07:30
        assert_eq!(rest_minutes(&prev, &curr), Some(570));
    }

    #[test]
    fn no_warning_without_both_boundaries() {
        let curr = vec![work_on(1, "2025-06-02", "06:00", Some("10:00"))];
        assert_eq!(rest_warning(&[], &curr), None);

        let prev = vec![work_on(2, "2025-06-01", "20:00", Some("23:00"))];
        assert_eq!(rest_warning(&prev, &[]), None);

        // open intervals have no end, so they do not count as a boundary
        let open_prev = vec![work_on(3, "2025-06-01", "22:00", None)];
        assert_eq!(rest_warning(&open_prev, &curr), None);
    }
}
