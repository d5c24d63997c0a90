//! Overlap detection within one (user, date, kind).
//!
//! Only closed items take part: open work intervals and breaks without a
//! parsable start/end neither block nor are blocked. Ranges are half-open,
//! so 09:00–10:00 and 10:00–11:00 do not conflict.

use super::duration::clock_range;
use crate::errors::{AppError, AppResult};
use crate::models::pause::Break;
use crate::models::time_entry::TimeEntry;
use crate::models::work_interval::WorkInterval;

/// Anything with an identity and an optional clock extent.
pub trait Positioned {
    fn id(&self) -> i64;
    fn start_clock(&self) -> Option<&str>;
    fn end_clock(&self) -> Option<&str>;

    fn range(&self) -> Option<(i64, i64)> {
        clock_range(self.start_clock(), self.end_clock())
    }
}

impl Positioned for WorkInterval {
    fn id(&self) -> i64 {
        self.id
    }
    fn start_clock(&self) -> Option<&str> {
        self.start_time.as_deref()
    }
    fn end_clock(&self) -> Option<&str> {
        self.end_time.as_deref()
    }
}

impl Positioned for Break {
    fn id(&self) -> i64 {
        self.id
    }
    fn start_clock(&self) -> Option<&str> {
        self.start_time.as_deref()
    }
    fn end_clock(&self) -> Option<&str> {
        self.end_time.as_deref()
    }
}

impl Positioned for TimeEntry {
    fn id(&self) -> i64 {
        self.id
    }
    fn start_clock(&self) -> Option<&str> {
        self.start_time.as_deref()
    }
    fn end_clock(&self) -> Option<&str> {
        self.end_time.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapOutcome {
    Clear,
    Conflict { conflicting_id: i64 },
}

impl OverlapOutcome {
    pub fn is_clear(&self) -> bool {
        matches!(self, OverlapOutcome::Clear)
    }
}

pub fn ranges_overlap((a_start, a_end): (i64, i64), (b_start, b_end): (i64, i64)) -> bool {
    a_start.max(b_start) < a_end.min(b_end)
}

/// Scan `existing` for the first closed item overlapping `candidate`.
/// `exclude_id` skips the row being edited.
pub fn check_overlap<T: Positioned>(
    existing: &[T],
    candidate: (i64, i64),
    exclude_id: Option<i64>,
) -> OverlapOutcome {
    existing
        .iter()
        .filter(|row| Some(row.id()) != exclude_id)
        .find(|row| row.range().is_some_and(|r| ranges_overlap(r, candidate)))
        .map_or(OverlapOutcome::Clear, |row| OverlapOutcome::Conflict {
            conflicting_id: row.id(),
        })
}

/// Work intervals: the candidate must be a well-formed range before the
/// scan runs at all.
pub fn validate_work_overlap(
    existing: &[WorkInterval],
    start: Option<&str>,
    end: Option<&str>,
    exclude_id: Option<i64>,
) -> AppResult<()> {
    let candidate = clock_range(start, end)
        .ok_or_else(|| AppError::Validation("Invalid start/end times".into()))?;

    match check_overlap(existing, candidate, exclude_id) {
        OverlapOutcome::Clear => Ok(()),
        OverlapOutcome::Conflict { conflicting_id } => Err(AppError::Overlap {
            message: format!("Overlaps with interval #{}", conflicting_id),
            conflicting_id: Some(conflicting_id),
        }),
    }
}

/// Breaks: a candidate without a valid range is duration-only and passes.
pub fn validate_break_overlap(
    existing: &[Break],
    start: Option<&str>,
    end: Option<&str>,
    exclude_id: Option<i64>,
) -> AppResult<()> {
    let Some(candidate) = clock_range(start, end) else {
        return Ok(());
    };

    match check_overlap(existing, candidate, exclude_id) {
        OverlapOutcome::Clear => Ok(()),
        OverlapOutcome::Conflict { conflicting_id } => Err(AppError::Overlap {
            message: format!("Break overlaps with break #{}", conflicting_id),
            conflicting_id: Some(conflicting_id),
        }),
    }
}

/// Legacy entries follow the break rule (range optional).
pub fn validate_entry_overlap(
    existing: &[TimeEntry],
    start: Option<&str>,
    end: Option<&str>,
) -> AppResult<()> {
    let Some(candidate) = clock_range(start, end) else {
        return Ok(());
    };

    match check_overlap(existing, candidate, None) {
        OverlapOutcome::Clear => Ok(()),
        OverlapOutcome::Conflict { conflicting_id } => Err(AppError::Overlap {
            message: "Overlapping entry on this date".into(),
            conflicting_id: Some(conflicting_id),
        }),
    }
}
