//! Duration resolution: the rounding policy applied to every stored
//! interval, break and entry.

use crate::utils::time::{parse_clock_opt, round_up_to_quarter_hour};

/// Raw duration inputs as they arrive from a request or a stored row.
#[derive(Debug, Clone, Copy, Default)]
pub struct DurationInput<'a> {
    pub start: Option<&'a str>,
    pub end: Option<&'a str>,
    pub explicit_minutes: Option<i64>,
}

impl<'a> DurationInput<'a> {
    pub fn span(start: &'a str, end: &'a str) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            explicit_minutes: None,
        }
    }

    pub fn explicit(minutes: i64) -> Self {
        Self {
            explicit_minutes: Some(minutes),
            ..Default::default()
        }
    }
}

/// Start/end as minutes when both parse and `end > start`.
pub fn clock_range(start: Option<&str>, end: Option<&str>) -> Option<(i64, i64)> {
    match (parse_clock_opt(start), parse_clock_opt(end)) {
        (Some(s), Some(e)) if e > s => Some((s, e)),
        _ => None,
    }
}

/// Resolve the duration to store, in minutes.
///
/// A positive explicit duration takes precedence and start/end are then
/// ignored. Otherwise both ends must parse with `end > start`. The result is
/// always rounded up to the next quarter hour; `None` means invalid.
pub fn resolve_duration(input: &DurationInput) -> Option<i64> {
    if let Some(explicit) = input.explicit_minutes
        && explicit > 0
    {
        return Some(round_up_to_quarter_hour(explicit));
    }

    let (start, end) = clock_range(input.start, input.end)?;
    Some(round_up_to_quarter_hour(end - start))
}
