//! Time utilities: parsing HH:mm, rounding durations, formatting minutes.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveTime, Timelike};
use regex::Regex;
use std::sync::LazyLock;

pub const MINUTES_PER_DAY: i64 = 24 * 60;
pub const QUARTER_HOUR: i64 = 15;

static CLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}):(\d{2})$").expect("valid clock regex"));

/// Parse a wall-clock "HH:mm" into minutes since midnight.
///
/// A single-digit hour (`9:05`) is accepted on purpose; writers store the
/// zero-padded form via [`canonical_clock`]. Minutes always take two digits.
///
/// Returns `None` for anything that is not a valid time of day; callers
/// branch on it instead of handling a parse error.
pub fn parse_clock(text: &str) -> Option<i64> {
    let caps = CLOCK_RE.captures(text)?;
    let h: i64 = caps[1].parse().ok()?;
    let m: i64 = caps[2].parse().ok()?;

    if (0..24).contains(&h) && (0..60).contains(&m) {
        Some(h * 60 + m)
    } else {
        None
    }
}

/// Same as [`parse_clock`] for optional columns.
pub fn parse_clock_opt(text: Option<&str>) -> Option<i64> {
    text.and_then(parse_clock)
}

/// Minutes since midnight → "HH:mm".
pub fn format_clock(mins: i64) -> String {
    let m = mins.rem_euclid(MINUTES_PER_DAY);
    format!("{:02}:{:02}", m / 60, m % 60)
}

pub fn minutes_of_day(t: NaiveTime) -> i64 {
    (t.hour() * 60 + t.minute()) as i64
}

/// `ceil(minutes / 15) * 15`. Zero stays zero.
pub fn round_up_to_quarter_hour(minutes: i64) -> i64 {
    if minutes <= 0 {
        return 0;
    }
    ((minutes + QUARTER_HOUR - 1) / QUARTER_HOUR) * QUARTER_HOUR
}

/// Minutes → "<H>h <M>m" (no padding), e.g. 390 → "6h 30m".
pub fn format_hm(mins: i64) -> String {
    format!("{}h {}m", mins / 60, mins % 60)
}

/// Validate "HH:mm" and return it zero-padded, the form rows are stored in
/// (so SQL ordering by the text column matches clock order).
pub fn canonical_clock(text: &str) -> AppResult<String> {
    parse_clock(text)
        .map(format_clock)
        .ok_or_else(|| AppError::InvalidTime(text.to_string()))
}

pub fn canonical_clock_opt(text: Option<&str>) -> AppResult<Option<String>> {
    text.map(canonical_clock).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_clock_text() {
        assert_eq!(parse_clock("00:00"), Some(0));
        assert_eq!(parse_clock("09:05"), Some(545));
        assert_eq!(parse_clock("9:05"), Some(545));
        assert_eq!(parse_clock("23:59"), Some(1439));
    }

    #[test]
    fn rejects_malformed_clock_text() {
        for bad in ["", "0900", "24:00", "12:60", "ab:cd", "12:5", "12:00:00", " 12:00", "-1:00"] {
            assert_eq!(parse_clock(bad), None, "{bad:?} should be invalid");
        }
    }

    #[test]
    fn rounds_up_to_next_quarter() {
        assert_eq!(round_up_to_quarter_hour(0), 0);
        assert_eq!(round_up_to_quarter_hour(1), 15);
        assert_eq!(round_up_to_quarter_hour(15), 15);
        assert_eq!(round_up_to_quarter_hour(16), 30);
        assert_eq!(round_up_to_quarter_hour(50), 60);
    }

    #[test]
    fn canonical_clock_pads_hours() {
        assert_eq!(canonical_clock("9:05").unwrap(), "09:05");
        assert!(matches!(canonical_clock("25:00"), Err(AppError::InvalidTime(_))));
        assert_eq!(canonical_clock_opt(None).unwrap(), None);
    }

    #[test]
    fn formats_minutes() {
        assert_eq!(format_clock(545), "09:05");
        assert_eq!(format_hm(390), "6h 30m");
        assert_eq!(format_hm(45), "0h 45m");
    }
}
