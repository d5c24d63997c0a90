//! Calendar helpers. All arithmetic goes through `chrono::NaiveDate`
//! (proleptic Gregorian, no time zone), so day stepping and weekday lookup
//! never depend on the host's local offset or DST rules.

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate, Weekday};

pub const DATE_FMT: &str = "%Y-%m-%d";

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FMT).ok()
}

/// Parse and re-format, so "2025-1-5" is rejected and stored dates stay canonical.
pub fn require_date(s: &str) -> AppResult<NaiveDate> {
    parse_date(s)
        .filter(|d| fmt_date(*d) == s)
        .ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

pub fn fmt_date(d: NaiveDate) -> String {
    d.format(DATE_FMT).to_string()
}

pub fn previous_day(d: NaiveDate) -> AppResult<NaiveDate> {
    d.pred_opt()
        .ok_or_else(|| AppError::InvalidDate(format!("no day before {}", d)))
}

/// Monday–Friday, regardless of whether anything was recorded.
pub fn is_working_day(d: NaiveDate) -> bool {
    !matches!(d.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn validate_year_month(year: i32, month: u32) -> AppResult<()> {
    if !(1970..=9999).contains(&year) {
        return Err(AppError::InvalidPeriod(format!("year {}", year)));
    }
    if !(1..=12).contains(&month) {
        return Err(AppError::InvalidPeriod(format!("month {}", month)));
    }
    Ok(())
}

/// First and last day of the month.
pub fn month_bounds(year: i32, month: u32) -> AppResult<(NaiveDate, NaiveDate)> {
    validate_year_month(year, month)?;
    let invalid = || AppError::InvalidPeriod(format!("{}-{:02}", year, month));

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid)?;
    let last = next_first.pred_opt().ok_or_else(invalid)?;

    Ok((first, last))
}

pub fn all_days_of_month(year: i32, month: u32) -> AppResult<Vec<NaiveDate>> {
    let (first, last) = month_bounds(year, month)?;
    Ok(first.iter_days().take_while(|d| *d <= last).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn month_lengths_follow_gregorian_rules() {
        assert_eq!(all_days_of_month(2024, 2).unwrap().len(), 29);
        assert_eq!(all_days_of_month(2025, 2).unwrap().len(), 28);
        assert_eq!(all_days_of_month(2025, 12).unwrap().len(), 31);
        assert_eq!(all_days_of_month(2025, 4).unwrap().len(), 30);
    }

    #[test]
    fn previous_day_crosses_month_and_year() {
        assert_eq!(previous_day(d("2025-03-01")).unwrap(), d("2025-02-28"));
        assert_eq!(previous_day(d("2025-01-01")).unwrap(), d("2024-12-31"));
    }

    #[test]
    fn weekends_are_not_working_days() {
        assert!(is_working_day(d("2025-10-31"))); // Friday
        assert!(!is_working_day(d("2025-11-01"))); // Saturday
        assert!(!is_working_day(d("2025-11-02"))); // Sunday
        assert!(is_working_day(d("2025-11-03"))); // Monday
    }

    #[test]
    fn rejects_non_canonical_dates() {
        assert!(require_date("2025-01-05").is_ok());
        assert!(require_date("2025-1-5").is_err());
        assert!(require_date("2025-02-30").is_err());
        assert!(matches!(
            month_bounds(2025, 13),
            Err(AppError::InvalidPeriod(_))
        ));
    }
}
