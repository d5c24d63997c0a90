//! Read side: day, month and year views over stored rows.
//!
//! Each report fetches its rows once, samples the clock once, and hands
//! both to the pure calculators.

use crate::core::calculator::daily::summarize_day;
use crate::core::calculator::period::{month_overview, project_rollup, year_summary};
use crate::db::{breaks, users, work_intervals};
use crate::errors::AppResult;
use crate::models::settings::Settings;
use crate::models::summary::{DaySummary, MonthOverview, MonthProjects, YearSummary};
use crate::utils::clock::Clock;
use crate::utils::date::{month_bounds, previous_day, validate_year_month};
use chrono::{Datelike, NaiveDate};
use rusqlite::Connection;
use tracing::debug;

pub struct ReportLogic;

impl ReportLogic {
    /// Summary for `date`, or for the clock's current day when `None`.
    pub fn day(
        conn: &Connection,
        user_id: i64,
        date: Option<NaiveDate>,
        clock: &dyn Clock,
    ) -> AppResult<DaySummary> {
        users::require(conn, user_id)?;

        let now = clock.now();
        let date = date.unwrap_or(now.date());

        let prev = previous_day(date)?;
        let intervals = work_intervals::list_by_date(conn, user_id, date)?;
        let previous = work_intervals::list_by_date(conn, user_id, prev)?;
        let day_breaks = breaks::list_by_date(conn, user_id, date)?;

        Ok(summarize_day(date, &intervals, &day_breaks, &previous, now))
    }

    pub fn month(
        conn: &Connection,
        user_id: i64,
        year: i32,
        month: u32,
        settings: &Settings,
        clock: &dyn Clock,
    ) -> AppResult<MonthOverview> {
        users::require(conn, user_id)?;

        let (first, last) = month_bounds(year, month)?;
        // one extra day for the rest check of day 1
        let intervals = work_intervals::list_by_range(conn, user_id, previous_day(first)?, last)?;
        let month_breaks = breaks::list_by_range(conn, user_id, first, last)?;
        debug!(year, month, intervals = intervals.len(), breaks = month_breaks.len(), "month rows");

        month_overview(year, month, &intervals, &month_breaks, settings, clock.now())
    }

    pub fn month_projects(conn: &Connection, user_id: i64, year: i32, month: u32) -> AppResult<MonthProjects> {
        users::require(conn, user_id)?;

        let (first, last) = month_bounds(year, month)?;
        let intervals = work_intervals::list_by_range(conn, user_id, first, last)?;

        Ok(MonthProjects {
            year,
            month,
            projects: project_rollup(&intervals),
        })
    }

    /// Twelve month views from a single fetch of the year (plus Dec 31 of
    /// the year before).
    pub fn year(
        conn: &Connection,
        user_id: i64,
        year: i32,
        settings: &Settings,
        clock: &dyn Clock,
    ) -> AppResult<YearSummary> {
        users::require(conn, user_id)?;
        validate_year_month(year, 1)?;

        let (jan_first, _) = month_bounds(year, 1)?;
        let (_, dec_last) = month_bounds(year, 12)?;
        let intervals = work_intervals::list_by_range(conn, user_id, previous_day(jan_first)?, dec_last)?;
        let year_breaks = breaks::list_by_range(conn, user_id, jan_first, dec_last)?;
        let now = clock.now();

        let mut months = Vec::with_capacity(12);
        for month in 1..=12 {
            let overview = month_overview(year, month, &intervals, &year_breaks, settings, now)?;
            let in_month: Vec<_> = intervals
                .iter()
                .filter(|wi| wi.date.year() == year && wi.date.month() == month)
                .cloned()
                .collect();
            months.push((overview, project_rollup(&in_month)));
        }

        Ok(year_summary(year, months, &intervals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::breaks::BreakLogic;
    use crate::core::work::WorkLogic;
    use crate::db::initialize::init_db;
    use crate::db::pool::DbPool;
    use crate::models::pause::NewBreak;
    use crate::models::work_interval::NewWorkInterval;
    use crate::core::timer::{TimerLogic, TimerStart};
    use crate::utils::clock::FixedClock;
    use chrono::{Duration, NaiveDateTime};
    use std::cell::Cell;

    fn pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        pool
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn clock() -> FixedClock {
        FixedClock(d(2026, 1, 15).and_hms_opt(12, 0, 0).unwrap())
    }

    fn add_work(pool: &mut DbPool, date: NaiveDate, start: &str, end: &str) {
        WorkLogic::create(
            pool,
            1,
            NewWorkInterval {
                date: Some(date),
                start_time: Some(start.into()),
                end_time: Some(end.into()),
                ..Default::default()
            },
        )
        .unwrap();
    }

    #[test]
    fn day_report_nets_breaks_and_warns_on_short_rest() {
        let mut pool = pool();
        add_work(&mut pool, d(2025, 10, 1), "14:00", "23:00");
        add_work(&mut pool, d(2025, 10, 2), "07:00", "12:00");
        BreakLogic::create(
            &mut pool,
            1,
            NewBreak {
                date: Some(d(2025, 10, 2)),
                duration_minutes: Some(30),
                ..Default::default()
            },
        )
        .unwrap();

        let s = ReportLogic::day(&pool.conn, 1, Some(d(2025, 10, 2)), &clock()).unwrap();
        assert_eq!(s.work_minutes, 300);
        assert_eq!(s.break_minutes, 30);
        assert_eq!(s.recorded_minutes, 270);
        assert_eq!(s.warnings, vec!["11-hour rest rule not met: only 8h 0m".to_string()]);
    }

    /// Advances one minute per reading, starting at 23:59.
    struct TickingClock(Cell<NaiveDateTime>);

    impl Clock for TickingClock {
        fn now(&self) -> NaiveDateTime {
            let t = self.0.get();
            self.0.set(t + Duration::minutes(1));
            t
        }
    }

    #[test]
    fn day_report_reads_the_clock_once() {
        let mut pool = pool();
        let start = FixedClock(d(2025, 10, 2).and_hms_opt(22, 0, 0).unwrap());
        TimerLogic::start(&mut pool, 1, TimerStart::default(), &start).unwrap();

        let clock = TickingClock(Cell::new(d(2025, 10, 2).and_hms_opt(23, 59, 0).unwrap()));
        let s = ReportLogic::day(&pool.conn, 1, None, &clock).unwrap();

        assert_eq!(s.date, d(2025, 10, 2));
        assert_eq!(s.running_since.as_deref(), Some("22:00"));
        assert_eq!(s.running_minutes, 119);
    }

    #[test]
    fn month_rest_check_reaches_into_previous_month() {
        let mut pool = pool();
        add_work(&mut pool, d(2025, 9, 30), "15:00", "23:00");
        add_work(&mut pool, d(2025, 10, 1), "06:00", "10:00");

        let m = ReportLogic::month(&pool.conn, 1, 2025, 10, &Settings::default(), &clock()).unwrap();
        assert_eq!(m.days.len(), 31);
        assert_eq!(m.days[0].summary.warnings.len(), 1);
        // September's interval is not counted in October
        assert_eq!(m.totals.work_minutes, 240);
        // October 2025 has 23 weekdays
        assert_eq!(m.totals.must_minutes, 23 * 8 * 60);
    }

    #[test]
    fn year_totals_sum_months() {
        let mut pool = pool();
        add_work(&mut pool, d(2025, 3, 3), "09:00", "17:00");
        add_work(&mut pool, d(2025, 11, 3), "09:00", "13:00");
        add_work(&mut pool, d(2024, 12, 31), "09:00", "17:00");

        let y = ReportLogic::year(&pool.conn, 1, 2025, &Settings::default(), &clock()).unwrap();
        assert_eq!(y.months.len(), 12);
        assert_eq!(y.totals.work_minutes, 720);
        assert_eq!(y.months[2].totals.work_minutes, 480);
        assert_eq!(y.projects.len(), 1);
        assert_eq!(y.projects[0].minutes, 720);
    }

    #[test]
    fn invalid_periods_are_rejected() {
        let pool = pool();
        let settings = Settings::default();
        assert!(ReportLogic::month(&pool.conn, 1, 2025, 13, &settings, &clock()).unwrap_err().is_validation());
        assert!(ReportLogic::year(&pool.conn, 1, 1969, &settings, &clock()).unwrap_err().is_validation());
    }
}
