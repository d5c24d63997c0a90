//! Start/stop/status of the running work interval.
//!
//! At most one open interval per (user, date). `stop` closes the open
//! interval with the latest start; a rejected stop leaves it running.

use crate::core::calculator::daily::{live_minutes, open_interval};
use crate::core::calculator::duration::{DurationInput, resolve_duration};
use crate::core::calculator::overlap::validate_work_overlap;
use crate::core::projects::ProjectLogic;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::users;
use crate::db::work_intervals::{self, WorkIntervalRow};
use crate::errors::{AppError, AppResult};
use crate::models::summary::TimerStatus;
use crate::models::work_interval::WorkInterval;
use crate::utils::clock::Clock;
use crate::utils::date::fmt_date;
use crate::utils::time::{canonical_clock_opt, format_clock, minutes_of_day};
use chrono::NaiveDate;
use rusqlite::Connection;
use tracing::{debug, info};

/// Optional overrides for `timer start`; everything defaults to "now".
#[derive(Debug, Clone, Default)]
pub struct TimerStart {
    pub date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub project_id: Option<i64>,
    pub task_id: Option<i64>,
    pub notes: Option<String>,
}

pub struct TimerLogic;

impl TimerLogic {
    pub fn start(
        pool: &mut DbPool,
        user_id: i64,
        req: TimerStart,
        clock: &dyn Clock,
    ) -> AppResult<WorkInterval> {
        let now = clock.now();
        let date = req.date.unwrap_or(now.date());
        let start = match canonical_clock_opt(req.start_time.as_deref())? {
            Some(s) => s,
            None => format_clock(minutes_of_day(now.time())),
        };

        let started = pool.write(|tx| {
            users::require(tx, user_id)?;
            ProjectLogic::validate_refs(tx, req.project_id, req.task_id)?;

            let today = work_intervals::list_by_date(tx, user_id, date)?;
            if let Some(running) = open_interval(&today) {
                return Err(AppError::TimerAlreadyRunning {
                    date: fmt_date(date),
                    running_id: running.id,
                });
            }

            let id = work_intervals::insert(
                tx,
                user_id,
                &WorkIntervalRow {
                    date,
                    start_time: &start,
                    end_time: None,
                    duration_minutes: None,
                    project_id: req.project_id,
                    task_id: req.task_id,
                    notes: req.notes.as_deref(),
                },
            )?;
            ttlog(
                tx,
                "timer_start",
                &id.to_string(),
                &format!("{} {}", fmt_date(date), start),
            )?;

            fetch(tx, user_id, id)
        })?;

        info!(id = started.id, date = %date, start = %start, "timer started");
        Ok(started)
    }

    pub fn stop(
        pool: &mut DbPool,
        user_id: i64,
        date: Option<NaiveDate>,
        end_time: Option<&str>,
        clock: &dyn Clock,
    ) -> AppResult<WorkInterval> {
        let now = clock.now();
        let date = date.unwrap_or(now.date());
        let end = match canonical_clock_opt(end_time)? {
            Some(e) => e,
            None => format_clock(minutes_of_day(now.time())),
        };

        let stopped = pool.write(|tx| {
            users::require(tx, user_id)?;

            let today = work_intervals::list_by_date(tx, user_id, date)?;
            let running = open_interval(&today)
                .ok_or_else(|| AppError::TimerNotRunning(fmt_date(date)))?;
            let start = running
                .start_time
                .as_deref()
                .ok_or(AppError::MissingField("start_time"))?;

            let duration = resolve_duration(&DurationInput::span(start, &end)).ok_or_else(|| {
                AppError::InvalidDuration(format!("{} → {} (check start/end)", start, end))
            })?;
            validate_work_overlap(&today, Some(start), Some(&end), Some(running.id))?;

            work_intervals::update(
                tx,
                user_id,
                running.id,
                &WorkIntervalRow {
                    date,
                    start_time: start,
                    end_time: Some(&end),
                    duration_minutes: Some(duration),
                    project_id: running.project_id,
                    task_id: running.task_id,
                    notes: running.notes.as_deref(),
                },
            )?;
            ttlog(
                tx,
                "timer_stop",
                &running.id.to_string(),
                &format!("{}–{} ({} min)", start, end, duration),
            )?;

            fetch(tx, user_id, running.id)
        })?;

        info!(id = stopped.id, duration = ?stopped.duration_minutes, "timer stopped");
        Ok(stopped)
    }

    /// Read-only: whether an interval is running on `date` and for how long.
    pub fn status(
        conn: &Connection,
        user_id: i64,
        date: Option<NaiveDate>,
        clock: &dyn Clock,
    ) -> AppResult<TimerStatus> {
        users::require(conn, user_id)?;

        let now = clock.now();
        let date = date.unwrap_or(now.date());
        let today = work_intervals::list_by_date(conn, user_id, date)?;
        let running = open_interval(&today).cloned();

        let live = running
            .as_ref()
            .and_then(|wi| wi.start_minutes())
            .map(|s| live_minutes(s, minutes_of_day(now.time())))
            .unwrap_or(0);
        debug!(date = %date, running = running.is_some(), live, "timer status");

        Ok(TimerStatus {
            date,
            running: running.is_some(),
            interval: running,
            live_minutes: live,
            server_time: now,
        })
    }
}

pub(crate) fn fetch(conn: &Connection, user_id: i64, id: i64) -> AppResult<WorkInterval> {
    work_intervals::get(conn, user_id, id)?.ok_or(AppError::NotFound {
        entity: "Work interval",
        id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use crate::utils::clock::FixedClock;
    use chrono::NaiveDateTime;

    fn pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        pool
    }

    fn at(s: &str) -> FixedClock {
        FixedClock(NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap())
    }

    #[test]
    fn start_then_stop_closes_the_interval() {
        let mut pool = pool();
        let started = TimerLogic::start(&mut pool, 1, TimerStart::default(), &at("2025-10-01 08:30")).unwrap();
        assert!(started.is_open());
        assert_eq!(started.start_time.as_deref(), Some("08:30"));

        let status = TimerLogic::status(&pool.conn, 1, None, &at("2025-10-01 09:00")).unwrap();
        assert!(status.running);
        assert_eq!(status.live_minutes, 30);

        let stopped = TimerLogic::stop(&mut pool, 1, None, None, &at("2025-10-01 12:01")).unwrap();
        assert_eq!(stopped.id, started.id);
        assert_eq!(stopped.end_time.as_deref(), Some("12:01"));
        // 211 minutes, rounded up to the next quarter hour
        assert_eq!(stopped.duration_minutes, Some(225));
    }

    #[test]
    fn second_start_on_same_date_conflicts() {
        let mut pool = pool();
        let clock = at("2025-10-01 08:00");
        let first = TimerLogic::start(&mut pool, 1, TimerStart::default(), &clock).unwrap();

        match TimerLogic::start(&mut pool, 1, TimerStart::default(), &clock) {
            Err(AppError::TimerAlreadyRunning { running_id, .. }) => assert_eq!(running_id, first.id),
            other => panic!("expected conflict, got {:?}", other),
        }

        // a different date is independent
        let other_day = TimerStart {
            date: NaiveDate::from_ymd_opt(2025, 10, 2),
            ..Default::default()
        };
        assert!(TimerLogic::start(&mut pool, 1, other_day, &clock).is_ok());
    }

    #[test]
    fn stop_without_running_interval_fails() {
        let mut pool = pool();
        let err = TimerLogic::stop(&mut pool, 1, None, None, &at("2025-10-01 17:00")).unwrap_err();
        assert!(matches!(err, AppError::TimerNotRunning(_)));
    }

    #[test]
    fn rejected_stop_leaves_interval_open() {
        let mut pool = pool();
        let clock = at("2025-10-01 10:00");
        let running = TimerLogic::start(&mut pool, 1, TimerStart::default(), &clock).unwrap();

        // end before start
        let err = TimerLogic::stop(&mut pool, 1, None, Some("09:00"), &clock).unwrap_err();
        assert!(err.is_validation());

        let reloaded = fetch(&pool.conn, 1, running.id).unwrap();
        assert!(reloaded.is_open());
    }

    #[test]
    fn stop_overlapping_closed_interval_is_rejected() {
        let mut pool = pool();
        let date = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
        work_intervals::insert(
            &pool.conn,
            1,
            &WorkIntervalRow {
                date,
                start_time: "11:00",
                end_time: Some("12:00"),
                duration_minutes: Some(60),
                project_id: None,
                task_id: None,
                notes: None,
            },
        )
        .unwrap();

        let clock = at("2025-10-01 10:00");
        let running = TimerLogic::start(&mut pool, 1, TimerStart::default(), &clock).unwrap();
        let err = TimerLogic::stop(&mut pool, 1, None, Some("11:30"), &clock).unwrap_err();
        assert!(err.is_conflict());
        assert!(fetch(&pool.conn, 1, running.id).unwrap().is_open());
    }

    #[test]
    fn unknown_user_is_rejected() {
        let mut pool = pool();
        let err = TimerLogic::start(&mut pool, 99, TimerStart::default(), &at("2025-10-01 08:00")).unwrap_err();
        assert!(err.is_not_found());
    }
}
