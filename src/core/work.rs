//! Manual create/edit/delete of work intervals.

use crate::core::calculator::duration::{DurationInput, resolve_duration};
use crate::core::calculator::overlap::validate_work_overlap;
use crate::core::projects::ProjectLogic;
use crate::core::timer::fetch;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::users;
use crate::db::work_intervals::{self, WorkIntervalRow};
use crate::errors::{AppError, AppResult};
use crate::models::work_interval::{NewWorkInterval, WorkInterval, WorkIntervalPatch};
use crate::utils::date::fmt_date;
use crate::utils::time::canonical_clock;
use chrono::NaiveDate;
use rusqlite::Connection;
use tracing::info;

/// How many rows a listing without a date returns.
pub const RECENT_LIMIT: i64 = 200;

pub struct WorkLogic;

fn closed_duration(start: &str, end: &str) -> AppResult<i64> {
    resolve_duration(&DurationInput::span(start, end)).ok_or_else(|| {
        AppError::InvalidDuration(format!("{} → {} (end must be after start)", start, end))
    })
}

impl WorkLogic {
    pub fn create(pool: &mut DbPool, user_id: i64, input: NewWorkInterval) -> AppResult<WorkInterval> {
        let date = input.date.ok_or(AppError::MissingField("date"))?;
        let start = canonical_clock(
            input
                .start_time
                .as_deref()
                .ok_or(AppError::MissingField("start_time"))?,
        )?;
        let end = canonical_clock(
            input
                .end_time
                .as_deref()
                .ok_or(AppError::MissingField("end_time"))?,
        )?;
        let duration = closed_duration(&start, &end)?;

        let created = pool.write(|tx| {
            users::require(tx, user_id)?;
            ProjectLogic::validate_refs(tx, input.project_id, input.task_id)?;

            let same_day = work_intervals::list_by_date(tx, user_id, date)?;
            validate_work_overlap(&same_day, Some(&start), Some(&end), None)?;

            let id = work_intervals::insert(
                tx,
                user_id,
                &WorkIntervalRow {
                    date,
                    start_time: &start,
                    end_time: Some(&end),
                    duration_minutes: Some(duration),
                    project_id: input.project_id,
                    task_id: input.task_id,
                    notes: input.notes.as_deref(),
                },
            )?;
            ttlog(
                tx,
                "work_add",
                &id.to_string(),
                &format!("{} {}–{}", fmt_date(date), start, end),
            )?;

            fetch(tx, user_id, id)
        })?;

        info!(id = created.id, date = %date, duration, "work interval added");
        Ok(created)
    }

    /// Merge `patch` over the stored row and re-validate the result as a
    /// whole. Closing an open interval here is allowed; leaving it open is not.
    pub fn update(
        pool: &mut DbPool,
        user_id: i64,
        id: i64,
        patch: WorkIntervalPatch,
    ) -> AppResult<WorkInterval> {
        let start_patch = patch.start_time.as_deref().map(canonical_clock).transpose()?;
        let end_patch = patch.end_time.as_deref().map(canonical_clock).transpose()?;

        let updated = pool.write(|tx| {
            users::require(tx, user_id)?;
            let current = work_intervals::get(tx, user_id, id)?.ok_or(AppError::NotFound {
                entity: "Work interval",
                id,
            })?;

            let date = patch.date.unwrap_or(current.date);
            let start = start_patch
                .or(current.start_time)
                .ok_or(AppError::MissingField("start_time"))?;
            let end = end_patch
                .or(current.end_time)
                .ok_or(AppError::MissingField("end_time"))?;
            let project_id = patch.project_id.unwrap_or(current.project_id);
            let task_id = patch.task_id.unwrap_or(current.task_id);
            let notes = patch.notes.clone().unwrap_or(current.notes);

            let duration = closed_duration(&start, &end)?;
            ProjectLogic::validate_refs(tx, project_id, task_id)?;

            let same_day = work_intervals::list_by_date(tx, user_id, date)?;
            validate_work_overlap(&same_day, Some(&start), Some(&end), Some(id))?;

            work_intervals::update(
                tx,
                user_id,
                id,
                &WorkIntervalRow {
                    date,
                    start_time: &start,
                    end_time: Some(&end),
                    duration_minutes: Some(duration),
                    project_id,
                    task_id,
                    notes: notes.as_deref(),
                },
            )?;
            ttlog(
                tx,
                "work_edit",
                &id.to_string(),
                &format!("{} {}–{}", fmt_date(date), start, end),
            )?;

            fetch(tx, user_id, id)
        })?;

        info!(id, "work interval updated");
        Ok(updated)
    }

    /// `Ok(false)` when the id does not exist for this user.
    pub fn delete(pool: &mut DbPool, user_id: i64, id: i64) -> AppResult<bool> {
        let removed = pool.write(|tx| {
            users::require(tx, user_id)?;
            let removed = work_intervals::delete(tx, user_id, id)? > 0;
            if removed {
                ttlog(tx, "work_del", &id.to_string(), "Work interval deleted")?;
            }
            Ok(removed)
        })?;

        info!(id, removed, "work interval delete");
        Ok(removed)
    }

    /// One date ordered by start, or the latest [`RECENT_LIMIT`] rows.
    pub fn list(conn: &Connection, user_id: i64, date: Option<NaiveDate>) -> AppResult<Vec<WorkInterval>> {
        users::require(conn, user_id)?;
        match date {
            Some(d) => work_intervals::list_by_date(conn, user_id, d),
            None => work_intervals::list_recent(conn, user_id, RECENT_LIMIT),
        }
    }
}
