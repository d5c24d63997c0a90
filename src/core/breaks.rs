//! Breaks: positioned (start/end) or duration-only.

use crate::core::calculator::duration::{DurationInput, resolve_duration};
use crate::core::calculator::overlap::validate_break_overlap;
use crate::db::breaks::{self, BreakRow};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::users;
use crate::errors::{AppError, AppResult};
use crate::models::pause::{Break, BreakPatch, NewBreak};
use crate::utils::date::fmt_date;
use crate::utils::time::canonical_clock_opt;
use chrono::NaiveDate;
use rusqlite::Connection;
use tracing::info;

pub const RECENT_LIMIT: i64 = 200;

pub struct BreakLogic;

fn break_duration(start: Option<&str>, end: Option<&str>, explicit: Option<i64>) -> AppResult<i64> {
    resolve_duration(&DurationInput {
        start,
        end,
        explicit_minutes: explicit,
    })
    .ok_or_else(|| {
        AppError::InvalidDuration(
            "provide either a valid start/end or a positive duration".to_string(),
        )
    })
}

fn fetch(conn: &Connection, user_id: i64, id: i64) -> AppResult<Break> {
    breaks::get(conn, user_id, id)?.ok_or(AppError::NotFound { entity: "Break", id })
}

impl BreakLogic {
    pub fn create(pool: &mut DbPool, user_id: i64, input: NewBreak) -> AppResult<Break> {
        let date = input.date.ok_or(AppError::MissingField("date"))?;
        let start = canonical_clock_opt(input.start_time.as_deref())?;
        let end = canonical_clock_opt(input.end_time.as_deref())?;
        let duration = break_duration(start.as_deref(), end.as_deref(), input.duration_minutes)?;

        let created = pool.write(|tx| {
            users::require(tx, user_id)?;

            let same_day = breaks::list_by_date(tx, user_id, date)?;
            validate_break_overlap(&same_day, start.as_deref(), end.as_deref(), None)?;

            let id = breaks::insert(
                tx,
                user_id,
                &BreakRow {
                    date,
                    start_time: start.as_deref(),
                    end_time: end.as_deref(),
                    duration_minutes: duration,
                    notes: input.notes.as_deref(),
                },
            )?;
            ttlog(
                tx,
                "break_add",
                &id.to_string(),
                &format!("{} ({} min)", fmt_date(date), duration),
            )?;

            fetch(tx, user_id, id)
        })?;

        info!(id = created.id, date = %date, duration, "break added");
        Ok(created)
    }

    /// Fields absent from `patch` are inherited, including the stored
    /// duration: a positive duration outranks start/end, so moving a
    /// positioned break without touching its duration keeps the old length.
    /// Pass `duration_minutes: Some(None)` to recompute from start/end.
    pub fn update(pool: &mut DbPool, user_id: i64, id: i64, patch: BreakPatch) -> AppResult<Break> {
        let start_patch = patch
            .start_time
            .as_ref()
            .map(|s| canonical_clock_opt(s.as_deref()))
            .transpose()?;
        let end_patch = patch
            .end_time
            .as_ref()
            .map(|e| canonical_clock_opt(e.as_deref()))
            .transpose()?;

        let updated = pool.write(|tx| {
            users::require(tx, user_id)?;
            let current = fetch(tx, user_id, id)?;

            let date = patch.date.unwrap_or(current.date);
            let start = start_patch.unwrap_or(current.start_time);
            let end = end_patch.unwrap_or(current.end_time);
            let explicit = patch
                .duration_minutes
                .unwrap_or(Some(current.duration_minutes));
            let notes = patch.notes.clone().unwrap_or(current.notes);

            let duration = break_duration(start.as_deref(), end.as_deref(), explicit)?;

            let same_day = breaks::list_by_date(tx, user_id, date)?;
            validate_break_overlap(&same_day, start.as_deref(), end.as_deref(), Some(id))?;

            breaks::update(
                tx,
                user_id,
                id,
                &BreakRow {
                    date,
                    start_time: start.as_deref(),
                    end_time: end.as_deref(),
                    duration_minutes: duration,
                    notes: notes.as_deref(),
                },
            )?;
            ttlog(
                tx,
                "break_edit",
                &id.to_string(),
                &format!("{} ({} min)", fmt_date(date), duration),
            )?;

            fetch(tx, user_id, id)
        })?;

        info!(id, "break updated");
        Ok(updated)
    }

    pub fn delete(pool: &mut DbPool, user_id: i64, id: i64) -> AppResult<bool> {
        pool.write(|tx| {
            users::require(tx, user_id)?;
            let removed = breaks::delete(tx, user_id, id)? > 0;
            if removed {
                ttlog(tx, "break_del", &id.to_string(), "Break deleted")?;
            }
            Ok(removed)
        })
    }

    /// Date listing puts positioned breaks first (by start), then
    /// duration-only ones.
    pub fn list(conn: &Connection, user_id: i64, date: Option<NaiveDate>) -> AppResult<Vec<Break>> {
        users::require(conn, user_id)?;
        match date {
            Some(d) => breaks::list_by_date(conn, user_id, d),
            None => breaks::list_recent(conn, user_id, RECENT_LIMIT),
        }
    }
}
