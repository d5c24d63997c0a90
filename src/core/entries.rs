//! Legacy flat time entries. Not part of any aggregation.

use crate::core::calculator::duration::{DurationInput, resolve_duration};
use crate::core::calculator::overlap::validate_entry_overlap;
use crate::core::projects::ProjectLogic;
use crate::db::entries::{self, TimeEntryRow};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::users;
use crate::errors::{AppError, AppResult};
use crate::models::time_entry::{NewTimeEntry, TimeEntry};
use crate::utils::date::fmt_date;
use crate::utils::time::canonical_clock_opt;
use chrono::NaiveDate;
use rusqlite::Connection;
use tracing::info;

pub const RECENT_LIMIT: i64 = 100;

pub struct EntryLogic;

impl EntryLogic {
    pub fn create(pool: &mut DbPool, user_id: i64, input: NewTimeEntry) -> AppResult<TimeEntry> {
        let date = input.date.ok_or(AppError::MissingField("date"))?;
        let start = canonical_clock_opt(input.start_time.as_deref())?;
        let end = canonical_clock_opt(input.end_time.as_deref())?;
        let duration = resolve_duration(&DurationInput {
            start: start.as_deref(),
            end: end.as_deref(),
            explicit_minutes: input.duration_minutes,
        })
        .ok_or_else(|| {
            AppError::InvalidDuration("provide either a valid start/end or a positive duration".into())
        })?;

        let created = pool.write(|tx| {
            users::require(tx, user_id)?;
            ProjectLogic::validate_refs(tx, input.project_id, input.task_id)?;

            let same_day = entries::list_by_date(tx, user_id, date)?;
            validate_entry_overlap(&same_day, start.as_deref(), end.as_deref())?;

            let id = entries::insert(
                tx,
                user_id,
                &TimeEntryRow {
                    date,
                    start_time: start.as_deref(),
                    end_time: end.as_deref(),
                    duration_minutes: duration,
                    billable: input.billable,
                    project_id: input.project_id,
                    task_id: input.task_id,
                    notes: input.notes.as_deref(),
                },
            )?;
            ttlog(
                tx,
                "entry_add",
                &id.to_string(),
                &format!("{} ({} min)", fmt_date(date), duration),
            )?;

            entries::get(tx, user_id, id)?.ok_or(AppError::NotFound { entity: "Entry", id })
        })?;

        info!(id = created.id, date = %date, duration, "entry added");
        Ok(created)
    }

    pub fn delete(pool: &mut DbPool, user_id: i64, id: i64) -> AppResult<bool> {
        pool.write(|tx| {
            users::require(tx, user_id)?;
            let removed = entries::delete(tx, user_id, id)? > 0;
            if removed {
                ttlog(tx, "entry_del", &id.to_string(), "Entry deleted")?;
            }
            Ok(removed)
        })
    }

    pub fn list(conn: &Connection, user_id: i64, date: Option<NaiveDate>) -> AppResult<Vec<TimeEntry>> {
        users::require(conn, user_id)?;
        match date {
            Some(d) => entries::list_by_date(conn, user_id, d),
            None => entries::list_recent(conn, user_id, RECENT_LIMIT),
        }
    }
}
