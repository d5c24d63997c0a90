//! `time_entries` table access (legacy flat entries).

use crate::db::db_utils::{bool_column, date_column, date_param};
use crate::errors::AppResult;
use crate::models::time_entry::TimeEntry;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};

const SELECT: &str = "
    SELECT te.id, te.user_id, te.date, te.start_time, te.end_time, te.duration_minutes,
           te.billable, te.project_id, p.name AS project_name,
           te.task_id, t.name AS task_name,
           te.notes, te.created_at, te.updated_at
    FROM time_entries te
    LEFT JOIN projects p ON te.project_id = p.id
    LEFT JOIN tasks t ON te.task_id = t.id";

const ORDER: &str = "te.start_time IS NULL, te.start_time, te.id";

pub fn map_row(row: &Row) -> rusqlite::Result<TimeEntry> {
    Ok(TimeEntry {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        date: date_column(row, "date")?,
        start_time: row.get("start_time")?,
        end_time: row.get("end_time")?,
        duration_minutes: row.get("duration_minutes")?,
        billable: bool_column(row, "billable")?,
        project_id: row.get("project_id")?,
        project_name: row.get("project_name")?,
        task_id: row.get("task_id")?,
        task_name: row.get("task_name")?,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn collect(conn: &Connection, sql: &str, params: impl rusqlite::Params) -> AppResult<Vec<TimeEntry>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn list_by_date(conn: &Connection, user_id: i64, date: NaiveDate) -> AppResult<Vec<TimeEntry>> {
    collect(
        conn,
        &format!("{SELECT} WHERE te.user_id = ?1 AND te.date = ?2 ORDER BY {ORDER}"),
        params![user_id, date_param(date)],
    )
}

pub fn list_recent(conn: &Connection, user_id: i64, limit: i64) -> AppResult<Vec<TimeEntry>> {
    collect(
        conn,
        &format!("{SELECT} WHERE te.user_id = ?1 ORDER BY te.date DESC, {ORDER} LIMIT ?2"),
        params![user_id, limit],
    )
}

pub fn get(conn: &Connection, user_id: i64, id: i64) -> AppResult<Option<TimeEntry>> {
    let mut stmt = conn.prepare(&format!("{SELECT} WHERE te.id = ?1 AND te.user_id = ?2"))?;
    Ok(stmt.query_row(params![id, user_id], map_row).optional()?)
}

#[derive(Debug, Clone)]
pub struct TimeEntryRow<'a> {
    pub date: NaiveDate,
    pub start_time: Option<&'a str>,
    pub end_time: Option<&'a str>,
    pub duration_minutes: i64,
    pub billable: bool,
    pub project_id: Option<i64>,
    pub task_id: Option<i64>,
    pub notes: Option<&'a str>,
}

pub fn insert(conn: &Connection, user_id: i64, row: &TimeEntryRow) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO time_entries
            (user_id, project_id, task_id, date, start_time, end_time, duration_minutes, billable, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            user_id,
            row.project_id,
            row.task_id,
            date_param(row.date),
            row.start_time,
            row.end_time,
            row.duration_minutes,
            row.billable as i64,
            row.notes,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn delete(conn: &Connection, user_id: i64, id: i64) -> AppResult<usize> {
    Ok(conn.execute(
        "DELETE FROM time_entries WHERE id = ?1 AND user_id = ?2",
        params![id, user_id],
    )?)
}
