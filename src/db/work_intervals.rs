//! `work_intervals` table access. Every query is scoped by `user_id`.

use crate::db::db_utils::{date_column, date_param};
use crate::errors::AppResult;
use crate::models::work_interval::WorkInterval;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};

const SELECT: &str = "
    SELECT wi.id, wi.user_id, wi.date, wi.start_time, wi.end_time, wi.duration_minutes,
           wi.project_id, p.name AS project_name,
           wi.task_id, t.name AS task_name,
           wi.notes, wi.created_at, wi.updated_at
    FROM work_intervals wi
    LEFT JOIN projects p ON wi.project_id = p.id
    LEFT JOIN tasks t ON wi.task_id = t.id";

pub fn map_row(row: &Row) -> rusqlite::Result<WorkInterval> {
    Ok(WorkInterval {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        date: date_column(row, "date")?,
        start_time: row.get("start_time")?,
        end_time: row.get("end_time")?,
        duration_minutes: row.get("duration_minutes")?,
        project_id: row.get("project_id")?,
        project_name: row.get("project_name")?,
        task_id: row.get("task_id")?,
        task_name: row.get("task_name")?,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn collect(conn: &Connection, sql: &str, params: impl rusqlite::Params) -> AppResult<Vec<WorkInterval>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn list_by_date(conn: &Connection, user_id: i64, date: NaiveDate) -> AppResult<Vec<WorkInterval>> {
    collect(
        conn,
        &format!("{SELECT} WHERE wi.user_id = ?1 AND wi.date = ?2 ORDER BY wi.start_time, wi.id"),
        params![user_id, date_param(date)],
    )
}

/// Inclusive date range, ordered by date then start.
pub fn list_by_range(
    conn: &Connection,
    user_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<Vec<WorkInterval>> {
    collect(
        conn,
        &format!(
            "{SELECT} WHERE wi.user_id = ?1 AND wi.date >= ?2 AND wi.date <= ?3
             ORDER BY wi.date, wi.start_time, wi.id"
        ),
        params![user_id, date_param(from), date_param(to)],
    )
}

pub fn list_recent(conn: &Connection, user_id: i64, limit: i64) -> AppResult<Vec<WorkInterval>> {
    collect(
        conn,
        &format!("{SELECT} WHERE wi.user_id = ?1 ORDER BY wi.date DESC, wi.start_time, wi.id LIMIT ?2"),
        params![user_id, limit],
    )
}

pub fn get(conn: &Connection, user_id: i64, id: i64) -> AppResult<Option<WorkInterval>> {
    let mut stmt = conn.prepare(&format!("{SELECT} WHERE wi.id = ?1 AND wi.user_id = ?2"))?;
    Ok(stmt.query_row(params![id, user_id], map_row).optional()?)
}

/// Columns written on insert/update.
#[derive(Debug, Clone)]
pub struct WorkIntervalRow<'a> {
    pub date: NaiveDate,
    pub start_time: &'a str,
    pub end_time: Option<&'a str>,
    pub duration_minutes: Option<i64>,
    pub project_id: Option<i64>,
    pub task_id: Option<i64>,
    pub notes: Option<&'a str>,
}

pub fn insert(conn: &Connection, user_id: i64, row: &WorkIntervalRow) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO work_intervals
            (user_id, date, start_time, end_time, duration_minutes, project_id, task_id, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            user_id,
            date_param(row.date),
            row.start_time,
            row.end_time,
            row.duration_minutes,
            row.project_id,
            row.task_id,
            row.notes,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update(conn: &Connection, user_id: i64, id: i64, row: &WorkIntervalRow) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE work_intervals
         SET date = ?1, start_time = ?2, end_time = ?3, duration_minutes = ?4,
             project_id = ?5, task_id = ?6, notes = ?7
         WHERE id = ?8 AND user_id = ?9",
        params![
            date_param(row.date),
            row.start_time,
            row.end_time,
            row.duration_minutes,
            row.project_id,
            row.task_id,
            row.notes,
            id,
            user_id,
        ],
    )?)
}

pub fn delete(conn: &Connection, user_id: i64, id: i64) -> AppResult<usize> {
    Ok(conn.execute(
        "DELETE FROM work_intervals WHERE id = ?1 AND user_id = ?2",
        params![id, user_id],
    )?)
}
