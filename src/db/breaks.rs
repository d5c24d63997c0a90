//! `breaks` table access.

use crate::db::db_utils::{date_column, date_param};
use crate::errors::AppResult;
use crate::models::pause::Break;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};

const SELECT: &str = "
    SELECT id, user_id, date, start_time, end_time, duration_minutes, notes, created_at, updated_at
    FROM breaks";

// positioned breaks first, then duration-only ones
const ORDER: &str = "start_time IS NULL, start_time, id";

pub fn map_row(row: &Row) -> rusqlite::Result<Break> {
    Ok(Break {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        date: date_column(row, "date")?,
        start_time: row.get("start_time")?,
        end_time: row.get("end_time")?,
        duration_minutes: row.get("duration_minutes")?,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn collect(conn: &Connection, sql: &str, params: impl rusqlite::Params) -> AppResult<Vec<Break>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn list_by_date(conn: &Connection, user_id: i64, date: NaiveDate) -> AppResult<Vec<Break>> {
    collect(
        conn,
        &format!("{SELECT} WHERE user_id = ?1 AND date = ?2 ORDER BY {ORDER}"),
        params![user_id, date_param(date)],
    )
}

pub fn list_by_range(
    conn: &Connection,
    user_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<Vec<Break>> {
    collect(
        conn,
        &format!("{SELECT} WHERE user_id = ?1 AND date >= ?2 AND date <= ?3 ORDER BY date, {ORDER}"),
        params![user_id, date_param(from), date_param(to)],
    )
}

pub fn list_recent(conn: &Connection, user_id: i64, limit: i64) -> AppResult<Vec<Break>> {
    collect(
        conn,
        &format!("{SELECT} WHERE user_id = ?1 ORDER BY date DESC, {ORDER} LIMIT ?2"),
        params![user_id, limit],
    )
}

pub fn get(conn: &Connection, user_id: i64, id: i64) -> AppResult<Option<Break>> {
    let mut stmt = conn.prepare(&format!("{SELECT} WHERE id = ?1 AND user_id = ?2"))?;
    Ok(stmt.query_row(params![id, user_id], map_row).optional()?)
}

#[derive(Debug, Clone)]
pub struct BreakRow<'a> {
    pub date: NaiveDate,
    pub start_time: Option<&'a str>,
    pub end_time: Option<&'a str>,
    pub duration_minutes: i64,
    pub notes: Option<&'a str>,
}

pub fn insert(conn: &Connection, user_id: i64, row: &BreakRow) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO breaks (user_id, date, start_time, end_time, duration_minutes, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            user_id,
            date_param(row.date),
            row.start_time,
            row.end_time,
            row.duration_minutes,
            row.notes,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update(conn: &Connection, user_id: i64, id: i64, row: &BreakRow) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE breaks
         SET date = ?1, start_time = ?2, end_time = ?3, duration_minutes = ?4, notes = ?5
         WHERE id = ?6 AND user_id = ?7",
        params![
            date_param(row.date),
            row.start_time,
            row.end_time,
            row.duration_minutes,
            row.notes,
            id,
            user_id,
        ],
    )?)
}

pub fn delete(conn: &Connection, user_id: i64, id: i64) -> AppResult<usize> {
    Ok(conn.execute(
        "DELETE FROM breaks WHERE id = ?1 AND user_id = ?2",
        params![id, user_id],
    )?)
}
