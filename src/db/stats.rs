//! Database overview for `db --info`.

use crate::errors::AppResult;
use rusqlite::Connection;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DbStats {
    pub work_intervals: i64,
    pub open_intervals: i64,
    pub breaks: i64,
    pub time_entries: i64,
    pub projects: i64,
    pub tasks: i64,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
}

fn count(conn: &Connection, sql: &str, user_id: i64) -> AppResult<i64> {
    Ok(conn.query_row(sql, [user_id], |row| row.get(0))?)
}

pub fn collect_stats(conn: &Connection, user_id: i64) -> AppResult<DbStats> {
    let (first_date, last_date): (Option<String>, Option<String>) = conn.query_row(
        "SELECT MIN(date), MAX(date) FROM (
            SELECT date FROM work_intervals WHERE user_id = ?1
            UNION ALL
            SELECT date FROM breaks WHERE user_id = ?1
         )",
        [user_id],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;

    Ok(DbStats {
        work_intervals: count(conn, "SELECT COUNT(*) FROM work_intervals WHERE user_id = ?1", user_id)?,
        open_intervals: count(
            conn,
            "SELECT COUNT(*) FROM work_intervals WHERE user_id = ?1 AND end_time IS NULL",
            user_id,
        )?,
        breaks: count(conn, "SELECT COUNT(*) FROM breaks WHERE user_id = ?1", user_id)?,
        time_entries: count(conn, "SELECT COUNT(*) FROM time_entries WHERE user_id = ?1", user_id)?,
        projects: conn.query_row("SELECT COUNT(*) FROM projects", [], |row| row.get(0))?,
        tasks: conn.query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))?,
        first_date,
        last_date,
    })
}

pub fn integrity_check(conn: &Connection) -> AppResult<String> {
    Ok(conn.query_row("PRAGMA integrity_check;", [], |row| row.get(0))?)
}

pub fn vacuum(conn: &Connection) -> AppResult<()> {
    conn.execute_batch("VACUUM;")?;
    Ok(())
}
