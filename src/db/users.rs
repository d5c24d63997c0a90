use crate::errors::{AppError, AppResult};
use rusqlite::Connection;

pub fn exists(conn: &Connection, user_id: i64) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached("SELECT 1 FROM users WHERE id = ?1")?;
    Ok(stmt.exists([user_id])?)
}

/// Every engine call is scoped to an explicit user; reject unknown ids up front.
pub fn require(conn: &Connection, user_id: i64) -> AppResult<()> {
    if exists(conn, user_id)? {
        Ok(())
    } else {
        Err(AppError::NotFound {
            entity: "User",
            id: user_id,
        })
    }
}

pub fn count(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?)
}

pub fn insert(conn: &Connection, name: &str, email: Option<&str>) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO users (name, email) VALUES (?1, ?2)",
        rusqlite::params![name, email],
    )?;
    Ok(conn.last_insert_rowid())
}
