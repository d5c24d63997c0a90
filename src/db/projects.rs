//! Reference data: projects and their tasks.

use crate::db::db_utils::bool_column;
use crate::errors::AppResult;
use crate::models::project::{Project, Task};
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_project(row: &Row) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get("id")?,
        name: row.get("name")?,
        code: row.get("code")?,
        active: bool_column(row, "active")?,
    })
}

fn map_task(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get("id")?,
        project_id: row.get("project_id")?,
        name: row.get("name")?,
        active: bool_column(row, "active")?,
    })
}

pub fn insert_project(conn: &Connection, name: &str, code: Option<&str>, active: bool) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO projects (name, code, active) VALUES (?1, ?2, ?3)",
        params![name, code, active as i64],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_projects(conn: &Connection) -> AppResult<Vec<Project>> {
    let mut stmt = conn.prepare("SELECT id, name, code, active FROM projects ORDER BY name, id")?;
    let rows = stmt.query_map([], map_project)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get_project(conn: &Connection, id: i64) -> AppResult<Option<Project>> {
    let mut stmt = conn.prepare("SELECT id, name, code, active FROM projects WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_project).optional()?)
}

pub fn code_exists(conn: &Connection, code: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare("SELECT 1 FROM projects WHERE code = ?1")?;
    Ok(stmt.exists([code])?)
}

/// Tasks cascade; interval/entry references are set to NULL by the schema.
pub fn delete_project(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM projects WHERE id = ?1", [id])?)
}

pub fn insert_task(conn: &Connection, project_id: i64, name: &str, active: bool) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO tasks (project_id, name, active) VALUES (?1, ?2, ?3)",
        params![project_id, name, active as i64],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_tasks(conn: &Connection, project_id: Option<i64>) -> AppResult<Vec<Task>> {
    let mut stmt = conn.prepare(
        "SELECT id, project_id, name, active FROM tasks
         WHERE (?1 IS NULL OR project_id = ?1)
         ORDER BY name, id",
    )?;
    let rows = stmt.query_map([project_id], map_task)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get_task(conn: &Connection, id: i64) -> AppResult<Option<Task>> {
    let mut stmt = conn.prepare("SELECT id, project_id, name, active FROM tasks WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_task).optional()?)
}
