//! Schema migrations. Each step runs once; applied steps are recorded in the
//! `log` table as `migration_applied` with the version as target.

use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::info;

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "0001_core_schema",
        description: "Create users, projects, tasks, settings, work_intervals, breaks, time_entries",
        sql: r#"
        CREATE TABLE IF NOT EXISTS users (
            id       INTEGER PRIMARY KEY AUTOINCREMENT,
            name     TEXT NOT NULL,
            email    TEXT,
            timezone TEXT DEFAULT 'Europe/Berlin'
        );

        CREATE TABLE IF NOT EXISTS projects (
            id     INTEGER PRIMARY KEY AUTOINCREMENT,
            name   TEXT NOT NULL,
            code   TEXT UNIQUE,
            active INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS tasks (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            project_id INTEGER NOT NULL,
            name       TEXT NOT NULL,
            active     INTEGER NOT NULL DEFAULT 1,
            FOREIGN KEY (project_id) REFERENCES projects(id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS settings (
            id                          INTEGER PRIMARY KEY CHECK (id = 1),
            max_hours_per_day           INTEGER DEFAULT 10,
            max_hours_per_week          INTEGER DEFAULT 48,
            work_window_start           TEXT DEFAULT '06:00',
            work_window_end             TEXT DEFAULT '22:00',
            target_hours_per_day        INTEGER DEFAULT 8,
            missing_hours_reminder_time TEXT DEFAULT '18:00'
        );

        CREATE TABLE IF NOT EXISTS work_intervals (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id          INTEGER NOT NULL,
            date             TEXT NOT NULL,          -- YYYY-MM-DD
            start_time       TEXT NOT NULL,          -- HH:mm
            end_time         TEXT,                   -- NULL while running
            duration_minutes INTEGER,                -- NULL while running
            project_id       INTEGER,
            task_id          INTEGER,
            notes            TEXT,
            created_at       TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at       TEXT NOT NULL DEFAULT (datetime('now')),
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
            FOREIGN KEY (project_id) REFERENCES projects(id) ON DELETE SET NULL,
            FOREIGN KEY (task_id) REFERENCES tasks(id) ON DELETE SET NULL
        );

        CREATE TRIGGER IF NOT EXISTS work_intervals_update_ts
        AFTER UPDATE ON work_intervals
        BEGIN
            UPDATE work_intervals SET updated_at = datetime('now') WHERE id = NEW.id;
        END;

        CREATE TABLE IF NOT EXISTS breaks (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id          INTEGER NOT NULL,
            date             TEXT NOT NULL,
            start_time       TEXT,
            end_time         TEXT,
            duration_minutes INTEGER NOT NULL,
            notes            TEXT,
            created_at       TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at       TEXT NOT NULL DEFAULT (datetime('now')),
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
        );

        CREATE TRIGGER IF NOT EXISTS breaks_update_ts
        AFTER UPDATE ON breaks
        BEGIN
            UPDATE breaks SET updated_at = datetime('now') WHERE id = NEW.id;
        END;

        CREATE TABLE IF NOT EXISTS time_entries (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id          INTEGER NOT NULL,
            project_id       INTEGER,
            task_id          INTEGER,
            date             TEXT NOT NULL,
            start_time       TEXT,
            end_time         TEXT,
            duration_minutes INTEGER NOT NULL,
            billable         INTEGER NOT NULL DEFAULT 0,
            notes            TEXT,
            created_at       TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at       TEXT NOT NULL DEFAULT (datetime('now')),
            FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
            FOREIGN KEY (project_id) REFERENCES projects(id) ON DELETE SET NULL,
            FOREIGN KEY (task_id) REFERENCES tasks(id) ON DELETE SET NULL
        );

        CREATE TRIGGER IF NOT EXISTS time_entries_update_ts
        AFTER UPDATE ON time_entries
        BEGIN
            UPDATE time_entries SET updated_at = datetime('now') WHERE id = NEW.id;
        END;

        CREATE INDEX IF NOT EXISTS idx_time_entries_user_date ON time_entries (user_id, date);
        CREATE INDEX IF NOT EXISTS idx_tasks_project ON tasks (project_id);
        CREATE INDEX IF NOT EXISTS idx_work_intervals_user_date ON work_intervals (user_id, date);
        CREATE INDEX IF NOT EXISTS idx_breaks_user_date ON breaks (user_id, date);
        "#,
    },
    Migration {
        version: "0002_seed_defaults",
        description: "Provision the default user and the settings row",
        sql: r#"
        INSERT INTO users (name, email)
            SELECT 'Local User', NULL
            WHERE NOT EXISTS (SELECT 1 FROM users);

        INSERT INTO settings (id)
            SELECT 1
            WHERE NOT EXISTS (SELECT 1 FROM settings);
        "#,
    },
];

/// Ensure that the `log` table exists; migrations are tracked in it.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(m.sql)
        .map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;

    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        params![m.version, m.description],
    )?;

    tx.commit()?;
    info!(version = m.version, "migration applied");
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by `db::initialize::init_db()` and every time a database is opened.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            apply(conn, m)?;
        }
    }

    Ok(())
}

/// Versions recorded as applied, oldest first.
pub fn applied_versions(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent_and_seed_defaults() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        run_pending_migrations(&conn).unwrap();

        assert_eq!(
            applied_versions(&conn).unwrap(),
            vec!["0001_core_schema", "0002_seed_defaults"]
        );

        let users: i64 = conn
            .query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))
            .unwrap();
        let settings: i64 = conn
            .query_row("SELECT COUNT(*) FROM settings", [], |r| r.get(0))
            .unwrap();
        assert_eq!((users, settings), (1, 1));
    }
}
