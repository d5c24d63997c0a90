//! The singleton `settings` row (id = 1).

use crate::errors::AppResult;
use crate::models::settings::Settings;
use rusqlite::{Connection, OptionalExtension, params};

pub fn load(conn: &Connection) -> AppResult<Settings> {
    let defaults = Settings::default();
    let row = conn
        .query_row(
            "SELECT target_hours_per_day, max_hours_per_day, max_hours_per_week,
                    work_window_start, work_window_end, missing_hours_reminder_time
             FROM settings WHERE id = 1",
            [],
            |row| {
                Ok(Settings {
                    target_hours_per_day: row
                        .get::<_, Option<i64>>(0)?
                        .unwrap_or(defaults.target_hours_per_day),
                    max_hours_per_day: row
                        .get::<_, Option<i64>>(1)?
                        .unwrap_or(defaults.max_hours_per_day),
                    max_hours_per_week: row
                        .get::<_, Option<i64>>(2)?
                        .unwrap_or(defaults.max_hours_per_week),
                    work_window_start: row
                        .get::<_, Option<String>>(3)?
                        .unwrap_or_else(|| defaults.work_window_start.clone()),
                    work_window_end: row
                        .get::<_, Option<String>>(4)?
                        .unwrap_or_else(|| defaults.work_window_end.clone()),
                    missing_hours_reminder_time: row
                        .get::<_, Option<String>>(5)?
                        .unwrap_or_else(|| defaults.missing_hours_reminder_time.clone()),
                })
            },
        )
        .optional()?;

    Ok(row.unwrap_or(defaults))
}

pub fn save(conn: &Connection, s: &Settings) -> AppResult<()> {
    conn.execute(
        "INSERT INTO settings (id, target_hours_per_day, max_hours_per_day, max_hours_per_week,
                               work_window_start, work_window_end, missing_hours_reminder_time)
         VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(id) DO UPDATE SET
            target_hours_per_day = excluded.target_hours_per_day,
            max_hours_per_day = excluded.max_hours_per_day,
            max_hours_per_week = excluded.max_hours_per_week,
            work_window_start = excluded.work_window_start,
            work_window_end = excluded.work_window_end,
            missing_hours_reminder_time = excluded.missing_hours_reminder_time",
        params![
            s.target_hours_per_day,
            s.max_hours_per_day,
            s.max_hours_per_week,
            s.work_window_start,
            s.work_window_end,
            s.missing_hours_reminder_time,
        ],
    )?;
    Ok(())
}
