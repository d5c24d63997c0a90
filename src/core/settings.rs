use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::settings;
use crate::errors::{AppError, AppResult};
use crate::models::settings::Settings;
use crate::utils::time::canonical_clock;
use rusqlite::Connection;
use tracing::info;

/// Fields to change; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct SettingsPatch {
    pub target_hours_per_day: Option<i64>,
    pub max_hours_per_day: Option<i64>,
    pub max_hours_per_week: Option<i64>,
    pub work_window_start: Option<String>,
    pub work_window_end: Option<String>,
    pub missing_hours_reminder_time: Option<String>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self.target_hours_per_day.is_none()
            && self.max_hours_per_day.is_none()
            && self.max_hours_per_week.is_none()
            && self.work_window_start.is_none()
            && self.work_window_end.is_none()
            && self.missing_hours_reminder_time.is_none()
    }
}

fn hours_in(field: &str, value: i64, max: i64) -> AppResult<i64> {
    if (1..=max).contains(&value) {
        Ok(value)
    } else {
        Err(AppError::Validation(format!(
            "{} must be between 1 and {} (got {})",
            field, max, value
        )))
    }
}

pub struct SettingsLogic;

impl SettingsLogic {
    pub fn load(conn: &Connection) -> AppResult<Settings> {
        settings::load(conn)
    }

    /// Only the target feeds a computation. The limits and the window are
    /// stored for display; nothing enforces them.
    pub fn update(pool: &mut DbPool, patch: SettingsPatch) -> AppResult<Settings> {
        let saved = pool.write(|tx| {
            let mut s = settings::load(tx)?;

            if let Some(v) = patch.target_hours_per_day {
                s.target_hours_per_day = hours_in("target_hours_per_day", v, 24)?;
            }
            if let Some(v) = patch.max_hours_per_day {
                s.max_hours_per_day = hours_in("max_hours_per_day", v, 24)?;
            }
            if let Some(v) = patch.max_hours_per_week {
                s.max_hours_per_week = hours_in("max_hours_per_week", v, 168)?;
            }
            if let Some(t) = &patch.work_window_start {
                s.work_window_start = canonical_clock(t)?;
            }
            if let Some(t) = &patch.work_window_end {
                s.work_window_end = canonical_clock(t)?;
            }
            if let Some(t) = &patch.missing_hours_reminder_time {
                s.missing_hours_reminder_time = canonical_clock(t)?;
            }

            settings::save(tx, &s)?;
            ttlog(
                tx,
                "settings",
                "",
                &format!("target {}h/day", s.target_hours_per_day),
            )?;
            Ok(s)
        })?;

        info!(target_hours = saved.target_hours_per_day, "settings saved");
        Ok(saved)
    }
}
