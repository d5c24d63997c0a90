use crate::cli::commands::{open_pool, print_json};
use crate::cli::parser::SettingsCmd;
use crate::config::Config;
use crate::core::settings::{SettingsLogic, SettingsPatch};
use crate::errors::AppResult;
use crate::models::settings::Settings;
use crate::ui::messages::{success, warning};

pub fn handle(action: &SettingsCmd, cfg: &Config, json: bool) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;

    let settings = match action {
        SettingsCmd::Show => SettingsLogic::load(&pool.conn)?,
        SettingsCmd::Set {
            target_hours,
            max_hours_day,
            max_hours_week,
            window_start,
            window_end,
            reminder,
        } => {
            let patch = SettingsPatch {
                target_hours_per_day: *target_hours,
                max_hours_per_day: *max_hours_day,
                max_hours_per_week: *max_hours_week,
                work_window_start: window_start.clone(),
                work_window_end: window_end.clone(),
                missing_hours_reminder_time: reminder.clone(),
            };
            if patch.is_empty() {
                if !json {
                    warning("Nothing to change.");
                }
                SettingsLogic::load(&pool.conn)?
            } else {
                let saved = SettingsLogic::update(&mut pool, patch)?;
                if !json {
                    success("Settings saved.");
                }
                saved
            }
        }
    };

    if json {
        return print_json(&settings);
    }
    print_settings(&settings);
    Ok(())
}

fn print_settings(s: &Settings) {
    println!("⚙️  Settings:");
    println!("  target hours/day     : {}", s.target_hours_per_day);
    println!("  max hours/day        : {}", s.max_hours_per_day);
    println!("  max hours/week       : {}", s.max_hours_per_week);
    println!("  work window          : {}–{}", s.work_window_start, s.work_window_end);
    println!("  missing-hours remind : {}", s.missing_hours_reminder_time);
}
