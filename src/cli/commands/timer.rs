use crate::cli::commands::{date_arg, open_pool, print_json};
use crate::cli::parser::TimerCmd;
use crate::config::Config;
use crate::core::timer::{TimerLogic, TimerStart};
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::clock::SystemClock;
use crate::utils::formatting::{clock_or_dash, mins2readable};

pub fn handle(action: &TimerCmd, cfg: &Config, json: bool) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;
    let clock = SystemClock;

    match action {
        TimerCmd::Start {
            date,
            at,
            attribution,
        } => {
            let req = TimerStart {
                date: date_arg(date.as_deref())?,
                start_time: at.clone(),
                project_id: attribution.project,
                task_id: attribution.task,
                notes: attribution.notes.clone(),
            };
            let wi = TimerLogic::start(&mut pool, cfg.user_id, req, &clock)?;

            if json {
                return print_json(&wi);
            }
            success(format!(
                "Timer started on {} at {} (#{})",
                wi.date,
                clock_or_dash(wi.start_time.as_deref()),
                wi.id
            ));
        }

        TimerCmd::Stop { date, at } => {
            let wi = TimerLogic::stop(
                &mut pool,
                cfg.user_id,
                date_arg(date.as_deref())?,
                at.as_deref(),
                &clock,
            )?;

            if json {
                return print_json(&wi);
            }
            success(format!(
                "Timer stopped: {} {}–{} ({})",
                wi.date,
                clock_or_dash(wi.start_time.as_deref()),
                clock_or_dash(wi.end_time.as_deref()),
                mins2readable(wi.duration_minutes.unwrap_or(0), false, false)
            ));
        }

        TimerCmd::Status { date } => {
            let status = TimerLogic::status(&pool.conn, cfg.user_id, date_arg(date.as_deref())?, &clock)?;

            if json {
                return print_json(&status);
            }
            match &status.interval {
                Some(wi) => info(format!(
                    "Running since {} on {} (#{}, {} so far)",
                    clock_or_dash(wi.start_time.as_deref()),
                    status.date,
                    wi.id,
                    mins2readable(status.live_minutes, false, false)
                )),
                None => info(format!("No running interval on {}", status.date)),
            }
        }
    }

    Ok(())
}
