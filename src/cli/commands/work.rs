use crate::cli::commands::{date_arg, open_pool, print_json};
use crate::cli::parser::WorkCmd;
use crate::config::Config;
use crate::core::work::WorkLogic;
use crate::errors::AppResult;
use crate::models::work_interval::{NewWorkInterval, WorkInterval, WorkIntervalPatch};
use crate::ui::messages::{success, warning};
use crate::utils::date::require_date;
use crate::utils::formatting::{clock_or_dash, mins2readable};
use crate::utils::table::Table;

pub fn handle(action: &WorkCmd, cfg: &Config, json: bool) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;

    match action {
        WorkCmd::Add {
            date,
            start,
            end,
            attribution,
        } => {
            let input = NewWorkInterval {
                date: Some(require_date(date)?),
                start_time: Some(start.clone()),
                end_time: Some(end.clone()),
                project_id: attribution.project,
                task_id: attribution.task,
                notes: attribution.notes.clone(),
            };
            let wi = WorkLogic::create(&mut pool, cfg.user_id, input)?;

            if json {
                return print_json(&wi);
            }
            success(format!("Work interval #{} added: {}", wi.id, describe(&wi)));
        }

        WorkCmd::Edit {
            id,
            date,
            start,
            end,
            attribution,
            clear_project,
            clear_notes,
        } => {
            let patch = WorkIntervalPatch {
                date: date_arg(date.as_deref())?,
                start_time: start.clone(),
                end_time: end.clone(),
                project_id: if *clear_project {
                    Some(None)
                } else {
                    attribution.project.map(Some)
                },
                task_id: if *clear_project {
                    Some(None)
                } else {
                    attribution.task.map(Some)
                },
                notes: if *clear_notes {
                    Some(None)
                } else {
                    attribution.notes.clone().map(Some)
                },
            };
            let wi = WorkLogic::update(&mut pool, cfg.user_id, *id, patch)?;

            if json {
                return print_json(&wi);
            }
            success(format!("Work interval #{} updated: {}", wi.id, describe(&wi)));
        }

        WorkCmd::Del { id } => {
            let removed = WorkLogic::delete(&mut pool, cfg.user_id, *id)?;

            if json {
                return print_json(&serde_json::json!({ "id": id, "deleted": removed }));
            }
            if removed {
                success(format!("Work interval #{} deleted.", id));
            } else {
                warning(format!("Work interval #{} not found.", id));
            }
        }

        WorkCmd::List { date } => {
            let rows = WorkLogic::list(&pool.conn, cfg.user_id, date_arg(date.as_deref())?)?;

            if json {
                return print_json(&rows);
            }
            if rows.is_empty() {
                println!("No work intervals.");
            } else {
                print!("{}", work_table(&rows).render());
            }
        }
    }

    Ok(())
}

fn describe(wi: &WorkInterval) -> String {
    format!(
        "{} {}–{} ({})",
        wi.date,
        clock_or_dash(wi.start_time.as_deref()),
        clock_or_dash(wi.end_time.as_deref()),
        wi.duration_minutes
            .map(|m| mins2readable(m, false, false))
            .unwrap_or_else(|| "running".to_string())
    )
}

pub(crate) fn work_table(rows: &[WorkInterval]) -> Table {
    let mut table = Table::new(["ID", "DATE", "START", "END", "DURATION", "PROJECT", "TASK", "NOTES"]);
    for wi in rows {
        table.add_row(vec![
            wi.id.to_string(),
            wi.date.to_string(),
            clock_or_dash(wi.start_time.as_deref()),
            clock_or_dash(wi.end_time.as_deref()),
            wi.duration_minutes
                .map(|m| mins2readable(m, false, true))
                .unwrap_or_else(|| "running".to_string()),
            wi.project_name.clone().unwrap_or_default(),
            wi.task_name.clone().unwrap_or_default(),
            wi.notes.clone().unwrap_or_default(),
        ]);
    }
    table
}
