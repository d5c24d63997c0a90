use crate::cli::commands::{date_arg, open_pool, print_json};
use crate::cli::parser::BreakCmd;
use crate::config::Config;
use crate::core::breaks::BreakLogic;
use crate::errors::AppResult;
use crate::models::pause::{Break, BreakPatch, NewBreak};
use crate::ui::messages::{success, warning};
use crate::utils::date::require_date;
use crate::utils::formatting::{clock_or_dash, mins2readable};
use crate::utils::table::Table;

pub fn handle(action: &BreakCmd, cfg: &Config, json: bool) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;

    match action {
        BreakCmd::Add {
            date,
            start,
            end,
            duration,
            notes,
        } => {
            let input = NewBreak {
                date: Some(require_date(date)?),
                start_time: start.clone(),
                end_time: end.clone(),
                duration_minutes: *duration,
                notes: notes.clone(),
            };
            let b = BreakLogic::create(&mut pool, cfg.user_id, input)?;

            if json {
                return print_json(&b);
            }
            success(format!("Break #{} added: {}", b.id, describe(&b)));
        }

        BreakCmd::Edit {
            id,
            date,
            start,
            end,
            duration,
            notes,
            clear_times,
        } => {
            let moved = start.is_some() || end.is_some();
            let patch = BreakPatch {
                date: date_arg(date.as_deref())?,
                start_time: if *clear_times {
                    Some(None)
                } else {
                    start.clone().map(Some)
                },
                end_time: if *clear_times {
                    Some(None)
                } else {
                    end.clone().map(Some)
                },
                // new times without a new duration: recompute from start/end
                duration_minutes: match duration {
                    Some(d) => Some(Some(*d)),
                    None if moved => Some(None),
                    None => None,
                },
                notes: notes.clone().map(Some),
            };
            let b = BreakLogic::update(&mut pool, cfg.user_id, *id, patch)?;

            if json {
                return print_json(&b);
            }
            success(format!("Break #{} updated: {}", b.id, describe(&b)));
        }

        BreakCmd::Del { id } => {
            let removed = BreakLogic::delete(&mut pool, cfg.user_id, *id)?;

            if json {
                return print_json(&serde_json::json!({ "id": id, "deleted": removed }));
            }
            if removed {
                success(format!("Break #{} deleted.", id));
            } else {
                warning(format!("Break #{} not found.", id));
            }
        }

        BreakCmd::List { date } => {
            let rows = BreakLogic::list(&pool.conn, cfg.user_id, date_arg(date.as_deref())?)?;

            if json {
                return print_json(&rows);
            }
            if rows.is_empty() {
                println!("No breaks.");
            } else {
                print!("{}", break_table(&rows).render());
            }
        }
    }

    Ok(())
}

fn describe(b: &Break) -> String {
    if b.is_duration_only() {
        format!("{} ({})", b.date, mins2readable(b.duration_minutes, false, false))
    } else {
        format!(
            "{} {}–{} ({})",
            b.date,
            clock_or_dash(b.start_time.as_deref()),
            clock_or_dash(b.end_time.as_deref()),
            mins2readable(b.duration_minutes, false, false)
        )
    }
}

pub(crate) fn break_table(rows: &[Break]) -> Table {
    let mut table = Table::new(["ID", "DATE", "START", "END", "DURATION", "NOTES"]);
    for b in rows {
        table.add_row(vec![
            b.id.to_string(),
            b.date.to_string(),
            clock_or_dash(b.start_time.as_deref()),
            clock_or_dash(b.end_time.as_deref()),
            mins2readable(b.duration_minutes, false, true),
            b.notes.clone().unwrap_or_default(),
        ]);
    }
    table
}
