use crate::cli::commands::{date_arg, open_pool, print_json};
use crate::cli::parser::EntryCmd;
use crate::config::Config;
use crate::core::entries::EntryLogic;
use crate::errors::AppResult;
use crate::models::time_entry::NewTimeEntry;
use crate::ui::messages::{success, warning};
use crate::utils::date::require_date;
use crate::utils::formatting::{clock_or_dash, mins2readable};
use crate::utils::table::Table;

pub fn handle(action: &EntryCmd, cfg: &Config, json: bool) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;

    match action {
        EntryCmd::Add {
            date,
            start,
            end,
            duration,
            billable,
            attribution,
        } => {
            let input = NewTimeEntry {
                date: Some(require_date(date)?),
                start_time: start.clone(),
                end_time: end.clone(),
                duration_minutes: *duration,
                billable: *billable,
                project_id: attribution.project,
                task_id: attribution.task,
                notes: attribution.notes.clone(),
            };
            let e = EntryLogic::create(&mut pool, cfg.user_id, input)?;

            if json {
                return print_json(&e);
            }
            success(format!(
                "Entry #{} added: {} ({})",
                e.id,
                e.date,
                mins2readable(e.duration_minutes, false, false)
            ));
        }

        EntryCmd::Del { id } => {
            let removed = EntryLogic::delete(&mut pool, cfg.user_id, *id)?;

            if json {
                return print_json(&serde_json::json!({ "id": id, "deleted": removed }));
            }
            if removed {
                success(format!("Entry #{} deleted.", id));
            } else {
                warning(format!("Entry #{} not found.", id));
            }
        }

        EntryCmd::List { date } => {
            let rows = EntryLogic::list(&pool.conn, cfg.user_id, date_arg(date.as_deref())?)?;

            if json {
                return print_json(&rows);
            }
            if rows.is_empty() {
                println!("No entries.");
                return Ok(());
            }

            let mut table = Table::new(["ID", "DATE", "START", "END", "DURATION", "BILLABLE", "PROJECT", "NOTES"]);
            for e in &rows {
                table.add_row(vec![
                    e.id.to_string(),
                    e.date.to_string(),
                    clock_or_dash(e.start_time.as_deref()),
                    clock_or_dash(e.end_time.as_deref()),
                    mins2readable(e.duration_minutes, false, true),
                    if e.billable { "yes" } else { "no" }.to_string(),
                    e.project_name.clone().unwrap_or_default(),
                    e.notes.clone().unwrap_or_default(),
                ]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
