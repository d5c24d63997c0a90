use crate::db::log::{LogRow, load_log};
use crate::errors::AppResult;
use ansi_term::Colour;
use rusqlite::Connection;

const OP_WIDTH_MAX: usize = 60;

/// ANSI colour by operation family.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "init" => Colour::RGB(255, 153, 51),
        "migration_applied" => Colour::Purple,
        "settings" => Colour::Cyan,
        other if other.ends_with("_add") || other == "timer_start" => Colour::Green,
        other if other.ends_with("_del") => Colour::Red,
        other if other.ends_with("_edit") || other == "timer_stop" => Colour::Yellow,
        _ => Colour::White,
    }
}

fn op_target(row: &LogRow) -> String {
    if row.target.is_empty() {
        row.operation.clone()
    } else {
        format!("{} ({})", row.operation, row.target)
    }
}

/// Cut to `max` visible chars, "..." included.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(conn: &Connection) -> AppResult<()> {
        let entries = load_log(conn)?;
        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let dates: Vec<String> = entries
            .iter()
            .map(|r| {
                chrono::DateTime::parse_from_rfc3339(&r.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or_else(|_| r.date.clone())
            })
            .collect();
        let labels: Vec<String> = entries
            .iter()
            .map(|r| truncate(&op_target(r), OP_WIDTH_MAX))
            .collect();

        let id_w = entries.iter().map(|r| r.id.to_string().len()).max().unwrap_or(1);
        let date_w = dates.iter().map(|d| d.len()).max().unwrap_or(10);
        let op_w = labels
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(10)
            .min(OP_WIDTH_MAX);

        println!("📜 Internal log:\n");

        for ((row, date), label) in entries.iter().zip(&dates).zip(&labels) {
            let color = color_for_operation(&row.operation);

            // only the operation word is coloured; padding is measured on plain text
            let colored = match label.split_once(' ') {
                Some((op, rest)) => format!("{} {}", color.paint(op), rest),
                None => color.paint(label.as_str()).to_string(),
            };
            let padding = " ".repeat(op_w.saturating_sub(label.chars().count()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                row.id,
                date,
                colored,
                padding,
                row.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_labels_are_cut_with_ellipsis() {
        let long = "x".repeat(80);
        let cut = truncate(&long, 60);
        assert_eq!(cut.chars().count(), 60);
        assert!(cut.ends_with("..."));
        assert_eq!(truncate("work_add (3)", 60), "work_add (3)");
    }

    #[test]
    fn operations_map_to_families() {
        assert_eq!(color_for_operation("break_add"), Colour::Green);
        assert_eq!(color_for_operation("work_del"), Colour::Red);
        assert_eq!(color_for_operation("timer_stop"), Colour::Yellow);
    }
}
