use crate::cli::commands::{open_pool, print_json};
use crate::config::Config;
use crate::db::migrate::applied_versions;
use crate::db::stats::{self, DbStats};
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};
use crate::utils::formatting::bold;

pub fn handle(check: bool, vacuum: bool, info: bool, cfg: &Config, json: bool) -> AppResult<()> {
    let pool = open_pool(cfg)?;

    //
    // INFO
    //
    if info {
        let db_stats = stats::collect_stats(&pool.conn, cfg.user_id)?;
        let versions = applied_versions(&pool.conn)?;
        if json {
            print_json(&serde_json::json!({
                "database": cfg.database,
                "migrations": versions,
                "stats": db_stats,
            }))?;
        } else {
            print_info(&cfg.database, &versions, &db_stats);
        }
    }

    //
    // CHECK
    //
    if check {
        if !json {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);
        }
        let integrity = stats::integrity_check(&pool.conn)?;

        if json {
            print_json(&serde_json::json!({ "integrity": integrity }))?;
        } else if integrity == "ok" {
            println!("{}✔ Integrity check passed.{}\n", GREEN, RESET);
        } else {
            println!("{}✘ Integrity check failed:{} {}\n", RED, RESET, integrity);
        }
    }

    //
    // VACUUM
    //
    if vacuum {
        if !json {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);
        }
        stats::vacuum(&pool.conn)?;
        if !json {
            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }
    }

    Ok(())
}

fn print_info(path: &str, versions: &[String], s: &DbStats) {
    println!("{}", bold("🗄️  Database information"));
    println!("  path            : {}", path);
    println!("  migrations      : {}", versions.join(", "));
    println!("  work intervals  : {} ({} open)", s.work_intervals, s.open_intervals);
    println!("  breaks          : {}", s.breaks);
    println!("  time entries    : {}", s.time_entries);
    println!("  projects/tasks  : {}/{}", s.projects, s.tasks);
    match (&s.first_date, &s.last_date) {
        (Some(first), Some(last)) => println!("  recorded span   : {} → {}", first, last),
        _ => println!("  recorded span   : -"),
    }
    println!();
}
