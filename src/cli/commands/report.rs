use crate::cli::commands::breaks::break_table;
use crate::cli::commands::work::work_table;
use crate::cli::commands::{date_arg, open_pool, print_json};
use crate::config::Config;
use crate::core::breaks::BreakLogic;
use crate::core::report::ReportLogic;
use crate::core::settings::SettingsLogic;
use crate::core::work::WorkLogic;
use crate::errors::AppResult;
use crate::models::summary::{DaySummary, MonthOverview, PeriodTotals, ProjectRollup, YearSummary};
use crate::ui::messages::{header, warning};
use crate::utils::clock::SystemClock;
use crate::utils::colors::{RESET, color_for_balance, colorize_optional};
use crate::utils::formatting::{bold, clock_or_dash, mins2readable};
use crate::utils::table::Table;
use serde_json::json;

pub fn handle_day(date: Option<&str>, cfg: &Config, json: bool) -> AppResult<()> {
    let pool = open_pool(cfg)?;
    let summary = ReportLogic::day(&pool.conn, cfg.user_id, date_arg(date)?, &SystemClock)?;
    let date = summary.date;
    let intervals = WorkLogic::list(&pool.conn, cfg.user_id, Some(date))?;
    let breaks = BreakLogic::list(&pool.conn, cfg.user_id, Some(date))?;

    if json {
        return print_json(&json!({
            "summary": summary,
            "intervals": intervals,
            "breaks": breaks,
        }));
    }

    header(format!("{} ({})", date, date.format("%a")));
    if !intervals.is_empty() {
        print!("{}", work_table(&intervals).render());
        println!();
    }
    if !breaks.is_empty() {
        print!("{}", break_table(&breaks).render());
        println!();
    }
    print_day(&summary);
    Ok(())
}

fn print_day(s: &DaySummary) {
    println!("Worked    : {}", mins2readable(s.work_minutes, false, false));
    println!("Breaks    : {}", colorize_optional(&mins2readable(s.break_minutes, false, false)));
    println!("Recorded  : {}", bold(&mins2readable(s.recorded_minutes, false, false)));
    if let Some(since) = &s.running_since {
        println!(
            "Running   : since {} ({})",
            since,
            mins2readable(s.running_minutes, false, false)
        );
        println!("Effective : {}", mins2readable(s.effective_minutes, false, false));
    }
    println!(
        "Span      : {} → {}",
        colorize_optional(&clock_or_dash(s.first_start.as_deref())),
        colorize_optional(&clock_or_dash(s.last_end.as_deref()))
    );
    for w in &s.warnings {
        warning(w);
    }
}

pub fn handle_month(year: i32, month: u32, projects: bool, cfg: &Config, json: bool) -> AppResult<()> {
    let pool = open_pool(cfg)?;

    if projects {
        let rollup = ReportLogic::month_projects(&pool.conn, cfg.user_id, year, month)?;
        if json {
            return print_json(&rollup);
        }
        header(format!("Projects {}-{:02}", year, month));
        print_projects(&rollup.projects);
        return Ok(());
    }

    let settings = SettingsLogic::load(&pool.conn)?;
    let overview = ReportLogic::month(&pool.conn, cfg.user_id, year, month, &settings, &SystemClock)?;
    if json {
        return print_json(&overview);
    }

    header(format!("{}-{:02}", year, month));
    print_month(&overview);
    Ok(())
}

fn print_month(m: &MonthOverview) {
    let mut table = Table::new(["DATE", "DAY", "WORK", "BREAK", "RECORDED", "FIRST", "LAST", ""]);
    for d in &m.days {
        let s = &d.summary;
        let mut flags = String::new();
        if !d.working_day {
            flags.push_str("weekend ");
        }
        if s.running_since.is_some() {
            flags.push_str("running ");
        }
        if !s.warnings.is_empty() {
            flags.push_str("⚠ rest");
        }

        table.add_row(vec![
            s.date.to_string(),
            d.weekday.to_string(),
            mins2readable(s.work_minutes, false, true),
            mins2readable(s.break_minutes, false, true),
            mins2readable(s.recorded_minutes, false, true),
            clock_or_dash(s.first_start.as_deref()),
            clock_or_dash(s.last_end.as_deref()),
            flags.trim_end().to_string(),
        ]);
    }
    print!("{}", table.render());
    println!();
    print_totals(&m.totals);

    for d in m.days.iter().filter(|d| !d.summary.warnings.is_empty()) {
        for w in &d.summary.warnings {
            warning(format!("{}: {}", d.summary.date, w));
        }
    }
}

fn print_totals(t: &PeriodTotals) {
    println!("Working days : {}", t.working_days);
    println!("Must         : {}", mins2readable(t.must_minutes, false, false));
    println!("Recorded     : {}", mins2readable(t.recorded_minutes, false, false));
    println!(
        "Balance      : {}{}{}",
        color_for_balance(t.balance_minutes),
        mins2readable(t.balance_minutes, true, false),
        RESET
    );
}

fn print_projects(projects: &[ProjectRollup]) {
    if projects.is_empty() {
        println!("No closed work intervals.");
        return;
    }

    let mut table = Table::new(["PROJECT", "TASK", "TIME"]);
    for p in projects {
        table.add_row(vec![
            p.project_name.clone(),
            String::new(),
            mins2readable(p.minutes, false, true),
        ]);
        for t in &p.tasks {
            table.add_row(vec![
                String::new(),
                t.task_name.clone(),
                mins2readable(t.minutes, false, true),
            ]);
        }
    }
    print!("{}", table.render());
}

pub fn handle_year(year: i32, cfg: &Config, json: bool) -> AppResult<()> {
    let pool = open_pool(cfg)?;
    let settings = SettingsLogic::load(&pool.conn)?;
    let summary = ReportLogic::year(&pool.conn, cfg.user_id, year, &settings, &SystemClock)?;

    if json {
        return print_json(&summary);
    }

    header(format!("Year {}", year));
    print_year(&summary);
    Ok(())
}

fn print_year(y: &YearSummary) {
    let mut table = Table::new(["MONTH", "WORKDAYS", "MUST", "RECORDED", "BALANCE"]);
    for m in &y.months {
        table.add_row(vec![
            format!("{}-{:02}", y.year, m.month),
            m.totals.working_days.to_string(),
            mins2readable(m.totals.must_minutes, false, true),
            mins2readable(m.totals.recorded_minutes, false, true),
            mins2readable(m.totals.balance_minutes, true, true),
        ]);
    }
    print!("{}", table.render());
    println!();
    print_totals(&y.totals);
    println!();
    print_projects(&y.projects);
}
