use crate::cli::commands::{open_pool, print_json};
use crate::cli::parser::{ProjectCmd, TaskCmd};
use crate::config::Config;
use crate::core::projects::ProjectLogic;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::table::Table;

pub fn handle(action: &ProjectCmd, cfg: &Config, json: bool) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;

    match action {
        ProjectCmd::Add { name, code } => {
            let p = ProjectLogic::create_project(&mut pool, name, code.as_deref())?;
            if json {
                return print_json(&p);
            }
            success(format!("Project #{} '{}' added.", p.id, p.name));
        }

        ProjectCmd::List => {
            let projects = ProjectLogic::list_projects(&pool.conn)?;
            if json {
                return print_json(&projects);
            }
            if projects.is_empty() {
                println!("No projects.");
                return Ok(());
            }

            let mut table = Table::new(["ID", "NAME", "CODE", "ACTIVE"]);
            for p in &projects {
                table.add_row(vec![
                    p.id.to_string(),
                    p.name.clone(),
                    p.code.clone().unwrap_or_default(),
                    if p.active { "yes" } else { "no" }.to_string(),
                ]);
            }
            print!("{}", table.render());
        }

        ProjectCmd::Del { id } => {
            let removed = ProjectLogic::delete_project(&mut pool, *id)?;
            if json {
                return print_json(&serde_json::json!({ "id": id, "deleted": removed }));
            }
            if removed {
                success(format!("Project #{} deleted (its tasks too).", id));
            } else {
                warning(format!("Project #{} not found.", id));
            }
        }
    }

    Ok(())
}

pub fn handle_task(action: &TaskCmd, cfg: &Config, json: bool) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;

    match action {
        TaskCmd::Add { project, name } => {
            let t = ProjectLogic::create_task(&mut pool, *project, name)?;
            if json {
                return print_json(&t);
            }
            success(format!("Task #{} '{}' added to project #{}.", t.id, t.name, t.project_id));
        }

        TaskCmd::List { project } => {
            let tasks = ProjectLogic::list_tasks(&pool.conn, *project)?;
            if json {
                return print_json(&tasks);
            }
            if tasks.is_empty() {
                println!("No tasks.");
                return Ok(());
            }

            let mut table = Table::new(["ID", "PROJECT", "NAME", "ACTIVE"]);
            for t in &tasks {
                table.add_row(vec![
                    t.id.to_string(),
                    t.project_id.to_string(),
                    t.name.clone(),
                    if t.active { "yes" } else { "no" }.to_string(),
                ]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
