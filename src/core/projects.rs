use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::projects;
use crate::errors::{AppError, AppResult};
use crate::models::project::{Project, Task};
use rusqlite::Connection;

/// Reference data: projects and their tasks.
pub struct ProjectLogic;

impl ProjectLogic {
    pub fn create_project(pool: &mut DbPool, name: &str, code: Option<&str>) -> AppResult<Project> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::MissingField("name"));
        }
        let code = code.map(str::trim).filter(|c| !c.is_empty());

        pool.write(|tx| {
            if let Some(c) = code
                && projects::code_exists(tx, c)?
            {
                return Err(AppError::Validation(format!(
                    "Project code '{}' already exists",
                    c
                )));
            }

            let id = projects::insert_project(tx, name, code, true)?;
            ttlog(tx, "project_add", &id.to_string(), name)?;

            projects::get_project(tx, id)?.ok_or(AppError::NotFound {
                entity: "Project",
                id,
            })
        })
    }

    pub fn list_projects(conn: &Connection) -> AppResult<Vec<Project>> {
        projects::list_projects(conn)
    }

    /// `Ok(false)` when no such project exists. Intervals that referenced it
    /// keep their time and lose the reference.
    pub fn delete_project(pool: &mut DbPool, id: i64) -> AppResult<bool> {
        pool.write(|tx| {
            let removed = projects::delete_project(tx, id)? > 0;
            if removed {
                ttlog(tx, "project_del", &id.to_string(), "Project deleted")?;
            }
            Ok(removed)
        })
    }

    pub fn create_task(pool: &mut DbPool, project_id: i64, name: &str) -> AppResult<Task> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::MissingField("name"));
        }

        pool.write(|tx| {
            if projects::get_project(tx, project_id)?.is_none() {
                return Err(AppError::NotFound {
                    entity: "Project",
                    id: project_id,
                });
            }

            let id = projects::insert_task(tx, project_id, name, true)?;
            ttlog(tx, "task_add", &id.to_string(), name)?;

            projects::get_task(tx, id)?.ok_or(AppError::NotFound { entity: "Task", id })
        })
    }

    pub fn list_tasks(conn: &Connection, project_id: Option<i64>) -> AppResult<Vec<Task>> {
        projects::list_tasks(conn, project_id)
    }

    /// References attached to a time row must exist, and a task must belong
    /// to the project given alongside it.
    pub fn validate_refs(conn: &Connection, project_id: Option<i64>, task_id: Option<i64>) -> AppResult<()> {
        if let Some(pid) = project_id
            && projects::get_project(conn, pid)?.is_none()
        {
            return Err(AppError::Validation(format!("Unknown project #{}", pid)));
        }

        if let Some(tid) = task_id {
            let task = projects::get_task(conn, tid)?
                .ok_or_else(|| AppError::Validation(format!("Unknown task #{}", tid)))?;

            if let Some(pid) = project_id
                && task.project_id != pid
            {
                return Err(AppError::Validation(format!(
                    "Task #{} does not belong to project #{}",
                    tid, pid
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calculator::period::project_rollup;
    use crate::core::work::WorkLogic;
    use crate::db::initialize::init_db;
    use crate::models::work_interval::NewWorkInterval;
    use chrono::NaiveDate;

    fn pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        pool
    }

    #[test]
    fn project_codes_are_unique() {
        let mut pool = pool();
        ProjectLogic::create_project(&mut pool, "Internal", Some("INT")).unwrap();

        let err = ProjectLogic::create_project(&mut pool, "Other", Some("INT")).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(ProjectLogic::list_projects(&pool.conn).unwrap().len(), 1);
    }

    #[test]
    fn task_must_match_its_project() {
        let mut pool = pool();
        let a = ProjectLogic::create_project(&mut pool, "A", None).unwrap();
        let b = ProjectLogic::create_project(&mut pool, "B", None).unwrap();
        let task = ProjectLogic::create_task(&mut pool, a.id, "Design").unwrap();

        assert!(ProjectLogic::validate_refs(&pool.conn, Some(a.id), Some(task.id)).is_ok());
        assert!(ProjectLogic::validate_refs(&pool.conn, None, Some(task.id)).is_ok());
        assert!(ProjectLogic::validate_refs(&pool.conn, Some(b.id), Some(task.id)).is_err());
        assert!(ProjectLogic::validate_refs(&pool.conn, Some(999), None).is_err());
    }

    #[test]
    fn deleting_unknown_project_reports_false() {
        let mut pool = pool();
        assert!(!ProjectLogic::delete_project(&mut pool, 42).unwrap());
        assert!(matches!(
            ProjectLogic::create_task(&mut pool, 42, "x"),
            Err(AppError::NotFound { entity: "Project", .. })
        ));
    }

    #[test]
    fn deleting_project_keeps_its_intervals_unassigned() {
        let mut pool = pool();
        let project = ProjectLogic::create_project(&mut pool, "Client", Some("CLI")).unwrap();
        let task = ProjectLogic::create_task(&mut pool, project.id, "Support").unwrap();
        let wi = WorkLogic::create(
            &mut pool,
            1,
            NewWorkInterval {
                date: NaiveDate::from_ymd_opt(2025, 10, 1),
                start_time: Some("09:00".into()),
                end_time: Some("11:00".into()),
                project_id: Some(project.id),
                task_id: Some(task.id),
                notes: None,
            },
        )
        .unwrap();
        assert_eq!(wi.project_id, Some(project.id));

        assert!(ProjectLogic::delete_project(&mut pool, project.id).unwrap());
        assert!(ProjectLogic::list_tasks(&pool.conn, None).unwrap().is_empty());

        let listed = WorkLogic::list(&pool.conn, 1, None).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, wi.id);
        assert_eq!(listed[0].project_id, None);
        assert_eq!(listed[0].task_id, None);
        assert_eq!(listed[0].duration_minutes, Some(120));

        let rollup = project_rollup(&listed);
        assert_eq!(rollup.len(), 1);
        assert_eq!(rollup[0].project_id, None);
        assert_eq!(rollup[0].project_name, "Unassigned");
        assert_eq!(rollup[0].minutes, 120);
    }
}
