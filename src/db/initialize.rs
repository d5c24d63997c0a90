use crate::db::migrate::run_pending_migrations;
use crate::db::users;
use crate::errors::AppResult;
use rusqlite::Connection;
use tracing::info;

pub const DEFAULT_USER_NAME: &str = "Local User";

/// Bring the schema up to date and make sure at least one user exists.
///
/// The seed migration only runs once; a store whose users were all removed
/// afterwards gets a fresh default user here.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    run_pending_migrations(conn)?;

    if users::count(conn)? == 0 {
        let id = users::insert(conn, DEFAULT_USER_NAME, None)?;
        info!(id, "default user provisioned");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_user_is_reprovisioned() {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        assert!(users::exists(&conn, 1).unwrap());

        conn.execute("DELETE FROM users", []).unwrap();
        init_db(&conn).unwrap();
        assert_eq!(users::count(&conn).unwrap(), 1);
    }
}
