pub mod breaks;
pub mod config;
pub mod db;
pub mod entry;
pub mod init;
pub mod log;
pub mod project;
pub mod report;
pub mod settings;
pub mod timer;
pub mod work;

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::date::require_date;
use crate::utils::path::expand_tilde;
use chrono::NaiveDate;
use serde::Serialize;

/// Open the configured database and bring its schema up to date.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    let path = expand_tilde(&cfg.database);
    let pool = DbPool::new(&path.to_string_lossy())?;
    init_db(&pool.conn)?;
    Ok(pool)
}

pub(crate) fn date_arg(value: Option<&str>) -> AppResult<Option<NaiveDate>> {
    value.map(require_date).transpose()
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
