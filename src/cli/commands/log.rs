use crate::cli::commands::{open_pool, print_json};
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::db::log::load_log;
use crate::errors::AppResult;
use crate::ui::messages::info;

pub fn handle(print: bool, cfg: &Config, json: bool) -> AppResult<()> {
    if !print {
        info("Use `rworktime log --print` to show the internal log.");
        return Ok(());
    }

    let pool = open_pool(cfg)?;
    if json {
        return print_json(&load_log(&pool.conn)?);
    }

    LogLogic::print_log(&pool.conn)
}
