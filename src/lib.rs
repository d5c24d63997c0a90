//! rWorktime library root.
//! Exposes the CLI parser, the high-level run() function, and the engine
//! modules (core, db, models) for direct use.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let json = cli.json;

    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::Config {
            print_config,
            check,
        } => commands::config::handle(*print_config, *check, cfg, json),
        Commands::Db {
            check,
            vacuum,
            info,
        } => commands::db::handle(*check, *vacuum, *info, cfg, json),
        Commands::Log { print } => commands::log::handle(*print, cfg, json),
        Commands::Timer { action } => commands::timer::handle(action, cfg, json),
        Commands::Work { action } => commands::work::handle(action, cfg, json),
        Commands::Break { action } => commands::breaks::handle(action, cfg, json),
        Commands::Entry { action } => commands::entry::handle(action, cfg, json),
        Commands::Project { action } => commands::project::handle(action, cfg, json),
        Commands::Task { action } => commands::project::handle_task(action, cfg, json),
        Commands::Day { date } => commands::report::handle_day(date.as_deref(), cfg, json),
        Commands::Month {
            year,
            month,
            projects,
        } => commands::report::handle_month(*year, *month, *projects, cfg, json),
        Commands::Year { year } => commands::report::handle_year(*year, cfg, json),
        Commands::Settings { action } => commands::settings::handle(action, cfg, json),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // load config once; command-line flags win over the file
    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    if let Some(user) = cli.user {
        cfg.user_id = user;
    }

    utils::logging::enable_logging(cli.verbose, Some(cfg.log_level.as_str()));
    tracing::debug!(database = %cfg.database, user_id = cfg.user_id, "configuration resolved");

    dispatch(&cli, &cfg)
}
