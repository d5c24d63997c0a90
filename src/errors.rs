//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError so that validation,
//! conflict, not-found and storage failures stay distinguishable up to the CLI.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // Storage
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Validation
    // ---------------------------
    #[error("Invalid date format: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid time format: {0} (expected HH:mm)")]
    InvalidTime(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    #[error("{0}")]
    Validation(String),

    // ---------------------------
    // Conflicts
    // ---------------------------
    #[error("{message}")]
    Overlap {
        message: String,
        conflicting_id: Option<i64>,
    },

    #[error("An interval is already running for {date} (#{running_id})")]
    TimerAlreadyRunning { date: String, running_id: i64 },

    #[error("No running interval to stop for {0}")]
    TimerNotRunning(String),

    // ---------------------------
    // Lookups
    // ---------------------------
    #[error("{entity} #{id} not found")]
    NotFound { entity: &'static str, id: i64 },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Output
    // ---------------------------
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::InvalidDate(_)
                | AppError::InvalidTime(_)
                | AppError::InvalidDuration(_)
                | AppError::MissingField(_)
                | AppError::InvalidPeriod(_)
                | AppError::Validation(_)
        )
    }

    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            AppError::Overlap { .. }
                | AppError::TimerAlreadyRunning { .. }
                | AppError::TimerNotRunning(_)
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound { .. })
    }

    /// Storage failures are the only class fatal to the current operation.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            AppError::Io(_) | AppError::Db(_) | AppError::Migration(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
