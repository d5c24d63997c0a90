//! Row helpers shared by the per-table query modules.

use crate::errors::AppError;
use crate::utils::date::{DATE_FMT, fmt_date};
use chrono::NaiveDate;
use rusqlite::{Row, types::Type};

/// Read a `YYYY-MM-DD` column into a `NaiveDate`; a malformed value is a
/// conversion failure, not a silently skipped row.
pub fn date_column(row: &Row, name: &str) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(name)?;
    NaiveDate::parse_from_str(&raw, DATE_FMT).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            Type::Text,
            Box::new(AppError::InvalidDate(raw.clone())),
        )
    })
}

pub fn bool_column(row: &Row, name: &str) -> rusqlite::Result<bool> {
    Ok(row.get::<_, i64>(name)? != 0)
}

/// Date as bound into queries.
pub fn date_param(d: NaiveDate) -> String {
    fmt_date(d)
}
