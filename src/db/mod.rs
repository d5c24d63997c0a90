pub mod breaks;
pub mod db_utils;
pub mod entries;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod projects;
pub mod settings;
pub mod stats;
pub mod users;
pub mod work_intervals;
