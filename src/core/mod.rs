pub mod breaks;
pub mod calculator;
pub mod entries;
pub mod log;
pub mod projects;
pub mod report;
pub mod settings;
pub mod timer;
pub mod work;
