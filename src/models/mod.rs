pub mod pause;
pub mod project;
pub mod settings;
pub mod summary;
pub mod time_entry;
pub mod work_interval;
