pub mod config;
pub mod log;
pub mod project;
pub mod version;
