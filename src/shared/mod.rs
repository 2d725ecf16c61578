pub mod cache;
pub mod config;
pub mod dirs;
pub mod env_var;
pub mod format;
pub mod logging;
