use std::path::PathBuf;

use crate::shared::dirs;
use crate::shared::env_var::EnvVars;

/// Base state directory for nh: ~/.cache/novelhub.
///
/// Can be overridden by setting the `NOVELHUB_CACHE_DIR` environment variable.
pub fn base_dir() -> Option<PathBuf> {
    if let Some(dir) = EnvVars::load().cache_dir {
        return Some(PathBuf::from(dir));
    }
    dirs::cache_dir().map(|d| d.join("novelhub"))
}

/// Persisted token pair: ~/.cache/novelhub/session.json
pub fn session_file() -> Option<PathBuf> {
    base_dir().map(|d| d.join("session.json"))
}

/// Directory receiving novelhub.log when file logging is on.
pub fn log_dir() -> Option<PathBuf> {
    base_dir()
}
