//! Centralized reader for NOVELHUB_* environment variables.
//!
//! Environment variable names are defined as private constants here;
//! external code accesses values through the `EnvVars` struct.

const API_URL: &str = "NOVELHUB_API_URL";
const LOG: &str = "NOVELHUB_LOG";
const CACHE_DIR: &str = "NOVELHUB_CACHE_DIR";
const TOKEN: &str = "NOVELHUB_TOKEN";

/// Snapshot of all NOVELHUB_* environment variables at load time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvVars {
    /// Backend origin, overrides `api.base_url`.
    pub api_url: Option<String>,

    /// tracing filter directive, overrides `log.level`.
    pub log: Option<String>,

    /// Directory for the session file and log file.
    pub cache_dir: Option<String>,

    /// Access token for this run only. Never written to the session file.
    pub token: Option<String>,
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

impl EnvVars {
    /// Read all NOVELHUB_* environment variables from the current process.
    pub fn load() -> Self {
        Self {
            api_url: non_empty_var(API_URL),
            log: non_empty_var(LOG),
            cache_dir: non_empty_var(CACHE_DIR),
            token: non_empty_var(TOKEN),
        }
    }
}
