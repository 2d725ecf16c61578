//! tracing subscriber setup. Everything goes to stderr so stdout stays
//! reserved for command output.

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::shared::cache;
use crate::shared::config::{LogConfig, LogFormat};

const LOG_FILE_NAME: &str = "novelhub.log";

/// Keeps the file writer flushing until dropped at the end of `main`.
#[must_use]
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Install the global subscriber. `config.level` should already include the
/// NOVELHUB_LOG override.
pub fn init(config: &LogConfig) -> anyhow::Result<LogGuard> {
    let filter = build_filter(&config.level)?;

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();
    layers.push(match config.format {
        LogFormat::Text => fmt::layer().with_writer(std::io::stderr).boxed(),
        LogFormat::Json => fmt::layer().json().with_writer(std::io::stderr).boxed(),
    });

    let mut file_guard = None;
    if config.file {
        let dir = cache::log_dir().context("Could not determine the cache directory for logs")?;
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
        let appender = RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(LOG_FILE_NAME)
            .build(&dir)
            .with_context(|| format!("Failed to open {LOG_FILE_NAME} in {}", dir.display()))?;
        let (writer, guard) = tracing_appender::non_blocking(appender);
        layers.push(fmt::layer().with_ansi(false).with_writer(writer).boxed());
        file_guard = Some(guard);
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(LogGuard { _file: file_guard })
}

fn build_filter(directive: &str) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_new(directive).with_context(|| format!("Invalid log filter '{directive}'"))
}
