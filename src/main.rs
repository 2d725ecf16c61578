mod cli;
mod commands;
mod infra;
mod models;
mod resources;
mod shared;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use reqwest::StatusCode;

use crate::commands::AppContext;
use crate::infra::api::ApiError;
use crate::shared::config::{self, Config};
use crate::shared::env_var::EnvVars;
use crate::shared::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Cli { ephemeral, command } = Cli::parse();

    if let Commands::Completions { shell } = command {
        clap_complete::generate(shell, &mut Cli::command(), "nh", &mut std::io::stdout());
        return Ok(());
    }

    let env = EnvVars::load();
    let config = config::load_config()?.with_env(&env);
    let _log_guard = logging::init(&config.log)?;

    let result = run(command, config, ephemeral, env.token).await;
    if let Some(hint) = result.as_ref().err().and_then(hint_for) {
        eprintln!("hint: {hint}");
    }
    result
}

async fn run(
    command: Commands,
    config: Config,
    ephemeral: bool,
    token: Option<String>,
) -> anyhow::Result<()> {
    if let Commands::Config(cmd) = &command {
        return cmd.run(&config);
    }

    let ctx = AppContext::new(config, ephemeral)?.with_access_token(token);
    tracing::debug!(base_url = ctx.client.base_url(), "backend selected");
    match command {
        Commands::Auth(cmd) => cmd.run(&ctx).await,
        Commands::Comments(cmd) => cmd.run(&ctx).await,
        Commands::Novels(cmd) => cmd.run(&ctx).await,
        Commands::Chapters(cmd) => cmd.run(&ctx).await,
        Commands::Reviews(cmd) => cmd.run(&ctx).await,
        Commands::Folders(cmd) => cmd.run(&ctx).await,
        Commands::Admin(cmd) => cmd.run(&ctx).await,
        Commands::Config(_) | Commands::Completions { .. } => Ok(()),
    }
}

/// Point the user at the fix for auth and connectivity failures.
fn hint_for(err: &anyhow::Error) -> Option<&'static str> {
    let api = err.chain().find_map(|e| e.downcast_ref::<ApiError>())?;
    if api.is_auth() {
        Some("your session has ended; run `nh auth login`")
    } else if api.is_network() {
        Some("could not reach the backend; check api.base_url or NOVELHUB_API_URL and retry")
    } else if api.status() == Some(StatusCode::FORBIDDEN) {
        Some("this action needs a role your account does not have")
    } else {
        None
    }
}
