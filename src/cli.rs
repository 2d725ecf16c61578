use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::commands::admin::AdminCommands;
use crate::commands::auth::AuthCommands;
use crate::commands::chapters::ChaptersCommands;
use crate::commands::comments::CommentsCommands;
use crate::commands::config::ConfigCommands;
use crate::commands::folders::FoldersCommands;
use crate::commands::novels::NovelsCommands;
use crate::commands::reviews::ReviewsCommands;

#[derive(Parser)]
#[command(
    name = "novelhub",
    bin_name = "nh",
    version,
    about,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Keep tokens in memory only; nothing is read from or written to disk
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone, PartialEq)]
pub enum Commands {
    /// Log in, log out, show the current user
    #[command(subcommand)]
    Auth(AuthCommands),

    /// Read and write threaded comments
    #[command(subcommand)]
    Comments(CommentsCommands),

    /// Browse and search the catalog
    #[command(subcommand)]
    Novels(NovelsCommands),

    /// Read and publish chapters
    #[command(subcommand)]
    Chapters(ChaptersCommands),

    /// Read and write reviews
    #[command(subcommand)]
    Reviews(ReviewsCommands),

    /// Manage reading lists
    #[command(subcommand)]
    Folders(FoldersCommands),

    /// Back-office operations (admin role required)
    #[command(subcommand)]
    Admin(AdminCommands),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}
