use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Subcommand};

use super::AppContext;
use crate::models::Id;
use crate::models::chapter::{Chapter, ChapterDraft, ChapterLocator};
use crate::resources::ChapterClient;

/// Position of a chapter inside a novel.
#[derive(Args, Clone, Debug, PartialEq, Eq)]
pub struct PositionArgs {
    pub novel: Id,
    pub volume: i64,
    pub chapter: i64,
}

impl From<&PositionArgs> for ChapterLocator {
    fn from(args: &PositionArgs) -> Self {
        Self {
            novel_id: args.novel.clone(),
            volume: args.volume,
            chapter: args.chapter,
        }
    }
}

#[derive(Subcommand, Clone, PartialEq, Eq)]
pub enum ChaptersCommands {
    /// Read a chapter by id
    Show { id: Id },

    /// Read a chapter by novel, volume and number
    Find {
        #[command(flatten)]
        position: PositionArgs,
    },

    /// Read the chapter after the given position
    Next {
        #[command(flatten)]
        position: PositionArgs,
    },

    /// Read the chapter before the given position
    Prev {
        #[command(flatten)]
        position: PositionArgs,
    },

    /// Publish a new chapter
    Create {
        /// Novel the chapter belongs to
        novel: Id,

        #[arg(long)]
        title: String,

        #[arg(long)]
        volume: Option<i64>,

        #[arg(long)]
        number: Option<i64>,

        /// File with the chapter text ("-" reads stdin)
        #[arg(long)]
        file: PathBuf,
    },

    /// Edit a chapter; unset options keep their current value
    Update {
        id: Id,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        volume: Option<i64>,

        #[arg(long)]
        number: Option<i64>,

        /// File with the new chapter text ("-" reads stdin)
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

impl ChaptersCommands {
    pub async fn run(&self, ctx: &AppContext) -> anyhow::Result<()> {
        print!("{}", self.output(ctx).await?);
        Ok(())
    }

    async fn output(&self, ctx: &AppContext) -> anyhow::Result<String> {
        let client = &ctx.client;
        let chapter = match self {
            Self::Show { id } => client
                .chapter(id)
                .await
                .with_context(|| format!("Failed to load chapter #{id}"))?,
            Self::Find { position } => client
                .find_chapter(&position.into())
                .await
                .context("Failed to find chapter")?,
            Self::Next { position } => {
                let Some(chapter) = client
                    .next_chapter(&position.into())
                    .await
                    .context("Failed to load next chapter")?
                else {
                    return Ok("This is the last chapter.\n".to_string());
                };
                chapter
            }
            Self::Prev { position } => {
                let Some(chapter) = client
                    .previous_chapter(&position.into())
                    .await
                    .context("Failed to load previous chapter")?
                else {
                    return Ok("This is the first chapter.\n".to_string());
                };
                chapter
            }
            Self::Create {
                novel,
                title,
                volume,
                number,
                file,
            } => {
                let draft = ChapterDraft {
                    novel_id: novel.clone(),
                    title: title.trim().to_string(),
                    content: read_content(file)?,
                    volume_number: *volume,
                    chapter_number: *number,
                    like_count: 0,
                };
                let chapter = client
                    .create_chapter(&draft)
                    .await
                    .context("Failed to create chapter")?;
                return Ok(format!("Created chapter #{}: {}\n", chapter.id, chapter.heading()));
            }
            Self::Update {
                id,
                title,
                volume,
                number,
                file,
            } => {
                let current = client
                    .chapter(id)
                    .await
                    .with_context(|| format!("Failed to load chapter #{id}"))?;
                let draft = ChapterDraft {
                    novel_id: current
                        .novel_id
                        .clone()
                        .with_context(|| format!("Chapter #{id} does not name its novel"))?,
                    title: title
                        .as_deref()
                        .or(current.title.as_deref())
                        .unwrap_or_default()
                        .trim()
                        .to_string(),
                    content: match file {
                        Some(file) => read_content(file)?,
                        None => current.content.clone().unwrap_or_default(),
                    },
                    volume_number: volume.or(current.volume_number),
                    chapter_number: number.or(current.chapter_number),
                    like_count: 0,
                };
                client
                    .update_chapter(id, &draft)
                    .await
                    .with_context(|| format!("Failed to update chapter #{id}"))?;
                return Ok(format!("Updated chapter #{id}\n"));
            }
        };
        Ok(format_chapter(&chapter))
    }
}

fn read_content(file: &Path) -> anyhow::Result<String> {
    if file == Path::new("-") {
        return std::io::read_to_string(std::io::stdin())
            .context("Failed to read chapter from stdin");
    }
    std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
}
