use anyhow::Context;
use clap::{Args, Subcommand};

use super::AppContext;
use crate::models::Id;
use crate::models::novel::{CatalogSort, Novel, NovelFilter, NovelSummary, Period, SortOrder};
use crate::resources::NovelClient;
use crate::shared::format::table::Table;

/// Catalog filters. Every bound is optional.
#[derive(Args, Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogArgs {
    /// Title contains
    #[arg(long)]
    pub name: Option<String>,

    /// Genre id (repeatable)
    #[arg(long = "genre", value_name = "ID")]
    pub genres: Vec<Id>,

    /// Tag id (repeatable)
    #[arg(long = "tag", value_name = "ID")]
    pub tags: Vec<Id>,

    #[arg(long)]
    pub min_chapters: Option<i64>,

    #[arg(long)]
    pub max_chapters: Option<i64>,

    #[arg(long)]
    pub min_year: Option<i32>,

    #[arg(long)]
    pub max_year: Option<i32>,

    #[arg(long)]
    pub age_rating: Option<String>,

    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<String>,

    #[arg(long)]
    pub status: Option<String>,

    #[arg(long, value_enum, default_value_t)]
    pub sort: CatalogSort,

    #[arg(long, value_enum, default_value_t)]
    pub order: SortOrder,
}

impl From<&CatalogArgs> for NovelFilter {
    fn from(args: &CatalogArgs) -> Self {
        Self {
            genre_ids: args.genres.clone(),
            tag_ids: args.tags.clone(),
            min_chapter_count: args.min_chapters,
            max_chapter_count: args.max_chapters,
            min_release_year: args.min_year,
            max_release_year: args.max_year,
            age_rating: args.age_rating.clone(),
            kind: args.kind.clone(),
            status: args.status.clone(),
            name: args.name.clone().filter(|n| !n.trim().is_empty()),
            sort: args.sort,
            order: args.order,
        }
    }
}

#[derive(Subcommand, Clone, PartialEq, Eq)]
pub enum NovelsCommands {
    /// Show one novel
    Show {
        id: Id,

        /// Include genres, tags and author
        #[arg(long)]
        detail: bool,
    },

    /// Search novels by title
    Search { title: String },

    /// Browse the catalog with filters and sorting
    Catalog(CatalogArgs),

    /// Most read recently
    Trending {
        #[arg(long, value_enum, default_value_t)]
        period: Period,
    },

    /// Most popular overall in a window
    Popular {
        #[arg(long, value_enum, default_value_t)]
        period: Period,
    },

    /// Recently added
    Latest,

    /// Novels published by a user
    ByUser { user_id: Id },
}

impl NovelsCommands {
    pub async fn run(&self, ctx: &AppContext) -> anyhow::Result<()> {
        print!("{}", self.output(ctx).await?);
        Ok(())
    }

    async fn output(&self, ctx: &AppContext) -> anyhow::Result<String> {
        let client = &ctx.client;
        let list = match self {
            Self::Show { id, detail } => {
                let novel = if *detail {
                    client.novel_detail(id).await
                } else {
                    client.novel(id).await
                }
                .with_context(|| format!("Failed to load novel #{id}"))?;
                return Ok(format_novel(&novel));
            }
            Self::Search { title } => client.search_novels(title).await,
            Self::Catalog(args) => client.filter_novels(&args.into()).await,
            Self::Trending { period } => client.trending_novels(*period).await,
            Self::Popular { period } => client.most_popular_novels(*period).await,
            Self::Latest => client.latest_novels().await,
            Self::ByUser { user_id } => client.novels_by_user(user_id).await,
        }
        .context("Failed to load novels")?;

        Ok(format_novel_list(&list))
    }
}

pub fn format_novel_list(novels: &[NovelSummary]) -> String {
    if novels.is_empty() {
        return "No novels found.\n".to_string();
    }
    let mut table = Table::new(["ID", "TITLE", "STATUS", "CHAPTERS", "YEAR"]);
    for novel in novels {
        table.push_row([
            novel.id.to_string(),
            novel.title().to_string(),
            novel.status.clone().unwrap_or_default(),
            novel.chapter_count.map(|c| c.to_string()).unwrap_or_default(),
            novel.release_year.map(|y| y.to_string()).unwrap_or_default(),
        ]);
    }
    table.render()
}

fn format_novel(novel: &Novel) -> String {
    let mut out = format!("{} #{}\n", novel.title(), novel.id);
    if let Some(en) = novel
        .title_en
        .as_deref()
        .filter(|en| !en.is_empty() && *en != novel.title())
    {
        out.push_str(&format!("{en}\n"));
    }
    if !novel.alt_titles.is_empty() {
        out.push_str(&format!("Also known as: {}\n", novel.alt_titles.join(", ")));
    }
    out.push('\n');

    let facts: Vec<String> = [
        novel.status.clone(),
        novel.kind.clone(),
        novel.release_year.map(|y| y.to_string()),
        novel.chapter_count.map(|c| format!("{c} chapters")),
        novel.age_rating.clone(),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !facts.is_empty() {
        out.push_str(&format!("{}\n", facts.join(" • ")));
    }
    if let Some(author) = novel.author.as_ref().and_then(|a| a.username.as_deref()) {
        out.push_str(&format!("Author: {author}\n"));
    }
    if !novel.genres.is_empty() {
        let names: Vec<&str> = novel.genres.iter().map(|g| g.name.as_str()).collect();
        out.push_str(&format!("Genres: {}\n", names.join(", ")));
    }
    if !novel.tags.is_empty() {
        let names: Vec<&str> = novel.tags.iter().map(|t| t.name.as_str()).collect();
        out.push_str(&format!("Tags: {}\n", names.join(", ")));
    }
    if let Some(description) = novel.description.as_deref().filter(|d| !d.is_empty()) {
        out.push_str(&format!("\n{description}\n"));
    }
    out
}
