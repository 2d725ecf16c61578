use anyhow::Context;
use clap::Subcommand;

use super::AppContext;
use crate::models::Id;
use crate::models::review::{Criterion, NewReview, Review, Sentiment};
use crate::resources::{AuthClient, ReviewClient};
use crate::shared::format::table::Table;
use crate::shared::format::time::format_relative_time;

#[derive(Subcommand, Clone, PartialEq)]
pub enum ReviewsCommands {
    /// Reviews of a novel
    List { novel: Id },

    /// Show one review in full
    Show { id: Id },

    /// Most recent reviews across the catalog
    Latest,

    /// Write a review as the logged-in user
    Create {
        #[arg(long)]
        novel: Id,

        #[arg(long, value_enum)]
        sentiment: Sentiment,

        #[arg(long)]
        title: String,

        #[arg(long)]
        text: String,

        /// Score for one criterion, e.g. --criterion Plot=9 (repeatable)
        #[arg(long = "criterion", value_parser = parse_criterion)]
        criteria: Vec<(String, f64)>,
    },

    /// Edit a review; unset options keep their current value
    Edit {
        id: Id,

        #[arg(long, value_enum)]
        sentiment: Option<Sentiment>,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        text: Option<String>,

        /// Replaces all criteria when given, e.g. --criterion Plot=9 (repeatable)
        #[arg(long = "criterion", value_parser = parse_criterion)]
        criteria: Vec<(String, f64)>,
    },

    /// Delete a review
    Delete { id: Id },
}

fn parse_criterion(raw: &str) -> Result<(String, f64), String> {
    let (name, score) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=SCORE, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing criterion name in '{raw}'"));
    }
    let score = score
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid score in '{raw}': {e}"))?;
    Ok((name.to_string(), score))
}

impl ReviewsCommands {
    pub async fn run(&self, ctx: &AppContext) -> anyhow::Result<()> {
        print!("{}", self.output(ctx).await?);
        Ok(())
    }

    async fn output(&self, ctx: &AppContext) -> anyhow::Result<String> {
        let client = &ctx.client;
        match self {
            Self::List { novel } => {
                let reviews = client
                    .reviews_for_novel(novel)
                    .await
                    .context("Failed to load reviews")?;
                Ok(format_review_list(&reviews))
            }
            Self::Latest => {
                let reviews = client
                    .latest_reviews()
                    .await
                    .context("Failed to load reviews")?;
                Ok(format_review_list(&reviews))
            }
            Self::Show { id } => {
                let review = client
                    .review(id)
                    .await
                    .with_context(|| format!("Failed to load review #{id}"))?;
                Ok(format_review_with(&review, format_relative_time))
            }
            Self::Create {
                novel,
                sentiment,
                title,
                text,
                criteria,
            } => {
                let me = client.me().await.context("Failed to fetch current user")?;
                let review = NewReview {
                    novel_id: novel.clone(),
                    author_id: me.id,
                    sentiment: *sentiment,
                    title: title.clone(),
                    text: text.clone(),
                    criteria: criteria
                        .iter()
                        .map(|(name, score)| Criterion {
                            id: None,
                            criterion_name: name.clone(),
                            score: *score,
                        })
                        .collect(),
                };
                let created = client
                    .create_review(&review)
                    .await
                    .context("Failed to create review")?;
                Ok(format!("Created review #{}\n", created.id))
            }
            Self::Edit {
                id,
                sentiment,
                title,
                text,
                criteria,
            } => {
                let current = client
                    .review(id)
                    .await
                    .with_context(|| format!("Failed to load review #{id}"))?;
                let author_id = match current.author_id.clone() {
                    Some(author_id) => author_id,
                    None => client.me().await.context("Failed to fetch current user")?.id,
                };
                let review = NewReview {
                    novel_id: current
                        .novel_id
                        .clone()
                        .with_context(|| format!("Review #{id} does not name its novel"))?,
                    author_id,
                    sentiment: sentiment
                        .or(current.sentiment)
                        .with_context(|| format!("Review #{id} has no sentiment; pass --sentiment"))?,
                    title: title.clone().or(current.title.clone()).unwrap_or_default(),
                    text: text.clone().or(current.text.clone()).unwrap_or_default(),
                    criteria: if criteria.is_empty() {
                        current.criteria.clone()
                    } else {
                        rescore(&current.criteria, criteria)
                    },
                };
                client
                    .update_review(id, &review)
                    .await
                    .with_context(|| format!("Failed to update review #{id}"))?;
                Ok(format!("Updated review #{id}\n"))
            }
            Self::Delete { id } => {
                client
                    .delete_review(id)
                    .await
                    .context("Failed to delete review")?;
                Ok(format!("Deleted review #{id}\n"))
            }
        }
    }
}

/// New criteria list, keeping the ids of criteria that already exist by name.
fn rescore(existing: &[Criterion], scores: &[(String, f64)]) -> Vec<Criterion> {
    scores
        .iter()
        .map(|(name, score)| Criterion {
            id: existing
                .iter()
                .find(|c| c.criterion_name == *name)
                .and_then(|c| c.id.clone()),
            criterion_name: name.clone(),
            score: *score,
        })
        .collect()
}

fn format_review_list(reviews: &[Review]) -> String {
    if reviews.is_empty() {
        return "No reviews yet.\n".to_string();
    }
    let mut table =
        Table::new(["ID", "NOVEL", "SENTIMENT", "AUTHOR", "TITLE"]).max_column_width(40);
    for review in reviews {
        table.push_row([
            review.id.to_string(),
            review
                .novel_id
                .as_ref()
                .map(Id::to_string)
                .unwrap_or_default(),
            review
                .sentiment
                .map(|s| s.as_str().to_string())
                .unwrap_or_default(),
            review.author_name.clone().unwrap_or_default(),
            review.title.clone().unwrap_or_default(),
        ]);
    }
    table.render()
}

fn format_review_with<F>(review: &Review, time_formatter: F) -> String
where
    F: Fn(&str) -> String,
{
    let title = review.title.as_deref().unwrap_or("(untitled)");
    let mut out = format!("{title} #{}\n", review.id);

    let mut meta = Vec::new();
    if let Some(sentiment) = review.sentiment {
        meta.push(sentiment.as_str().to_string());
    }
    if let Some(author) = review.author_name.as_deref() {
        meta.push(format!("by {author}"));
    }
    if let Some(created) = review.created_at.as_deref() {
        meta.push(time_formatter(created));
    }
    if !meta.is_empty() {
        out.push_str(&format!("{}\n", meta.join(" • ")));
    }

    for criterion in &review.criteria {
        out.push_str(&format!(
            "  {}: {}\n",
            criterion.criterion_name, criterion.score
        ));
    }
    if let Some(text) = review.text.as_deref().filter(|t| !t.is_empty()) {
        out.push_str(&format!("\n{text}\n"));
    }
    out
}
