use anyhow::Context;
use clap::{Args, Subcommand};

use super::AppContext;
use crate::models::Id;
use crate::models::comment::CommentScope;
use crate::models::thread::{CommentNode, CommentThread};
use crate::resources::CommentClient;
use crate::shared::format::time::format_relative_time;

/// Which container the comments belong to.
#[derive(Args, Clone, Debug, PartialEq, Eq)]
#[group(required = true, multiple = false)]
pub struct ScopeArgs {
    /// Comments on a novel
    #[arg(long)]
    pub novel: Option<Id>,

    /// Comments on a chapter
    #[arg(long)]
    pub chapter: Option<Id>,

    /// Comments on a review
    #[arg(long)]
    pub review: Option<Id>,
}

impl ScopeArgs {
    pub fn scope(&self) -> anyhow::Result<CommentScope> {
        match (&self.novel, &self.chapter, &self.review) {
            (Some(id), None, None) => Ok(CommentScope::Novel(id.clone())),
            (None, Some(id), None) => Ok(CommentScope::Chapter(id.clone())),
            (None, None, Some(id)) => Ok(CommentScope::Review(id.clone())),
            _ => anyhow::bail!("Pass exactly one of --novel, --chapter or --review"),
        }
    }
}

#[derive(Subcommand, Clone, PartialEq, Eq)]
pub enum CommentsCommands {
    /// Show comments as reply threads
    List {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Print the thread as JSON
        #[arg(long)]
        json: bool,
    },

    /// Post a top-level comment
    Post {
        #[command(flatten)]
        scope: ScopeArgs,

        text: String,
    },

    /// Reply to an existing comment
    Reply {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Comment being replied to
        parent: Id,

        text: String,
    },

    /// Replace the text of one of your comments
    Edit {
        #[command(flatten)]
        scope: ScopeArgs,

        id: Id,

        text: String,
    },

    /// Delete a comment
    Delete { id: Id },
}

impl CommentsCommands {
    pub async fn run(&self, ctx: &AppContext) -> anyhow::Result<()> {
        print!("{}", self.output(ctx).await?);
        Ok(())
    }

    async fn output(&self, ctx: &AppContext) -> anyhow::Result<String> {
        let client = &ctx.client;
        match self {
            Self::List { scope, json } => {
                let thread = client
                    .comment_thread(&scope.scope()?)
                    .await
                    .context("Failed to load comments")?;
                if *json {
                    return Ok(format!("{}\n", serde_json::to_string_pretty(&thread)?));
                }
                Ok(format_thread_with(
                    &thread,
                    ctx.config.comments.indent,
                    format_relative_time,
                ))
            }
            Self::Post { scope, text } => {
                let created = client
                    .create_comment(&scope.scope()?, text, None)
                    .await
                    .context("Failed to post comment")?;
                Ok(format!("Posted comment #{}\n", created.id))
            }
            Self::Reply {
                scope,
                parent,
                text,
            } => {
                let created = client
                    .create_comment(&scope.scope()?, text, Some(parent.clone()))
                    .await
                    .context("Failed to post reply")?;
                Ok(format!("Posted reply #{} to #{parent}\n", created.id))
            }
            Self::Edit { scope, id, text } => {
                let comments = client
                    .comments(&scope.scope()?)
                    .await
                    .context("Failed to load comments")?;
                let original = comments
                    .iter()
                    .find(|c| &c.id == id)
                    .with_context(|| format!("Comment #{id} not found"))?;
                client
                    .update_comment(original, text)
                    .await
                    .context("Failed to edit comment")?;
                Ok(format!("Updated comment #{id}\n"))
            }
            Self::Delete { id } => {
                client
                    .delete_comment(id)
                    .await
                    .context("Failed to delete comment")?;
                Ok(format!("Deleted comment #{id}\n"))
            }
        }
    }
}

/// Render threads depth-first, replies indented `indent` spaces per level
/// under their parent's text.
pub fn format_thread_with<F>(thread: &CommentThread, indent: usize, time_formatter: F) -> String
where
    F: Fn(&str) -> String,
{
    if thread.total_count == 0 {
        return "No comments yet.\n".to_string();
    }

    let mut output = format!(
        "{} comment{}",
        thread.total_count,
        if thread.total_count == 1 { "" } else { "s" }
    );
    let hidden = thread.total_count - thread.visible_count();
    if hidden > 0 {
        output.push_str(&format!(" ({hidden} without a visible parent)"));
    }
    output.push('\n');

    let mut stack: Vec<(&CommentNode, usize)> =
        thread.roots.iter().rev().map(|node| (node, 0)).collect();
    while let Some((node, depth)) = stack.pop() {
        output.push('\n');
        output.push_str(&format_comment(node, depth, indent, &time_formatter));
        stack.extend(node.replies.iter().rev().map(|reply| (reply, depth + 1)));
    }
    output
}

fn format_comment<F>(node: &CommentNode, depth: usize, indent: usize, time_formatter: &F) -> String
where
    F: Fn(&str) -> String,
{
    let comment = &node.comment;
    let header_pad = " ".repeat(indent * depth);
    let body_pad = " ".repeat(indent * (depth + 1));

    let mut header = format!("{header_pad}#{} {}", comment.id, comment.author_name());
    if let Some(created) = comment.created_at.as_deref() {
        header.push_str(&format!(" · {}", time_formatter(created)));
    }
    if comment.likes > 0 {
        let plural = if comment.likes == 1 { "" } else { "s" };
        header.push_str(&format!(" · {} like{plural}", comment.likes));
    }

    let mut out = header;
    out.push('\n');
    for line in comment.text.lines() {
        if line.is_empty() {
            out.push('\n');
        } else {
            out.push_str(&format!("{body_pad}{line}\n"));
        }
    }
    out
}
