//! Comment lists, threads and mutations.

use crate::infra::api::{ApiClient, ApiError, Result};
use crate::models::Id;
use crate::models::comment::{Comment, CommentScope, NewComment};
use crate::models::thread::{CommentThread, build_thread};

use super::auth::AuthClient;
use super::segment;

/// Blank text never reaches the backend. Anything else is sent as typed.
fn validate_text(text: &str) -> Result<&str> {
    if text.trim().is_empty() {
        return Err(ApiError::InvalidInput(
            "Comment text must not be empty".to_string(),
        ));
    }
    Ok(text)
}

/// Trait for comment operations.
#[async_trait::async_trait]
pub trait CommentClient: Send + Sync {
    /// Flat comment list for a novel, chapter or review.
    async fn comments(&self, scope: &CommentScope) -> Result<Vec<Comment>>;

    /// Comment list arranged as reply trees.
    async fn comment_thread(&self, scope: &CommentScope) -> Result<CommentThread>;

    /// Post a top-level comment, or a reply when `parent` is set.
    ///
    /// The author is whoever `/auth/me` says is logged in.
    async fn create_comment(
        &self,
        scope: &CommentScope,
        text: &str,
        parent: Option<Id>,
    ) -> Result<Comment>;

    /// Send the full record back with only the text replaced.
    async fn update_comment(&self, comment: &Comment, text: &str) -> Result<Comment>;

    async fn delete_comment(&self, id: &Id) -> Result<()>;
}

#[async_trait::async_trait]
impl CommentClient for ApiClient {
    async fn comments(&self, scope: &CommentScope) -> Result<Vec<Comment>> {
        self.get(&scope.list_path()).await
    }

    async fn comment_thread(&self, scope: &CommentScope) -> Result<CommentThread> {
        let flat = self.comments(scope).await?;
        Ok(build_thread(&flat))
    }

    async fn create_comment(
        &self,
        scope: &CommentScope,
        text: &str,
        parent: Option<Id>,
    ) -> Result<Comment> {
        let text = validate_text(text)?;
        let me = self.me().await?;
        let payload = NewComment::new(scope, me.id, text, parent);
        self.post("/comments", &payload).await
    }

    async fn update_comment(&self, comment: &Comment, text: &str) -> Result<Comment> {
        let text = validate_text(text)?;
        let edited = Comment {
            text: text.to_string(),
            ..comment.clone()
        };
        self.put(&format!("/comments/{}", segment(&comment.id)), &edited)
            .await
    }

    async fn delete_comment(&self, id: &Id) -> Result<()> {
        self.delete(&format!("/comments/{}", segment(id))).await
    }
}
