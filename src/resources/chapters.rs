use crate::infra::api::{ApiClient, Result};
use crate::models::Id;
use crate::models::chapter::{Chapter, ChapterDraft, ChapterLocator};

use super::segment;

/// Trait for chapter reading and publishing.
#[async_trait::async_trait]
pub trait ChapterClient: Send + Sync {
    async fn chapter(&self, id: &Id) -> Result<Chapter>;

    async fn find_chapter(&self, locator: &ChapterLocator) -> Result<Chapter>;

    /// `None` at the first chapter.
    async fn previous_chapter(&self, locator: &ChapterLocator) -> Result<Option<Chapter>>;

    /// `None` at the last chapter.
    async fn next_chapter(&self, locator: &ChapterLocator) -> Result<Option<Chapter>>;

    async fn create_chapter(&self, draft: &ChapterDraft) -> Result<Chapter>;

    /// Replace a chapter with `draft`.
    async fn update_chapter(&self, id: &Id, draft: &ChapterDraft) -> Result<Chapter>;
}

#[async_trait::async_trait]
impl ChapterClient for ApiClient {
    async fn chapter(&self, id: &Id) -> Result<Chapter> {
        self.get(&format!("/chapters/{}", segment(id))).await
    }

    async fn find_chapter(&self, locator: &ChapterLocator) -> Result<Chapter> {
        self.get(&locator.find_path()).await
    }

    async fn previous_chapter(&self, locator: &ChapterLocator) -> Result<Option<Chapter>> {
        self.get_optional(&locator.previous_path()).await
    }

    async fn next_chapter(&self, locator: &ChapterLocator) -> Result<Option<Chapter>> {
        self.get_optional(&locator.next_path()).await
    }

    async fn create_chapter(&self, draft: &ChapterDraft) -> Result<Chapter> {
        self.post("/chapters", draft).await
    }

    async fn update_chapter(&self, id: &Id, draft: &ChapterDraft) -> Result<Chapter> {
        self.put(&format!("/chapters/{}", segment(id)), draft).await
    }
}
