//! Catalog reads plus the admin-only delete.

use reqwest::Method;

use crate::infra::api::{ApiClient, RequestOptions, Result};
use crate::models::Id;
use crate::models::novel::{Novel, NovelFilter, NovelSummary, Period};

use super::segment;

/// Trait for novel catalog operations.
#[async_trait::async_trait]
pub trait NovelClient: Send + Sync {
    async fn novel(&self, id: &Id) -> Result<Novel>;

    /// Novel with genres, tags and author expanded.
    async fn novel_detail(&self, id: &Id) -> Result<Novel>;

    /// Title lookup (`GET /novels/search?title=`).
    async fn search_novels(&self, title: &str) -> Result<Vec<NovelSummary>>;

    /// Filtered, sorted catalog page (`POST /novels/search`).
    async fn filter_novels(&self, filter: &NovelFilter) -> Result<Vec<NovelSummary>>;

    async fn trending_novels(&self, period: Period) -> Result<Vec<NovelSummary>>;

    async fn most_popular_novels(&self, period: Period) -> Result<Vec<NovelSummary>>;

    async fn latest_novels(&self) -> Result<Vec<NovelSummary>>;

    /// Novels published by a user.
    async fn novels_by_user(&self, user_id: &Id) -> Result<Vec<NovelSummary>>;

    async fn delete_novel(&self, id: &Id) -> Result<()>;
}

#[async_trait::async_trait]
impl NovelClient for ApiClient {
    async fn novel(&self, id: &Id) -> Result<Novel> {
        self.get(&format!("/novels/{}", segment(id))).await
    }

    async fn novel_detail(&self, id: &Id) -> Result<Novel> {
        self.get(&format!("/novels/detail/{}", segment(id))).await
    }

    async fn search_novels(&self, title: &str) -> Result<Vec<NovelSummary>> {
        self.get_with(
            "/novels/search",
            RequestOptions::new().query("title", title),
        )
        .await
    }

    async fn filter_novels(&self, filter: &NovelFilter) -> Result<Vec<NovelSummary>> {
        self.send_json(
            Method::POST,
            "/novels/search",
            Some(filter),
            RequestOptions::new(),
        )
        .await
    }

    async fn trending_novels(&self, period: Period) -> Result<Vec<NovelSummary>> {
        self.get_with(
            "/novels/trending",
            RequestOptions::new().query("period", period.as_str()),
        )
        .await
    }

    async fn most_popular_novels(&self, period: Period) -> Result<Vec<NovelSummary>> {
        self.get_with(
            "/novels/most-popular",
            RequestOptions::new().query("period", period.as_str()),
        )
        .await
    }

    async fn latest_novels(&self) -> Result<Vec<NovelSummary>> {
        self.get("/novels/latest/all").await
    }

    async fn novels_by_user(&self, user_id: &Id) -> Result<Vec<NovelSummary>> {
        self.get(&format!("/novels/user/{}", segment(user_id))).await
    }

    async fn delete_novel(&self, id: &Id) -> Result<()> {
        self.delete(&format!("/novels/{}", segment(id))).await?;
        tracing::info!(novel = %id, "novel deleted");
        Ok(())
    }
}
