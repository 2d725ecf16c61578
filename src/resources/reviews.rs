use crate::infra::api::{ApiClient, Result};
use crate::models::Id;
use crate::models::review::{NewReview, Review, ReviewUpdate};

use super::segment;

/// Trait for review operations.
#[async_trait::async_trait]
pub trait ReviewClient: Send + Sync {
    async fn reviews_for_novel(&self, novel_id: &Id) -> Result<Vec<Review>>;

    async fn review(&self, id: &Id) -> Result<Review>;

    /// Most recent reviews across the catalog.
    async fn latest_reviews(&self) -> Result<Vec<Review>>;

    async fn create_review(&self, review: &NewReview) -> Result<Review>;

    async fn update_review(&self, id: &Id, review: &NewReview) -> Result<Review>;

    async fn delete_review(&self, id: &Id) -> Result<()>;
}

#[async_trait::async_trait]
impl ReviewClient for ApiClient {
    async fn reviews_for_novel(&self, novel_id: &Id) -> Result<Vec<Review>> {
        self.get(&format!("/reviews/byNovel/{}", segment(novel_id)))
            .await
    }

    async fn review(&self, id: &Id) -> Result<Review> {
        self.get(&format!("/reviews/{}", segment(id))).await
    }

    async fn latest_reviews(&self) -> Result<Vec<Review>> {
        self.get("/reviews/sorted").await
    }

    async fn create_review(&self, review: &NewReview) -> Result<Review> {
        self.post("/reviews", review).await
    }

    async fn update_review(&self, id: &Id, review: &NewReview) -> Result<Review> {
        self.put(
            &format!("/reviews/{}", segment(id)),
            &ReviewUpdate { id, review },
        )
        .await
    }

    async fn delete_review(&self, id: &Id) -> Result<()> {
        self.delete(&format!("/reviews/{}", segment(id))).await
    }
}
