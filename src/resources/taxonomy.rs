//! Genres and tags. Reads are public, writes need an admin session.

use crate::infra::api::{ApiClient, Result};
use crate::models::Id;
use crate::models::taxonomy::{Genre, NameInput, Tag};

use super::segment;

/// Trait for genre and tag management.
#[async_trait::async_trait]
pub trait TaxonomyClient: Send + Sync {
    async fn genres(&self) -> Result<Vec<Genre>>;
    async fn create_genre(&self, name: &str) -> Result<Genre>;
    async fn rename_genre(&self, id: &Id, name: &str) -> Result<Genre>;
    async fn delete_genre(&self, id: &Id) -> Result<()>;

    async fn tags(&self) -> Result<Vec<Tag>>;
    async fn create_tag(&self, name: &str) -> Result<Tag>;
    async fn rename_tag(&self, id: &Id, name: &str) -> Result<Tag>;
    async fn delete_tag(&self, id: &Id) -> Result<()>;
}

#[async_trait::async_trait]
impl TaxonomyClient for ApiClient {
    async fn genres(&self) -> Result<Vec<Genre>> {
        self.get("/genres").await
    }

    async fn create_genre(&self, name: &str) -> Result<Genre> {
        self.post("/genres", &NameInput { name }).await
    }

    async fn rename_genre(&self, id: &Id, name: &str) -> Result<Genre> {
        self.put(&format!("/genres/{}", segment(id)), &NameInput { name })
            .await
    }

    async fn delete_genre(&self, id: &Id) -> Result<()> {
        self.delete(&format!("/genres/{}", segment(id))).await
    }

    async fn tags(&self) -> Result<Vec<Tag>> {
        self.get("/tags").await
    }

    async fn create_tag(&self, name: &str) -> Result<Tag> {
        self.post("/tags", &NameInput { name }).await
    }

    async fn rename_tag(&self, id: &Id, name: &str) -> Result<Tag> {
        self.put(&format!("/tags/{}", segment(id)), &NameInput { name })
            .await
    }

    async fn delete_tag(&self, id: &Id) -> Result<()> {
        self.delete(&format!("/tags/{}", segment(id))).await
    }
}
