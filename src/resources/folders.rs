//! Reading lists and the novels filed in them.

use reqwest::Method;

use crate::infra::api::{ApiClient, RequestOptions, Result};
use crate::models::Id;
use crate::models::folder::{Folder, FolderNovel, NewFolder, NewFolderNovel};

use super::segment;

/// Trait for reading-list operations.
#[async_trait::async_trait]
pub trait FolderClient: Send + Sync {
    async fn folders(&self, user_id: &Id) -> Result<Vec<Folder>>;

    async fn create_folder(&self, folder: &NewFolder) -> Result<Folder>;

    async fn delete_folder(&self, folder_id: &Id) -> Result<()>;

    async fn folder_novels(&self, folder_id: &Id) -> Result<Vec<FolderNovel>>;

    async fn add_to_folder(&self, entry: &NewFolderNovel) -> Result<()>;

    async fn remove_from_folder(&self, folder_id: &Id, novel_id: &Id) -> Result<()>;
}

#[async_trait::async_trait]
impl FolderClient for ApiClient {
    async fn folders(&self, user_id: &Id) -> Result<Vec<Folder>> {
        self.get(&format!("/folders/{}", segment(user_id))).await
    }

    async fn create_folder(&self, folder: &NewFolder) -> Result<Folder> {
        self.post("/folders", folder).await
    }

    async fn delete_folder(&self, folder_id: &Id) -> Result<()> {
        self.delete(&format!("/folders/{}", segment(folder_id))).await
    }

    async fn folder_novels(&self, folder_id: &Id) -> Result<Vec<FolderNovel>> {
        self.get(&format!("/folder-novels/{}", segment(folder_id)))
            .await
    }

    async fn add_to_folder(&self, entry: &NewFolderNovel) -> Result<()> {
        self.send(Method::POST, "/folder-novels", Some(entry), RequestOptions::new())
            .await
    }

    async fn remove_from_folder(&self, folder_id: &Id, novel_id: &Id) -> Result<()> {
        self.delete(&format!(
            "/folder-novels/{}/{}",
            segment(folder_id),
            segment(novel_id)
        ))
        .await
    }
}
