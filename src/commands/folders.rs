use anyhow::Context;
use clap::Subcommand;

use super::AppContext;
use crate::models::Id;
use crate::models::folder::{Folder, FolderNovel, FolderType, NewFolder, NewFolderNovel};
use crate::resources::{AuthClient, FolderClient, NovelClient};
use crate::shared::format::table::Table;

#[derive(Subcommand, Clone, PartialEq, Eq)]
pub enum FoldersCommands {
    /// List reading lists (yours unless --user is given)
    List {
        #[arg(long)]
        user: Option<Id>,
    },

    /// Create a reading list
    Create {
        name: String,

        #[arg(long = "type", value_enum, default_value_t)]
        kind: FolderType,
    },

    /// Delete a reading list
    Delete { id: Id },

    /// Novels in a reading list
    Novels { folder: Id },

    /// File a novel in a reading list
    Add { folder: Id, novel: Id },

    /// Take a novel out of a reading list
    Remove { folder: Id, novel: Id },
}

impl FoldersCommands {
    pub async fn run(&self, ctx: &AppContext) -> anyhow::Result<()> {
        print!("{}", self.output(ctx).await?);
        Ok(())
    }

    async fn output(&self, ctx: &AppContext) -> anyhow::Result<String> {
        let client = &ctx.client;
        match self {
            Self::List { user } => {
                let user_id = match user {
                    Some(id) => id.clone(),
                    None => client.me().await.context("Failed to fetch current user")?.id,
                };
                let folders = client
                    .folders(&user_id)
                    .await
                    .context("Failed to load reading lists")?;
                Ok(format_folders(&folders))
            }
            Self::Create { name, kind } => {
                let me = client.me().await.context("Failed to fetch current user")?;
                let folder = client
                    .create_folder(&NewFolder {
                        user_id: me.id,
                        name: name.clone(),
                        kind: *kind,
                    })
                    .await
                    .context("Failed to create reading list")?;
                Ok(format!("Created reading list #{} '{}'\n", folder.id, folder.name))
            }
            Self::Delete { id } => {
                client
                    .delete_folder(id)
                    .await
                    .context("Failed to delete reading list")?;
                Ok(format!("Deleted reading list #{id}\n"))
            }
            Self::Novels { folder } => {
                let entries = client
                    .folder_novels(folder)
                    .await
                    .context("Failed to load reading list")?;
                Ok(format_entries(&entries))
            }
            Self::Add { folder, novel } => {
                let (me, details) = tokio::try_join!(client.me(), client.novel(novel))
                    .context("Failed to look up novel")?;
                client
                    .add_to_folder(&NewFolderNovel {
                        folder_id: folder.clone(),
                        novel_id: novel.clone(),
                        novel_name: Some(details.title().to_string()),
                        cover_url: details.cover_url.clone(),
                        user_id: me.id,
                    })
                    .await
                    .context("Failed to add novel")?;
                Ok(format!("Added '{}' to #{folder}\n", details.title()))
            }
            Self::Remove { folder, novel } => {
                client
                    .remove_from_folder(folder, novel)
                    .await
                    .context("Failed to remove novel")?;
                Ok(format!("Removed novel #{novel} from #{folder}\n"))
            }
        }
    }
}

fn format_folders(folders: &[Folder]) -> String {
    if folders.is_empty() {
        return "No reading lists.\n".to_string();
    }
    let mut table = Table::new(["ID", "NAME", "TYPE"]);
    for folder in folders {
        table.push_row([
            folder.id.to_string(),
            folder.name.clone(),
            folder.kind.map(|k| k.label().to_string()).unwrap_or_default(),
        ]);
    }
    table.render()
}

fn format_entries(entries: &[FolderNovel]) -> String {
    if entries.is_empty() {
        return "This reading list is empty.\n".to_string();
    }
    let mut table = Table::new(["NOVEL", "TITLE"]);
    for entry in entries {
        table.push_row([
            entry
                .id
                .as_ref()
                .map(|key| key.novel_id.to_string())
                .unwrap_or_default(),
            entry.novel_name.clone().unwrap_or_default(),
        ]);
    }
    table.render()
}
