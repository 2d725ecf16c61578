//! Back-office commands. The backend enforces ROLE_ADMIN; these just call it.

use anyhow::Context;
use clap::Subcommand;

use super::AppContext;
use crate::models::Id;
use crate::models::user::User;
use crate::resources::{NovelClient, ReviewClient, TaxonomyClient, UserClient};
use crate::shared::format::table::Table;

#[derive(Subcommand, Clone, PartialEq, Eq)]
pub enum AdminCommands {
    /// Manage genres
    #[command(subcommand)]
    Genres(TaxonomyCommands),

    /// Manage tags
    #[command(subcommand)]
    Tags(TaxonomyCommands),

    /// Manage users and roles
    #[command(subcommand)]
    Users(UsersCommands),

    /// Delete any review
    DeleteReview { id: Id },

    /// Delete a novel with its chapters
    DeleteNovel { id: Id },
}

#[derive(Subcommand, Clone, PartialEq, Eq)]
pub enum TaxonomyCommands {
    List,
    Create { name: String },
    Rename { id: Id, name: String },
    Delete { id: Id },
}

#[derive(Subcommand, Clone, PartialEq, Eq)]
pub enum UsersCommands {
    List,

    /// Look a user up by username
    Show { username: String },

    AddRole {
        id: Id,
        /// e.g. ROLE_ADMIN
        role: String,
    },

    RemoveRole { id: Id, role: String },

    Delete { id: Id },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Taxonomy {
    Genre,
    Tag,
}

impl Taxonomy {
    fn noun(self) -> &'static str {
        match self {
            Self::Genre => "genre",
            Self::Tag => "tag",
        }
    }
}

impl AdminCommands {
    pub async fn run(&self, ctx: &AppContext) -> anyhow::Result<()> {
        print!("{}", self.output(ctx).await?);
        Ok(())
    }

    async fn output(&self, ctx: &AppContext) -> anyhow::Result<String> {
        let client = &ctx.client;
        match self {
            Self::Genres(cmd) => cmd.output(client, Taxonomy::Genre).await,
            Self::Tags(cmd) => cmd.output(client, Taxonomy::Tag).await,
            Self::Users(cmd) => cmd.output(client).await,
            Self::DeleteReview { id } => {
                client
                    .delete_review(id)
                    .await
                    .context("Failed to delete review")?;
                Ok(format!("Deleted review #{id}\n"))
            }
            Self::DeleteNovel { id } => {
                client
                    .delete_novel(id)
                    .await
                    .with_context(|| format!("Failed to delete novel #{id}"))?;
                Ok(format!("Deleted novel #{id}\n"))
            }
        }
    }
}

impl TaxonomyCommands {
    async fn output<C>(&self, client: &C, kind: Taxonomy) -> anyhow::Result<String>
    where
        C: TaxonomyClient,
    {
        let noun = kind.noun();
        match self {
            Self::List => {
                let entries: Vec<(Id, String)> = match kind {
                    Taxonomy::Genre => client
                        .genres()
                        .await?
                        .into_iter()
                        .map(|g| (g.id, g.name))
                        .collect(),
                    Taxonomy::Tag => client
                        .tags()
                        .await?
                        .into_iter()
                        .map(|t| (t.id, t.name))
                        .collect(),
                };
                let mut table = Table::new(["ID", "NAME"]);
                for (id, name) in entries {
                    table.push_row([id.to_string(), name]);
                }
                Ok(table.render())
            }
            Self::Create { name } => {
                let id = match kind {
                    Taxonomy::Genre => client.create_genre(name).await.map(|g| g.id),
                    Taxonomy::Tag => client.create_tag(name).await.map(|t| t.id),
                }
                .with_context(|| format!("Failed to create {noun}"))?;
                Ok(format!("Created {noun} #{id} '{name}'\n"))
            }
            Self::Rename { id, name } => {
                match kind {
                    Taxonomy::Genre => client.rename_genre(id, name).await.map(|_| ()),
                    Taxonomy::Tag => client.rename_tag(id, name).await.map(|_| ()),
                }
                .with_context(|| format!("Failed to rename {noun} #{id}"))?;
                Ok(format!("Renamed {noun} #{id} to '{name}'\n"))
            }
            Self::Delete { id } => {
                match kind {
                    Taxonomy::Genre => client.delete_genre(id).await,
                    Taxonomy::Tag => client.delete_tag(id).await,
                }
                .with_context(|| format!("Failed to delete {noun} #{id}"))?;
                Ok(format!("Deleted {noun} #{id}\n"))
            }
        }
    }
}

impl UsersCommands {
    async fn output<C: UserClient>(&self, client: &C) -> anyhow::Result<String> {
        match self {
            Self::List => {
                let users = client.users().await.context("Failed to load users")?;
                Ok(format_users(&users))
            }
            Self::Show { username } => {
                let user = client
                    .user_by_username(username)
                    .await
                    .with_context(|| format!("Failed to load user '{username}'"))?;
                Ok(format_users(std::slice::from_ref(&user)))
            }
            Self::AddRole { id, role } => {
                client
                    .add_role(id, role)
                    .await
                    .with_context(|| format!("Failed to grant {role}"))?;
                Ok(format!("Granted {role} to user #{id}\n"))
            }
            Self::RemoveRole { id, role } => {
                client
                    .remove_role(id, role)
                    .await
                    .with_context(|| format!("Failed to revoke {role}"))?;
                Ok(format!("Revoked {role} from user #{id}\n"))
            }
            Self::Delete { id } => {
                client
                    .delete_user(id)
                    .await
                    .context("Failed to delete user")?;
                Ok(format!("Deleted user #{id}\n"))
            }
        }
    }
}

fn format_users(users: &[User]) -> String {
    let mut table = Table::new(["ID", "USERNAME", "EMAIL", "ROLES"]);
    for user in users {
        table.push_row([
            user.id.to_string(),
            user.username.clone(),
            user.email.clone().unwrap_or_default(),
            user.role_names().join(","),
        ]);
    }
    table.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::context;
    use crate::infra::api::mock::ApiMockServer;
    use indoc::indoc;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    #[tokio::test]
    async fn tags_list_renders_table() {
        let mock = ApiMockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "isekai"},
                {"id": 10, "name": "cultivation"}
            ])))
            .mount(mock.server())
            .await;

        let out = AdminCommands::Tags(TaxonomyCommands::List)
            .output(&context(&mock))
            .await
            .unwrap();
        assert_eq!(
            out,
            indoc! {"
                ID  NAME
                1   isekai
                10  cultivation
            "}
        );
    }

    #[tokio::test]
    async fn genre_create_reports_new_id() {
        let mock = ApiMockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/genres"))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({"id": 4, "name": "Horror"})),
            )
            .mount(mock.server())
            .await;

        let cmd = AdminCommands::Genres(TaxonomyCommands::Create {
            name: "Horror".to_string(),
        });
        let out = cmd.output(&context(&mock)).await.unwrap();
        assert_eq!(out, "Created genre #4 'Horror'\n");
    }

    #[tokio::test]
    async fn add_role_patches_user() {
        let mock = ApiMockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/users/3/add-role"))
            .and(query_param("roleName", "ROLE_ADMIN"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(mock.server())
            .await;

        let cmd = AdminCommands::Users(UsersCommands::AddRole {
            id: 3.into(),
            role: "ROLE_ADMIN".to_string(),
        });
        let out = cmd.output(&context(&mock)).await.unwrap();
        assert_eq!(out, "Granted ROLE_ADMIN to user #3\n");
    }

    #[tokio::test]
    async fn delete_novel_hits_novel_path() {
        let mock = ApiMockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/novels/17"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(mock.server())
            .await;

        let out = AdminCommands::DeleteNovel { id: 17.into() }
            .output(&context(&mock))
            .await
            .unwrap();
        assert_eq!(out, "Deleted novel #17\n");
    }

    #[tokio::test]
    async fn delete_novel_reports_forbidden() {
        let mock = ApiMockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/novels/17"))
            .respond_with(ResponseTemplate::new(403))
            .mount(mock.server())
            .await;

        let err = AdminCommands::DeleteNovel { id: 17.into() }
            .output(&context(&mock))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to delete novel #17");
    }

    #[test]
    fn format_users_joins_roles() {
        let users: Vec<User> = serde_json::from_value(json!([
            {"id": 1, "username": "root", "email": "root@example.com", "roles": ["ROLE_USER", "ROLE_ADMIN"]}
        ]))
        .unwrap();

        assert_eq!(
            format_users(&users),
            "ID  USERNAME  EMAIL             ROLES\n1   root      root@example.com  ROLE_USER,ROLE_ADMIN\n"
        );
    }
}
