//! User administration.

use reqwest::Method;

use crate::infra::api::{ApiClient, RequestOptions, Result};
use crate::models::Id;
use crate::models::user::User;

use super::segment;

/// Trait for user administration.
#[async_trait::async_trait]
pub trait UserClient: Send + Sync {
    async fn users(&self) -> Result<Vec<User>>;

    async fn user_by_username(&self, username: &str) -> Result<User>;

    async fn add_role(&self, user_id: &Id, role: &str) -> Result<()>;

    async fn remove_role(&self, user_id: &Id, role: &str) -> Result<()>;

    async fn delete_user(&self, user_id: &Id) -> Result<()>;
}

#[async_trait::async_trait]
impl UserClient for ApiClient {
    async fn users(&self) -> Result<Vec<User>> {
        self.get("/users").await
    }

    async fn user_by_username(&self, username: &str) -> Result<User> {
        self.get(&format!("/users/username/{}", segment(username)))
            .await
    }

    async fn add_role(&self, user_id: &Id, role: &str) -> Result<()> {
        change_role(self, user_id, "add-role", role).await
    }

    async fn remove_role(&self, user_id: &Id, role: &str) -> Result<()> {
        change_role(self, user_id, "remove-role", role).await
    }

    async fn delete_user(&self, user_id: &Id) -> Result<()> {
        self.delete(&format!("/users/{}", segment(user_id))).await
    }
}

async fn change_role(client: &ApiClient, user_id: &Id, action: &str, role: &str) -> Result<()> {
    client
        .send::<()>(
            Method::PATCH,
            &format!("/users/{}/{action}", segment(user_id)),
            None,
            RequestOptions::new().query("roleName", role),
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::api::mock::ApiMockServer;
    use rstest::rstest;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    #[rstest]
    #[case::add(true, "/users/3/add-role")]
    #[case::remove(false, "/users/3/remove-role")]
    #[tokio::test]
    async fn role_changes_patch_with_role_name(#[case] add: bool, #[case] expected_path: &str) {
        let mock = ApiMockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path(expected_path))
            .and(query_param("roleName", "ROLE_ADMIN"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(mock.server())
            .await;

        let client = mock.client_with_tokens("admin", "r1");
        let id = Id::Number(3);
        if add {
            client.add_role(&id, "ROLE_ADMIN").await.unwrap();
        } else {
            client.remove_role(&id, "ROLE_ADMIN").await.unwrap();
        }
    }

    #[tokio::test]
    async fn user_by_username_encodes_segment() {
        let mock = ApiMockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/username/john%20doe"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": 3, "username": "john doe"})),
            )
            .expect(1)
            .mount(mock.server())
            .await;

        let user = mock
            .client_with_tokens("admin", "r1")
            .user_by_username("john doe")
            .await
            .unwrap();
        assert_eq!(user.id, Id::Number(3));
    }

    #[tokio::test]
    async fn list_and_delete_users() {
        let mock = ApiMockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "username": "admin", "roles": [{"name": "ROLE_ADMIN"}]},
                {"id": 2, "username": "reader"}
            ])))
            .mount(mock.server())
            .await;
        Mock::given(method("DELETE"))
            .and(path("/users/2"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(mock.server())
            .await;

        let client = mock.client_with_tokens("admin", "r1");
        let users = client.users().await.unwrap();
        assert!(users[0].is_admin());
        client.delete_user(&users[1].id).await.unwrap();
    }
}
