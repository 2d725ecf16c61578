//! wiremock-based backend mock for testing.
//!
//! ```ignore
//! let mock = ApiMockServer::start().await;
//! mock.comments_for(CommentScope::Novel(5.into()), json!([...])).await;
//! mock.refresh_returns_json(json!({"accessToken": "fresh"})).await;
//!
//! let client = mock.client_with_tokens("stale", "r1");
//! ```

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::client::ApiClient;
use super::session::Tokens;
use super::token_store::MemoryTokenStore;
use crate::models::comment::CommentScope;

/// Build a backend comment record.
pub fn mock_comment(id: i64, parent: Option<i64>, username: &str, text: &str) -> serde_json::Value {
    json!({
        "id": id,
        "text": text,
        "parentCommentId": parent,
        "userId": 1,
        "username": username,
        "userAvatarUrl": format!("https://cdn.example.com/avatars/{username}.png"),
        "createdAt": "2024-01-02T00:00:00",
        "likes": 0
    })
}

pub struct ApiMockServer {
    server: MockServer,
}

impl ApiMockServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn server(&self) -> &MockServer {
        &self.server
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Client with no tokens.
    pub fn client(&self) -> ApiClient {
        ApiClient::builder(self.uri()).build().unwrap()
    }

    /// Client whose session starts with the given token pair.
    pub fn client_with_tokens(&self, access: &str, refresh: &str) -> ApiClient {
        let store = MemoryTokenStore::with_tokens(Tokens {
            access_token: Some(access.to_string()),
            refresh_token: Some(refresh.to_string()),
        });
        ApiClient::builder(self.uri())
            .token_store(Arc::new(store))
            .build()
            .unwrap()
    }

    /// Mock POST /auth/refresh with a JSON body.
    pub async fn refresh_returns_json(&self, body: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Assert POST /auth/refresh is called exactly `n` times (checked on drop).
    pub async fn expect_refresh_calls(&self, n: u64) {
        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .respond_with(ResponseTemplate::new(401))
            .expect(n)
            .mount(&self.server)
            .await;
    }

    /// Mock GET /auth/me.
    pub async fn current_user(&self, id: i64, username: &str) {
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": id,
                "username": username,
                "email": format!("{username}@example.com"),
                "roles": ["USER"]
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock the flat comment list for a container.
    pub async fn comments_for(&self, scope: CommentScope, comments: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(scope.list_path()))
            .respond_with(ResponseTemplate::new(200).set_body_json(comments))
            .mount(&self.server)
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_server_serves_comment_list() {
        let mock = ApiMockServer::start().await;
        mock.comments_for(
            CommentScope::Chapter(3.into()),
            json!([mock_comment(1, None, "alice", "hi")]),
        )
        .await;

        let client = mock.client();
        let raw: Vec<serde_json::Value> = client.get("/comments/chapter/3").await.unwrap();
        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0]["username"], "alice");
    }
}
