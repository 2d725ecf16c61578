//! Session lifecycle: login, register, current user and logout.

use reqwest::Method;

use crate::infra::api::{ApiClient, IssuedTokens, RequestOptions, Result};
use crate::models::auth::{LoginRequest, RegisterRequest};
use crate::models::user::User;

/// Trait for the session lifecycle.
#[async_trait::async_trait]
pub trait AuthClient: Send + Sync {
    /// Exchange credentials for a token pair and persist it.
    async fn login(&self, email: &str, password: &str) -> Result<()>;

    /// Create an account. The backend logs the new user in immediately.
    async fn register(&self, username: &str, email: &str, password: &str) -> Result<()>;

    async fn me(&self) -> Result<User>;

    /// Tell the backend to end the session, then forget the tokens locally
    /// whether or not the backend call succeeded.
    async fn logout(&self) -> Result<()>;
}

#[async_trait::async_trait]
impl AuthClient for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<()> {
        let issued: IssuedTokens = self
            .send_json(
                Method::POST,
                "/auth/login",
                Some(&LoginRequest { email, password }),
                RequestOptions::new().anonymous(),
            )
            .await?;
        tracing::info!("logged in");
        self.store_tokens(issued)
    }

    async fn register(&self, username: &str, email: &str, password: &str) -> Result<()> {
        let issued: IssuedTokens = self
            .send_json(
                Method::POST,
                "/auth/register",
                Some(&RegisterRequest {
                    username,
                    email,
                    password,
                }),
                RequestOptions::new().anonymous(),
            )
            .await?;
        tracing::info!(username, "registered");
        self.store_tokens(issued)
    }

    async fn me(&self) -> Result<User> {
        self.get("/auth/me").await
    }

    async fn logout(&self) -> Result<()> {
        let remote = self
            .send::<()>(Method::POST, "/auth/logout", None, RequestOptions::new())
            .await;
        if let Err(e) = &remote {
            tracing::warn!(error = %e, "backend logout failed; clearing local session anyway");
        }
        self.clear_tokens()
    }
}
