use std::io::BufRead;

use anyhow::Context;
use clap::Subcommand;

use super::AppContext;
use crate::infra::api::AuthState;
use crate::resources::AuthClient;

#[derive(Subcommand, Clone, PartialEq, Eq)]
pub enum AuthCommands {
    /// Log in and store the session
    Login {
        #[arg(long)]
        email: String,

        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account and log in
    Register {
        #[arg(long)]
        username: String,

        #[arg(long)]
        email: String,

        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Show the logged-in user
    Whoami,

    /// Show whether a session is stored, without contacting the backend
    Status,

    /// End the session and forget stored tokens
    Logout,
}

impl AuthCommands {
    pub async fn run(&self, ctx: &AppContext) -> anyhow::Result<()> {
        print!("{}", self.output(ctx).await?);
        Ok(())
    }

    async fn output(&self, ctx: &AppContext) -> anyhow::Result<String> {
        let client = &ctx.client;
        match self {
            Self::Login { email, password } => {
                let password = password_or_stdin(password.as_deref())?;
                client
                    .login(email, &password)
                    .await
                    .context("Login failed")?;
                Ok(format!("Logged in as {email}\n"))
            }
            Self::Register {
                username,
                email,
                password,
            } => {
                let password = password_or_stdin(password.as_deref())?;
                client
                    .register(username, email, &password)
                    .await
                    .context("Registration failed")?;
                Ok(format!("Registered and logged in as {username}\n"))
            }
            Self::Whoami => {
                let me = client.me().await.context("Failed to fetch current user")?;
                let badge = if me.is_admin() { " [admin]" } else { "" };
                let mut out = format!("{} (#{}){badge}\n", me.username, me.id);
                if let Some(email) = me.email.as_deref() {
                    out.push_str(&format!("Email: {email}\n"));
                }
                let roles = me.role_names();
                if !roles.is_empty() {
                    out.push_str(&format!("Roles: {}\n", roles.join(", ")));
                }
                Ok(out)
            }
            Self::Status => Ok(match client.session().state() {
                AuthState::Authenticated => "Logged in\n",
                AuthState::Expired => "Token refresh in progress\n",
                AuthState::Anonymous => "Not logged in\n",
            }
            .to_string()),
            Self::Logout => {
                client.logout().await.context("Failed to clear session")?;
                Ok("Logged out\n".to_string())
            }
        }
    }
}

fn password_or_stdin(password: Option<&str>) -> anyhow::Result<String> {
    if let Some(password) = password {
        return Ok(password.to_string());
    }
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        anyhow::bail!("Password must not be empty");
    }
    Ok(password)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::context;
    use crate::infra::api::mock::ApiMockServer;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    #[tokio::test]
    async fn whoami_lists_roles() {
        let mock = ApiMockServer::start().await;
        mock.current_user(7, "reader").await;

        let out = AuthCommands::Whoami.output(&context(&mock)).await.unwrap();
        assert_eq!(out, "reader (#7)\nEmail: reader@example.com\nRoles: USER\n");
    }

    #[tokio::test]
    async fn whoami_marks_admins() {
        let mock = ApiMockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1,
                "username": "root",
                "roles": [{"name": "ROLE_USER"}, {"name": "ROLE_ADMIN"}]
            })))
            .mount(mock.server())
            .await;

        let out = AuthCommands::Whoami.output(&context(&mock)).await.unwrap();
        assert_eq!(out, "root (#1) [admin]\nRoles: ROLE_USER, ROLE_ADMIN\n");
    }

    #[tokio::test]
    async fn login_with_password_flag() {
        let mock = ApiMockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"accessToken": "new", "refreshToken": "r2"})),
            )
            .mount(mock.server())
            .await;

        let ctx = context(&mock);
        let cmd = AuthCommands::Login {
            email: "r@example.com".to_string(),
            password: Some("pw".to_string()),
        };
        let out = cmd.output(&ctx).await.unwrap();

        assert_eq!(out, "Logged in as r@example.com\n");
        assert_eq!(ctx.client.session().access_token().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn status_reflects_local_session() {
        let mock = ApiMockServer::start().await;
        let ctx = context(&mock);
        assert_eq!(AuthCommands::Status.output(&ctx).await.unwrap(), "Logged in\n");

        ctx.client.clear_tokens().unwrap();
        assert_eq!(
            AuthCommands::Status.output(&ctx).await.unwrap(),
            "Not logged in\n"
        );
    }
}
