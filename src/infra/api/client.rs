//! Authenticated HTTP client for the platform backend.
//!
//! Every request carries `Authorization: Bearer <access token>` when the
//! session holds one. A response that the [`RefreshTrigger`] policy counts as
//! an auth failure causes exactly one refresh call followed by exactly one
//! re-dispatch of the original request. Concurrent failures share a single
//! refresh: whoever takes the refresh lock first refreshes, the others see
//! the bumped session generation and simply retry with the new token.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use super::error::{ApiError, AuthError, Result};
use super::refresh::{IssuedTokens, REFRESH_PATH, RefreshRequest, parse_refresh_body};
use super::retry::{Next, RefreshTrigger, RetryState};
use super::session::{Session, SessionSnapshot};
use super::token_store::{MemoryTokenStore, TokenStore};

const MAX_ERROR_MESSAGE_LEN: usize = 200;

/// Per-request knobs.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    query: Vec<(String, String)>,
    anonymous: bool,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a query parameter.
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Send without a bearer token and never refresh (login, register).
    pub fn anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }
}

/// A fully received HTTP response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    method: Method,
    path: String,
    status: StatusCode,
    body: Vec<u8>,
}

impl ApiResponse {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|source| ApiError::Decode {
            path: self.path.clone(),
            source,
        })
    }

    /// Turn a non-success status into [`ApiError::Status`].
    pub fn error_for_status(self) -> Result<Self> {
        if self.status.is_success() {
            return Ok(self);
        }
        Err(ApiError::Status {
            method: self.method.to_string(),
            path: self.path,
            status: self.status,
            message: error_message(&self.body),
        })
    }
}

/// Pull a human-readable message out of an error body.
fn error_message(body: &[u8]) -> Option<String> {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        if let Some(msg) = ["message", "error", "detail"]
            .iter()
            .find_map(|key| value.get(key).and_then(|v| v.as_str()))
        {
            return Some(msg.to_string());
        }
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some(text.chars().take(MAX_ERROR_MESSAGE_LEN).collect())
}

/// A request with its body already encoded, so it can be sent twice.
struct PreparedRequest {
    method: Method,
    path: String,
    url: String,
    body: Option<Vec<u8>>,
    options: RequestOptions,
}

pub struct ApiClientBuilder {
    base_url: String,
    timeout: Option<Duration>,
    trigger: RefreshTrigger,
    store: Option<Arc<dyn TokenStore>>,
}

impl ApiClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn refresh_trigger(mut self, trigger: RefreshTrigger) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Validate the origin, build the HTTP client and load any stored tokens.
    pub fn build(self) -> Result<ApiClient> {
        let base_url = normalize_base_url(&self.base_url)?;

        let mut http = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(concat!("novelhub/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }
        let http = http.build().map_err(ApiError::Network)?;

        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryTokenStore::new()));
        let tokens = store.load()?.unwrap_or_default();

        Ok(ApiClient {
            http,
            base_url,
            session: Session::with_tokens(tokens),
            store,
            trigger: self.trigger,
            refresh_lock: Mutex::new(()),
        })
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let url = Url::parse(raw.trim()).map_err(|e| ApiError::InvalidBaseUrl {
        url: raw.to_string(),
        message: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::InvalidBaseUrl {
            url: raw.to_string(),
            message: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ApiError::InvalidBaseUrl {
            url: raw.to_string(),
            message: "query and fragment are not allowed".to_string(),
        });
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
    store: Arc<dyn TokenStore>,
    trigger: RefreshTrigger,
    refresh_lock: Mutex<()>,
}

impl ApiClient {
    /// Start configuring a client for the given backend origin.
    pub fn builder(base_url: impl Into<String>) -> ApiClientBuilder {
        ApiClientBuilder {
            base_url: base_url.into(),
            timeout: None,
            trigger: RefreshTrigger::default(),
            store: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Replace the in-memory access token. `None` clears it.
    pub fn set_access_token(&self, token: Option<String>) {
        self.session.set_access_token(token);
    }

    /// Adopt tokens issued by login/register and persist them.
    pub fn store_tokens(&self, issued: IssuedTokens) -> Result<()> {
        self.session.set_tokens(issued.into());
        self.store.save(&self.session.tokens())?;
        Ok(())
    }

    /// Forget every token, in memory and on disk.
    pub fn clear_tokens(&self) -> Result<()> {
        self.session.clear();
        self.store.clear()?;
        Ok(())
    }

    /// Send a request, refreshing the access token at most once.
    ///
    /// Non-auth failures (404, 500, ...) are returned as `Ok` responses
    /// unchanged; use [`ApiResponse::error_for_status`] to reject them.
    pub async fn request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: RequestOptions,
    ) -> Result<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        let prepared = self.prepare(method, path, body, options)?;

        let mut retry = RetryState::Initial;
        loop {
            let used = if prepared.options.anonymous {
                None
            } else {
                Some(self.session.snapshot())
            };
            let token = used.as_ref().and_then(|s| s.access_token.as_deref());
            let response = self.dispatch(&prepared, token).await?;

            let Some(used) = used else {
                return Ok(response);
            };
            match retry.next(self.trigger, response.status) {
                Next::Deliver => return Ok(response),
                Next::GiveUp => {
                    tracing::debug!(
                        method = %prepared.method,
                        path = %prepared.path,
                        status = response.status.as_u16(),
                        "request rejected again after refresh"
                    );
                    return Err(AuthError::Rejected {
                        status: response.status,
                    }
                    .into());
                }
                Next::RefreshAndRetry => {
                    self.recover(&used, response.status).await?;
                    retry = retry.retried();
                }
            }
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_with(path, RequestOptions::new()).await
    }

    pub async fn get_with<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T> {
        self.request::<()>(Method::GET, path, None, options)
            .await?
            .error_for_status()?
            .json()
    }

    /// Like [`Self::get`] but maps 404 to `None`.
    pub async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let response = self
            .request::<()>(Method::GET, path, None, RequestOptions::new())
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        response.error_for_status()?.json().map(Some)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::POST, path, Some(body), RequestOptions::new())
            .await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(Method::PUT, path, Some(body), RequestOptions::new())
            .await
    }

    /// Send a request and decode the JSON response, rejecting non-success statuses.
    pub async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: RequestOptions,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(method, path, body, options)
            .await?
            .error_for_status()?
            .json()
    }

    /// Send a request whose response body is not needed.
    pub async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: RequestOptions,
    ) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.request(method, path, body, options)
            .await?
            .error_for_status()
            .map(|_| ())
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send::<()>(Method::DELETE, path, None, RequestOptions::new())
            .await
    }

    fn prepare<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        options: RequestOptions,
    ) -> Result<PreparedRequest>
    where
        B: Serialize + ?Sized,
    {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(ApiError::Encode)?;
        Ok(PreparedRequest {
            url: format!("{}{}", self.base_url, path),
            method,
            path,
            body,
            options,
        })
    }

    async fn dispatch(&self, req: &PreparedRequest, token: Option<&str>) -> Result<ApiResponse> {
        let mut builder = self.http.request(req.method.clone(), &req.url);
        if !req.options.query.is_empty() {
            builder = builder.query(&req.options.query);
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &req.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.clone());
        }

        tracing::debug!(
            method = %req.method,
            path = %req.path,
            authenticated = token.is_some(),
            "dispatching request"
        );
        let response = builder.send().await.map_err(ApiError::Network)?;
        let status = response.status();
        let body = response.bytes().await.map_err(ApiError::Network)?.to_vec();
        tracing::debug!(method = %req.method, path = %req.path, status = status.as_u16(), "response received");

        Ok(ApiResponse {
            method: req.method.clone(),
            path: req.path.clone(),
            status,
            body,
        })
    }

    /// Restore a usable access token after `status` rejected the one in `used`.
    ///
    /// On failure the session and token store are cleared and the original
    /// status is reported as [`AuthError::SessionExpired`].
    async fn recover(&self, used: &SessionSnapshot, status: StatusCode) -> Result<()> {
        let _guard = self.refresh_lock.lock().await;

        if self.session.generation() != used.generation {
            // Someone refreshed or logged out while we waited.
            return if self.session.access_token().is_some() {
                Ok(())
            } else {
                Err(AuthError::SessionExpired { status }.into())
            };
        }

        self.session.begin_refresh();
        match self.call_refresh().await {
            Ok(issued) => {
                tracing::info!("access token refreshed");
                self.session.set_tokens(issued.into());
                if let Err(e) = self.store.save(&self.session.tokens()) {
                    tracing::warn!(error = %e, "failed to persist refreshed tokens");
                }
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "token refresh failed; clearing session");
                self.session.clear();
                if let Err(e) = self.store.clear() {
                    tracing::warn!(error = %e, "failed to clear stored tokens");
                }
                Err(AuthError::SessionExpired { status }.into())
            }
        }
    }

    async fn call_refresh(&self) -> Result<IssuedTokens> {
        let refresh_token = self.session.refresh_token();
        let body = refresh_token.as_deref().map(|refresh_token| RefreshRequest { refresh_token });
        let prepared = self.prepare(
            Method::POST,
            REFRESH_PATH,
            body.as_ref(),
            RequestOptions::new().anonymous(),
        )?;

        let response = self.dispatch(&prepared, None).await?.error_for_status()?;
        parse_refresh_body(response.body()).ok_or_else(|| ApiError::Status {
            method: Method::POST.to_string(),
            path: REFRESH_PATH.to_string(),
            status: response.status(),
            message: Some("response did not contain an access token".to_string()),
        })
    }
}
