//! Error types for the authenticated API client.

use reqwest::StatusCode;
use thiserror::Error;

use super::token_store::TokenStoreError;

/// Authentication could not be established or restored.
///
/// Terminal for the request that produced it. Callers should treat the user
/// as logged out.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The refresh call failed; stored tokens have been cleared.
    /// Carries the status of the original request that triggered the refresh.
    #[error("Session expired (HTTP {}); please log in again", .status.as_u16())]
    SessionExpired { status: StatusCode },

    /// The request was rejected again after a successful refresh.
    #[error("Request rejected after token refresh (HTTP {})", .status.as_u16())]
    Rejected { status: StatusCode },
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::SessionExpired { status } | Self::Rejected { status } => *status,
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure: no response was received.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The backend answered with a non-success status that is not an auth failure.
    #[error("{method} {path} failed with HTTP {}{}", .status.as_u16(), format_message(.message))]
    Status {
        method: String,
        path: String,
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        source: serde_json::Error,
    },

    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Invalid API base URL {url}: {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error(transparent)]
    TokenStore(#[from] TokenStoreError),

    /// Rejected locally; no request was sent.
    #[error("{0}")]
    InvalidInput(String),
}

impl ApiError {
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Auth(e) => Some(e.status()),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn format_message(message: &Option<String>) -> String {
    match message.as_deref().map(str::trim) {
        Some(m) if !m.is_empty() => format!(": {m}"),
        _ => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
