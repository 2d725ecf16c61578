//! REST client for the platform backend.
//!
//! [`ApiClient`] attaches the session's bearer token to every request and
//! recovers once from an expired access token via `POST /auth/refresh`.

mod client;
pub(crate) mod error;
#[cfg(test)]
pub(crate) mod mock;
mod refresh;
mod retry;
mod session;
mod token_store;

pub use client::{ApiClient, RequestOptions};
pub use error::{ApiError, Result};
pub use refresh::IssuedTokens;
pub use retry::RefreshTrigger;
pub use session::AuthState;
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};

#[cfg(test)]
pub use error::AuthError;
#[cfg(test)]
pub use session::Tokens;
