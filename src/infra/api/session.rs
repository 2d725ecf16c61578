//! Process-wide authentication state shared by every request.
//!
//! All reads and writes go through [`Session`]; the tokens are never exposed
//! as a bare global. Every write bumps a generation counter so that a request
//! which failed with an old token can tell whether somebody else has already
//! refreshed (or cleared) the session in the meantime.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

/// Access/refresh token pair as stored on disk and returned by login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tokens {
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl Tokens {
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// No access token.
    Anonymous,
    /// An access token is held and has not been rejected.
    Authenticated,
    /// The access token was rejected and a refresh is in flight.
    Expired,
}

/// The token values a request was dispatched with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub access_token: Option<String>,
    pub generation: u64,
}

#[derive(Debug, Default)]
struct Inner {
    tokens: Tokens,
    refreshing: bool,
    generation: u64,
}

#[derive(Debug, Default)]
pub struct Session {
    inner: RwLock<Inner>,
}

impl Session {
    pub fn with_tokens(tokens: Tokens) -> Self {
        Self {
            inner: RwLock::new(Inner {
                tokens,
                ..Inner::default()
            }),
        }
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().tokens.access_token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read().tokens.refresh_token.clone()
    }

    pub fn tokens(&self) -> Tokens {
        self.read().tokens.clone()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let inner = self.read();
        SessionSnapshot {
            access_token: inner.tokens.access_token.clone(),
            generation: inner.generation,
        }
    }

    pub fn generation(&self) -> u64 {
        self.read().generation
    }

    pub fn state(&self) -> AuthState {
        let inner = self.read();
        if inner.refreshing {
            AuthState::Expired
        } else if inner.tokens.access_token.is_some() {
            AuthState::Authenticated
        } else {
            AuthState::Anonymous
        }
    }

    /// Replace the access token. `None` logs the session out of the API
    /// without touching the refresh token.
    pub fn set_access_token(&self, token: Option<String>) {
        let mut inner = self.write();
        inner.tokens.access_token = token;
        inner.generation += 1;
    }

    /// Store a freshly issued pair. A missing refresh token keeps the current one.
    pub fn set_tokens(&self, tokens: Tokens) {
        let mut inner = self.write();
        inner.tokens.access_token = tokens.access_token;
        if tokens.refresh_token.is_some() {
            inner.tokens.refresh_token = tokens.refresh_token;
        }
        inner.refreshing = false;
        inner.generation += 1;
    }

    pub fn clear(&self) {
        let mut inner = self.write();
        inner.tokens = Tokens::default();
        inner.refreshing = false;
        inner.generation += 1;
    }

    pub(super) fn begin_refresh(&self) {
        self.write().refreshing = true;
    }

    // Poisoning only happens if a writer panicked mid-assignment; the plain
    // data inside is still consistent, so keep going.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
