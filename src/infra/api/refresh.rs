//! Refresh endpoint contract.
//!
//! Deployments disagree on the response shape of `POST /auth/refresh`: some
//! return `{ "accessToken": ..., "refreshToken": ... }`, some a JSON string,
//! some the bare token as text. All three are accepted.

use serde::{Deserialize, Serialize};

use super::session::Tokens;

pub const REFRESH_PATH: &str = "/auth/refresh";

/// Body sent to the refresh endpoint when a refresh token is held.
/// Cookie-based deployments get an empty body and rely on the cookie jar.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

/// Tokens issued by login, register or refresh.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedTokens {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl From<IssuedTokens> for Tokens {
    fn from(issued: IssuedTokens) -> Self {
        Tokens {
            access_token: Some(issued.access_token),
            refresh_token: issued.refresh_token,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RefreshBody {
    Pair(IssuedTokens),
    Bare(String),
}

/// Extract the new token pair from a successful refresh response body.
/// Returns `None` when no usable access token is present.
pub fn parse_refresh_body(body: &[u8]) -> Option<IssuedTokens> {
    let issued = match serde_json::from_slice::<RefreshBody>(body) {
        Ok(RefreshBody::Pair(pair)) => pair,
        Ok(RefreshBody::Bare(token)) => IssuedTokens {
            access_token: token,
            refresh_token: None,
        },
        Err(_) => IssuedTokens {
            access_token: plain_token(body)?,
            refresh_token: None,
        },
    };

    let access_token = issued.access_token.trim().to_string();
    if access_token.is_empty() {
        return None;
    }
    Some(IssuedTokens {
        access_token,
        refresh_token: issued.refresh_token.filter(|t| !t.trim().is_empty()),
    })
}

fn plain_token(body: &[u8]) -> Option<String> {
    let text = std::str::from_utf8(body).ok()?.trim();
    if text.is_empty() || text.contains(char::is_whitespace) || text.starts_with(['{', '[']) {
        return None;
    }
    Some(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn issued(access: &str, refresh: Option<&str>) -> IssuedTokens {
        IssuedTokens {
            access_token: access.to_string(),
            refresh_token: refresh.map(str::to_string),
        }
    }

    #[rstest]
    #[case::pair(
        r#"{"accessToken":"a2","refreshToken":"r2"}"#,
        Some(issued("a2", Some("r2")))
    )]
    #[case::access_only(r#"{"accessToken":"a2"}"#, Some(issued("a2", None)))]
    #[case::null_refresh(r#"{"accessToken":"a2","refreshToken":null}"#, Some(issued("a2", None)))]
    #[case::empty_refresh(r#"{"accessToken":"a2","refreshToken":""}"#, Some(issued("a2", None)))]
    #[case::json_string(r#""a2""#, Some(issued("a2", None)))]
    #[case::plain_text("eyJhbGciOi.payload.sig\n", Some(issued("eyJhbGciOi.payload.sig", None)))]
    #[case::empty("", None)]
    #[case::blank_json_string(r#""  ""#, None)]
    #[case::object_without_token(r#"{"message":"ok"}"#, None)]
    #[case::sentence("token expired, log in", None)]
    fn test_parse_refresh_body(#[case] body: &str, #[case] expected: Option<IssuedTokens>) {
        assert_eq!(parse_refresh_body(body.as_bytes()), expected);
    }

    #[test]
    fn refresh_request_serializes_camel_case() {
        let body = serde_json::to_string(&RefreshRequest {
            refresh_token: "r1",
        })
        .unwrap();
        assert_eq!(body, r#"{"refreshToken":"r1"}"#);
    }

    #[test]
    fn issued_tokens_convert_into_session_tokens() {
        let tokens: Tokens = issued("a", Some("r")).into();
        assert_eq!(tokens.access_token.as_deref(), Some("a"));
        assert_eq!(tokens.refresh_token.as_deref(), Some("r"));
    }
}
