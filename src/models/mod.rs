//! Records exchanged with the platform backend.

pub mod auth;
pub mod chapter;
pub mod comment;
pub mod folder;
pub mod novel;
pub mod review;
pub mod taxonomy;
pub mod thread;
pub mod user;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Backend identifier. Most resources use integers, but the API is not
/// consistent about it, so string ids are accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    Number(i64),
    Text(String),
}

impl Id {
    /// `0` and `""` are what the backend sends for "no reference".
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Number(n) => *n == 0,
            Self::Text(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Id {
    fn from(n: i32) -> Self {
        Self::Number(n.into())
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Numeric strings become [`Id::Number`] so CLI arguments serialize the same
/// way the backend sent them.
impl FromStr for Id {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>()
            .map(Id::Number)
            .unwrap_or_else(|_| Id::Text(s.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::number("42", Id::Number(42))]
    #[case::negative("-1", Id::Number(-1))]
    #[case::uuid("a1b2-c3", Id::Text("a1b2-c3".to_string()))]
    fn test_id_from_str(#[case] input: &str, #[case] expected: Id) {
        assert_eq!(input.parse::<Id>().unwrap(), expected);
    }

    #[rstest]
    #[case::number("7", Id::Number(7))]
    #[case::string("\"abc\"", Id::Text("abc".to_string()))]
    fn test_id_deserialize(#[case] json: &str, #[case] expected: Id) {
        assert_eq!(serde_json::from_str::<Id>(json).unwrap(), expected);
    }

    #[rstest]
    #[case::zero(Id::Number(0), true)]
    #[case::empty(Id::Text(String::new()), true)]
    #[case::one(Id::Number(1), false)]
    #[case::text(Id::Text("x".to_string()), false)]
    fn test_is_blank(#[case] id: Id, #[case] expected: bool) {
        assert_eq!(id.is_blank(), expected);
    }

    #[test]
    fn id_serializes_untagged() {
        assert_eq!(serde_json::to_string(&Id::Number(3)).unwrap(), "3");
        assert_eq!(serde_json::to_string(&Id::from("x")).unwrap(), "\"x\"");
        assert_eq!(Id::Number(3).to_string(), "3");
    }
}
