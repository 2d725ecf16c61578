use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::Id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Id,
    #[serde(default)]
    pub novel_id: Option<Id>,
    #[serde(default)]
    pub author_id: Option<Id>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub sentiment: Option<Sentiment>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub criteria: Vec<Criterion>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Criterion {
    #[serde(default)]
    pub id: Option<Id>,
    pub criterion_name: String,
    pub score: f64,
}

/// Payload for `POST /reviews`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub novel_id: Id,
    pub author_id: Id,
    pub sentiment: Sentiment,
    pub title: String,
    pub text: String,
    pub criteria: Vec<Criterion>,
}

/// Payload for `PUT /reviews/{id}`: the create payload plus the id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewUpdate<'a> {
    pub id: &'a Id,
    #[serde(flatten)]
    pub review: &'a NewReview,
}
