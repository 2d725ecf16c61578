use serde::{Deserialize, Serialize};

use super::Id;

/// A comment as returned by the backend (flat, no replies).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Id,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub parent_comment_id: Option<Id>,
    #[serde(default)]
    pub user_id: Option<Id>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub user_avatar_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub likes: i64,
}

impl Comment {
    /// The parent this comment replies to, treating blank references as none.
    pub fn parent_id(&self) -> Option<&Id> {
        self.parent_comment_id.as_ref().filter(|id| !id.is_blank())
    }

    pub fn author_name(&self) -> &str {
        self.username
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or("unknown")
    }
}

/// The container a comment list belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentScope {
    Novel(Id),
    Chapter(Id),
    Review(Id),
}

impl CommentScope {
    pub fn list_path(&self) -> String {
        match self {
            Self::Novel(id) => format!("/comments/novel/{id}"),
            Self::Chapter(id) => format!("/comments/chapter/{id}"),
            Self::Review(id) => format!("/comments/review/{id}"),
        }
    }

    fn ids(&self) -> (Option<Id>, Option<Id>, Option<Id>) {
        match self {
            Self::Novel(id) => (Some(id.clone()), None, None),
            Self::Chapter(id) => (None, Some(id.clone()), None),
            Self::Review(id) => (None, None, Some(id.clone())),
        }
    }
}

/// Payload for `POST /comments`. Unused container ids are sent as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub text: String,
    pub novel_id: Option<Id>,
    pub chapter_id: Option<Id>,
    pub review_id: Option<Id>,
    pub user_id: Id,
    pub parent_comment_id: Option<Id>,
}

impl NewComment {
    pub fn new(scope: &CommentScope, user_id: Id, text: &str, parent: Option<Id>) -> Self {
        let (novel_id, chapter_id, review_id) = scope.ids();
        Self {
            text: text.to_string(),
            novel_id,
            chapter_id,
            review_id,
            user_id,
            parent_comment_id: parent,
        }
    }
}
