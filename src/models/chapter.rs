use serde::{Deserialize, Serialize};

use super::Id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: Id,
    #[serde(default)]
    pub novel_id: Option<Id>,
    #[serde(default)]
    pub volume_number: Option<i64>,
    #[serde(default)]
    pub chapter_number: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Chapter {
    /// "Vol. 1 Ch. 12: Title", leaving out whatever is missing.
    pub fn heading(&self) -> String {
        let mut parts = Vec::new();
        if let Some(volume) = self.volume_number {
            parts.push(format!("Vol. {volume}"));
        }
        if let Some(number) = self.chapter_number {
            parts.push(format!("Ch. {number}"));
        }
        let position = parts.join(" ");

        match self.title.as_deref().filter(|t| !t.is_empty()) {
            Some(title) if position.is_empty() => title.to_string(),
            Some(title) => format!("{position}: {title}"),
            None if position.is_empty() => format!("Chapter {}", self.id),
            None => position,
        }
    }
}

/// Payload for `POST /chapters` and `PUT /chapters/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterDraft {
    pub novel_id: Id,
    pub title: String,
    pub content: String,
    pub volume_number: Option<i64>,
    pub chapter_number: Option<i64>,
    pub like_count: i64,
}

/// Address of a chapter inside a novel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterLocator {
    pub novel_id: Id,
    pub volume: i64,
    pub chapter: i64,
}

impl ChapterLocator {
    pub fn find_path(&self) -> String {
        format!("/chapters/find/{}/{}/{}", self.novel_id, self.volume, self.chapter)
    }

    pub fn previous_path(&self) -> String {
        format!("/chapters/{}/{}/{}/previous", self.novel_id, self.volume, self.chapter)
    }

    pub fn next_path(&self) -> String {
        format!("/chapters/{}/{}/{}/next", self.novel_id, self.volume, self.chapter)
    }
}
