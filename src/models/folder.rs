//! Reading lists ("folders") and their entries.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::Id;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FolderType {
    #[default]
    Reading,
    PlanToRead,
    Completed,
    Paused,
    Dropped,
}

impl FolderType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Reading => "reading",
            Self::PlanToRead => "plan to read",
            Self::Completed => "completed",
            Self::Paused => "paused",
            Self::Dropped => "dropped",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: Id,
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: Option<FolderType>,
    #[serde(default)]
    pub user_id: Option<Id>,
}

/// Payload for `POST /folders`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFolder {
    pub user_id: Id,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FolderType,
}

/// A novel filed in a folder. The backend keys entries by (folder, novel).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderNovel {
    #[serde(default)]
    pub id: Option<FolderNovelKey>,
    #[serde(default)]
    pub folder_id: Option<Id>,
    #[serde(default)]
    pub folder_name: Option<String>,
    #[serde(default)]
    pub novel_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderNovelKey {
    pub folder_id: Id,
    pub novel_id: Id,
}

/// Payload for `POST /folder-novels`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFolderNovel {
    pub folder_id: Id,
    pub novel_id: Id,
    pub novel_name: Option<String>,
    pub cover_url: Option<String>,
    pub user_id: Id,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::reading("\"READING\"", FolderType::Reading)]
    #[case::plan("\"PLAN_TO_READ\"", FolderType::PlanToRead)]
    #[case::dropped("\"DROPPED\"", FolderType::Dropped)]
    fn test_folder_type_deserialize(#[case] json: &str, #[case] expected: FolderType) {
        assert_eq!(serde_json::from_str::<FolderType>(json).unwrap(), expected);
    }

    #[test]
    fn new_folder_uses_type_key() {
        let payload = NewFolder {
            user_id: Id::Number(3),
            name: "Summer".to_string(),
            kind: FolderType::PlanToRead,
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"userId": 3, "name": "Summer", "type": "PLAN_TO_READ"})
        );
    }

    #[test]
    fn deserialize_folder_novel_with_composite_key() {
        let entry: FolderNovel = serde_json::from_value(json!({
            "id": {"folderId": 1, "novelId": 5},
            "novelName": "Володар таємниць"
        }))
        .unwrap();
        assert_eq!(entry.id.unwrap().novel_id, Id::Number(5));
    }
}
