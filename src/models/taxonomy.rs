use serde::{Deserialize, Serialize};

use super::Id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: Id,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Id,
    pub name: String,
}

/// Create/rename payload shared by genres and tags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameInput<'a> {
    pub name: &'a str,
}
