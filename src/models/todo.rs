use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A todo item as stored in the database and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    /// Store-assigned identifier. Never changes after creation.
    pub id: i32,
    /// Free-form text. Never null; an empty string is the floor.
    pub description: String,
}

/// Request body for creating or updating a todo.
///
/// Both a missing `description` and an explicit `null` are accepted and
/// collapse to an empty string.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TodoInput {
    #[serde(default)]
    pub description: Option<String>,
}

impl TodoInput {
    /// Consumes the input, yielding the description to persist.
    pub fn into_description(self) -> String {
        self.description.unwrap_or_default()
    }
}
