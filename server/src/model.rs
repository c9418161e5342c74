//! The todo item record and the payloads that create or update it.
//!
//! Payloads decode strictly: unknown fields are an error and required fields
//! are never filled in from defaults. `completed` is the one exception on
//! create, where a missing flag means "not done yet".

use serde::{Deserialize, Serialize};

/// Primary key of a todo item. Supplied by the client, must be positive.
pub type TodoId = i64;

/// Body returned for every payload that decodes but fails validation.
pub const INVALID_REQUEST: &str = "Request is not valid\n";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TodoItem {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTodo {
    pub id: TodoId,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// Full replacement of the mutable fields of an existing item. `id` selects
/// the row and is never written.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTodo {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
}

impl CreateTodo {
    pub fn is_valid(&self) -> bool {
        is_valid(self.id, &self.title)
    }

    pub fn into_item(self) -> TodoItem {
        TodoItem {
            id: self.id,
            title: self.title,
            completed: self.completed,
        }
    }
}

impl UpdateTodo {
    pub fn is_valid(&self) -> bool {
        is_valid(self.id, &self.title)
    }

    /// Copy `title` and `completed` onto `item`, leaving its id untouched.
    pub fn apply_to(self, item: &mut TodoItem) {
        item.title = self.title;
        item.completed = self.completed;
    }
}

fn is_valid(id: TodoId, title: &str) -> bool {
    id > 0 && !title.is_empty()
}
