//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the server's schema but are defined independently so
//! the client carries no axum or sqlx dependency. Integration tests against
//! the live server catch any schema drift between the two crates.

use serde::{Deserialize, Serialize};

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}

/// Request payload for creating a new todo. The caller picks the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// Request payload for updating an existing todo. The server replaces both
/// `title` and `completed`; `id` only selects the item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTodo {
    pub id: i64,
    pub title: String,
    pub completed: bool,
}
