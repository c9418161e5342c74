//! Durable ownership of todo items.
//!
//! # Design
//! Handlers see storage only through [`TodoStore`]. A store is a cheap,
//! cloneable handle built once at startup and injected into the router as
//! state, so every test can run against its own isolated instance.
//!
//! The store is the final arbiter of uniqueness: `create` must report a
//! duplicate id as [`StoreError::Conflict`] even when the caller already
//! checked with `find_by_id`, since two requests can pass that check at once.

mod memory;
mod sqlite;

use std::future::Future;

use thiserror::Error;

use crate::model::{TodoId, TodoItem};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("todo item {0} not found")]
    NotFound(TodoId),

    #[error("todo item {0} already exists")]
    Conflict(TodoId),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub trait TodoStore: Clone + Send + Sync + 'static {
    /// Create the backing schema if it does not exist yet. Idempotent.
    fn migrate(&self) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// All items, ordered by id.
    fn find_all(&self) -> impl Future<Output = Result<Vec<TodoItem>, StoreError>> + Send;

    fn find_by_id(&self, id: TodoId) -> impl Future<Output = Result<TodoItem, StoreError>> + Send;

    /// Insert a new row. Never overwrites an existing id.
    fn create(&self, item: &TodoItem) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Write `title` and `completed` of an existing row.
    fn save(&self, item: &TodoItem) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn delete(&self, item: &TodoItem) -> impl Future<Output = Result<(), StoreError>> + Send;
}
