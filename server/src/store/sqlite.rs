use std::{path::Path, str::FromStr};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use super::{StoreError, TodoStore};
use crate::model::{TodoId, TodoItem};

/// Path accepted by [`SqliteStore::open`] to get a private in-memory database.
const IN_MEMORY: &str = ":memory:";

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS todo_items (
    id INTEGER PRIMARY KEY NOT NULL,
    title TEXT NOT NULL,
    completed BOOLEAN NOT NULL DEFAULT 0
)";

/// SQLite-backed store. Cloning shares the underlying connection pool.
#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the database file at `path`. Missing parent
    /// directories are created. `":memory:"` yields [`SqliteStore::in_memory`].
    pub async fn open(path: &str) -> Result<Self, StoreError> {
        if path == IN_MEMORY {
            return Self::in_memory().await;
        }

        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(sqlx::Error::Io)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        tracing::debug!(path, "opened sqlite store");
        Ok(Self { pool })
    }

    /// A database that lives as long as this store's single pooled
    /// connection. Every call returns an independent, empty database.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl TodoStore for SqliteStore {
    async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<TodoItem>, StoreError> {
        let items = sqlx::query_as::<_, TodoItem>(
            "SELECT id, title, completed FROM todo_items ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn find_by_id(&self, id: TodoId) -> Result<TodoItem, StoreError> {
        sqlx::query_as::<_, TodoItem>("SELECT id, title, completed FROM todo_items WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    async fn create(&self, item: &TodoItem) -> Result<(), StoreError> {
        let result = sqlx::query("INSERT INTO todo_items (id, title, completed) VALUES (?, ?, ?)")
            .bind(item.id)
            .bind(&item.title)
            .bind(item.completed)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                Err(StoreError::Conflict(item.id))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, item: &TodoItem) -> Result<(), StoreError> {
        let done = sqlx::query("UPDATE todo_items SET title = ?, completed = ? WHERE id = ?")
            .bind(&item.title)
            .bind(item.completed)
            .bind(item.id)
            .execute(&self.pool)
            .await?;
        if done.rows_affected() == 0 {
            return Err(StoreError::NotFound(item.id));
        }
        Ok(())
    }

    async fn delete(&self, item: &TodoItem) -> Result<(), StoreError> {
        let done = sqlx::query("DELETE FROM todo_items WHERE id = ?")
            .bind(item.id)
            .execute(&self.pool)
            .await?;
        if done.rows_affected() == 0 {
            return Err(StoreError::NotFound(item.id));
        }
        Ok(())
    }
}
