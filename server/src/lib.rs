//! HTTP service exposing CRUD over todo items backed by a relational store.
//!
//! # Design
//! - [`app`] wires the five handlers onto the router with the store as
//!   shared state. The store handle is passed in, never global.
//! - Handlers are generic over [`TodoStore`], so tests drive the exact same
//!   code against [`SqliteStore`] or [`MemoryStore`].
//! - Cross-origin policy and process lifecycle live in the binary.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod store;

use std::future::Future;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use config::{Config, ConfigError, StoreKind};
pub use error::ApiError;
pub use model::{CreateTodo, TodoId, TodoItem, UpdateTodo};
pub use store::{MemoryStore, SqliteStore, StoreError, TodoStore};

use handlers::{create_todo, delete_todo, get_todo, list_todos, update_todo};

pub fn app<S: TodoStore>(store: S) -> Router {
    Router::new()
        .route(
            "/todos",
            get(list_todos::<S>)
                .post(create_todo::<S>)
                .patch(update_todo::<S>),
        )
        .route("/todos/{id}", get(get_todo::<S>).delete(delete_todo::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Serve `store` on `listener` until the process exits.
pub async fn run<S: TodoStore>(listener: TcpListener, store: S) -> Result<(), std::io::Error> {
    serve(listener, app(store), std::future::pending()).await
}

/// Serve an already built router, finishing in-flight requests once
/// `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
}
