//! Typed client for the todo HTTP API that performs no I/O of its own.
//!
//! `TodoClient::build_*` turns typed input into an [`HttpRequest`]; the host
//! sends it with any HTTP stack and hands the reply to the matching
//! `TodoClient::parse_*`, which checks the status and decodes the body.
//! Payload types are declared here rather than shared with `todo-server`,
//! and the live-server integration test keeps the two in step.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::TodoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{CreateTodo, Todo, UpdateTodo};
