//! The five todo endpoints.
//!
//! Handlers own no state between requests. Each one decodes and validates
//! its input before touching the store, so a rejected request never writes.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::model::{CreateTodo, TodoId, UpdateTodo};
use crate::store::{StoreError, TodoStore};

const JSON_INDENT: &[u8] = b"    ";

/// `GET /todos`
pub async fn list_todos<S: TodoStore>(State(store): State<S>) -> Result<Response, ApiError> {
    let todos = store.find_all().await?;
    tracing::debug!(count = todos.len(), "listed todos");
    json_response(StatusCode::OK, &todos)
}

/// `POST /todos`
///
/// The existence check is only a fast path. A concurrent create of the same
/// id that slips past it is caught by the store and still answered with 409.
pub async fn create_todo<S: TodoStore>(
    State(store): State<S>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let input: CreateTodo = decode_object(&body)?;
    if !input.is_valid() {
        return Err(ApiError::Invalid);
    }

    match store.find_by_id(input.id).await {
        Ok(_) => return Err(ApiError::Conflict),
        Err(StoreError::NotFound(_)) => {}
        Err(err) => return Err(err.into()),
    }

    let item = input.into_item();
    store.create(&item).await?;
    tracing::debug!(id = item.id, "created todo");
    json_response(StatusCode::CREATED, &item)
}

/// `PATCH /todos`
///
/// Answers 201 rather than 200 on success; existing clients depend on it.
pub async fn update_todo<S: TodoStore>(
    State(store): State<S>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let input: UpdateTodo = decode_object(&body)?;
    if !input.is_valid() {
        return Err(ApiError::Invalid);
    }

    let mut item = store.find_by_id(input.id).await?;
    input.apply_to(&mut item);
    store.save(&item).await?;
    tracing::debug!(id = item.id, completed = item.completed, "updated todo");
    json_response(StatusCode::CREATED, &item)
}

/// `GET /todos/{id}`
pub async fn get_todo<S: TodoStore>(
    State(store): State<S>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let item = store.find_by_id(id).await?;
    json_response(StatusCode::OK, &item)
}

/// `DELETE /todos/{id}`
pub async fn delete_todo<S: TodoStore>(
    State(store): State<S>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let item = store.find_by_id(id).await?;
    store.delete(&item).await?;
    tracing::debug!(id, "deleted todo");
    Ok(StatusCode::OK.into_response())
}

/// Decode a payload that must be a JSON object. Derived struct visitors also
/// accept the positional array form, which bypasses `deny_unknown_fields`.
fn decode_object<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice::<Map<String, Value>>(body)?;
    Ok(serde_json::from_slice(body)?)
}

fn parse_id(raw: &str) -> Result<TodoId, ApiError> {
    raw.parse().map_err(|_| ApiError::BadId(raw.to_string()))
}

/// Serialize `value` as four-space indented JSON.
fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Result<Response, ApiError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer).map_err(ApiError::Encode)?;

    let mut response = (status, buf).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    Ok(response)
}
