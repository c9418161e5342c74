//! Request failures and how they are written back to the client.
//!
//! # Design
//! Every failure is resolved at the handler boundary into a status code and
//! a plain-text, newline-terminated body. Nothing propagates further and
//! nothing is fatal to the process.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::model::INVALID_REQUEST;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The body was not a well-formed payload of the expected shape.
    #[error("{0}")]
    Decode(#[from] serde_json::Error),

    /// The payload decoded but carries a zero id or an empty title.
    #[error("request is not valid")]
    Invalid,

    /// The `{id}` path segment is not an integer.
    #[error("invalid todo id {0:?}")]
    BadId(String),

    #[error("{0}")]
    NotFound(StoreError),

    #[error("conflict")]
    Conflict,

    #[error("{0}")]
    Store(StoreError),

    #[error("{0}")]
    Encode(serde_json::Error),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound(err),
            StoreError::Conflict(_) => ApiError::Conflict,
            StoreError::Database(_) => ApiError::Store(err),
        }
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Decode(_) | ApiError::Invalid | ApiError::BadId(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict => StatusCode::CONFLICT,
            ApiError::Store(_) | ApiError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The exact bytes sent as the response body.
    pub fn body(&self) -> String {
        match self {
            ApiError::Invalid => INVALID_REQUEST.to_string(),
            ApiError::Conflict => String::new(),
            other => format!("{other}\n"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "request rejected");
        }

        let body = self.body();
        if body.is_empty() {
            return status.into_response();
        }

        let mut response = (status, body).into_response();
        let headers = response.headers_mut();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        headers.insert(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        );
        response
    }
}
