use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use std::string::FromUtf8Error;

use crate::store::StoreError;

/// Failures that end a single request with a 500.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("malformed note id: {0}")]
    MalformedId(#[from] PathRejection),

    #[error("note body is not valid UTF-8: {0}")]
    MalformedBody(#[from] FromUtf8Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("request failed: {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}
