use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

use strata_store::StoreError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("invalid blob id: {0}")]
    InvalidBlobId(String),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("delete is disabled on this server")]
    DeleteDisabled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            ServerError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            ServerError::Store(StoreError::InvalidRange { .. })
            | ServerError::Store(StoreError::InvalidToken(_))
            | ServerError::InvalidBlobId(_)
            | ServerError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ServerError::DeleteDisabled => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
