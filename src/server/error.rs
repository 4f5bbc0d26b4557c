use crate::libs::error::{Error, StorageError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

/// Error returned by every handler, rendered as `{"error": "<message>"}`.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            e if e.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl<E> From<E> for ApiError
where
    E: Into<Error>,
{
    fn from(e: E) -> Self {
        ApiError(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            match &self.0 {
                Error::Storage(StorageError::PartialCleanup { .. }) => error!(error = %self.0, "cleanup left data partially deleted"),
                e => error!(error = %e, "request failed"),
            }
        }
        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}
