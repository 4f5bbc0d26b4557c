//! Route handlers, grouped by resource.

pub mod benefits;
pub mod emergency;
pub mod employees;
pub mod locations;
pub mod logs;
pub mod reports;
pub mod tasks;

use super::ApiError;
use crate::libs::error::Error;
use axum::extract::{
    rejection::{JsonRejection, PathRejection},
    Json, Path,
};

/// Unwraps a JSON body, turning a malformed one into a 400 with the usual
/// error shape.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ApiError(Error::Validation(rejection.body_text())))
}

pub(crate) fn path_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| ApiError(Error::Validation(rejection.body_text())))
}

pub async fn ping() -> &'static str {
    "Backend OK ✅"
}
