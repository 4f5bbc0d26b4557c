use super::{json_body, path_id};
use crate::libs::{
    audit::{self, Auditor, RequestMeta},
    geo::Coordinates,
    location::{LocationFix, NewLocation},
};
use crate::server::{ApiError, AppState};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde_json::{json, Value};

/// Fixes returned by the history endpoint.
pub const RECENT_LIMIT: usize = 50;

pub async fn log(
    State(state): State<AppState>,
    meta: RequestMeta,
    payload: Result<Json<NewLocation>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let new_location = json_body(payload)?;
    let details = serde_json::to_value(&new_location).unwrap_or(Value::Null);
    let fix = state.storage.insert_location(new_location).await?;

    Auditor::new(state.storage.as_ref(), meta)
        .record(audit::location_logged(
            fix.employee_id,
            Coordinates::new(fix.latitude, fix.longitude),
            details,
        ))
        .await;

    Ok(Json(json!({ "id": fix.id, "message": "Location logged successfully" })))
}

pub async fn recent(
    State(state): State<AppState>,
    employee_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<LocationFix>>, ApiError> {
    let employee_id = path_id(employee_id)?;
    Ok(Json(state.storage.recent_locations(employee_id, RECENT_LIMIT).await?))
}
