use super::json_body;
use crate::libs::{
    audit::{self, Auditor, RequestMeta},
    emergency::{EmergencyContact, NewEmergency},
};
use crate::server::{ApiError, AppState};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::{json, Value};
use tracing::warn;

pub async fn trigger(
    State(state): State<AppState>,
    meta: RequestMeta,
    payload: Result<Json<NewEmergency>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let new_emergency = json_body(payload)?;
    let details = serde_json::to_value(&new_emergency).unwrap_or(Value::Null);
    let emergency = state.storage.insert_emergency(new_emergency).await?;
    warn!(
        id = emergency.id,
        employee_id = ?emergency.employee_id,
        kind = %emergency.emergency_type,
        "emergency alert raised"
    );

    Auditor::new(state.storage.as_ref(), meta)
        .record(audit::emergency_triggered(
            emergency.employee_id,
            emergency.employee_name.as_deref(),
            &emergency.emergency_type,
            emergency.message.as_deref(),
            emergency.location,
            details,
        ))
        .await;

    Ok(Json(json!({
        "success": true,
        "message": "Emergency alert sent! Help is on the way.",
        "emergency": emergency,
    })))
}

pub async fn contacts(State(state): State<AppState>) -> Json<Vec<EmergencyContact>> {
    Json(state.contacts.as_ref().clone())
}
