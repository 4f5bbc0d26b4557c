use super::json_body;
use crate::libs::{
    audit::{self, Auditor, RequestMeta},
    employee::NewEmployee,
};
use crate::server::{ApiError, AppState};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::{json, Value};

pub async fn register(
    State(state): State<AppState>,
    meta: RequestMeta,
    payload: Result<Json<NewEmployee>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let new_employee = json_body(payload)?;
    let details = serde_json::to_value(&new_employee).unwrap_or(Value::Null);
    let employee = state.storage.insert_employee(new_employee).await?;

    Auditor::new(state.storage.as_ref(), meta)
        .record(audit::employee_registered(employee.id, &employee.name, details))
        .await;

    Ok(Json(json!({ "id": employee.id, "message": "Employee registered successfully" })))
}
