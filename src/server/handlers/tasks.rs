use super::{json_body, path_id};
use crate::libs::{
    audit::{self, Auditor, RequestMeta},
    error::Error,
    geo::Coordinates,
    priority::{self, ScoredTask, DEFAULT_LIMIT},
    task::{NewTask, Task, TaskFilter, TaskProgress},
    window,
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

pub async fn create(
    State(state): State<AppState>,
    meta: RequestMeta,
    payload: Result<Json<NewTask>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let new_task = json_body(payload)?;
    if new_task.title.trim().is_empty() {
        return Err(Error::Validation("Task title is required".to_string()).into());
    }
    let details = serde_json::to_value(&new_task).unwrap_or(Value::Null);
    let task = state.storage.insert_task(new_task).await?;

    Auditor::new(state.storage.as_ref(), meta)
        .record(audit::task_created(task.employee_id, task.id, &task.title, details))
        .await;

    Ok(Json(json!({ "id": task.id, "message": "Task created successfully" })))
}

pub async fn list(State(state): State<AppState>, employee_id: Result<Path<i64>, PathRejection>) -> Result<Json<Vec<Task>>, ApiError> {
    let employee_id = path_id(employee_id)?;
    Ok(Json(state.storage.tasks(TaskFilter::ByEmployee(employee_id)).await?))
}

/// Pending tasks ranked by the urgency heuristic, best five first.
pub async fn prioritized(
    State(state): State<AppState>,
    employee_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<ScoredTask>>, ApiError> {
    let employee_id = path_id(employee_id)?;
    let pending = state.storage.tasks(TaskFilter::PendingForEmployee(employee_id)).await?;

    let ranked = {
        let mut rng = rand::thread_rng();
        priority::prioritize(pending, window::now(), &mut rng, DEFAULT_LIMIT)
    };
    Ok(Json(ranked))
}

pub async fn progress(
    State(state): State<AppState>,
    meta: RequestMeta,
    payload: Result<Json<TaskProgress>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let progress = json_body(payload)?;
    let details = serde_json::to_value(&progress).unwrap_or(Value::Null);

    let updated = state
        .storage
        .update_task_progress(progress.task_id, progress.action, progress.actual_hours.unwrap_or(0.0))
        .await?;
    if !updated {
        return Err(Error::NotFound(format!("Task {} not found", progress.task_id)).into());
    }

    let location = progress.location_lat.zip(progress.location_lng).map(|(lat, lng)| Coordinates::new(lat, lng));
    Auditor::new(state.storage.as_ref(), meta)
        .record(audit::task_updated(progress.employee_id, progress.task_id, progress.action, location, details))
        .await;

    Ok(Json(json!({ "message": "Task progress updated successfully" })))
}
