use super::json_body;
use crate::libs::{
    audit::{self, Auditor, RequestMeta},
    cleanup::{CleanupCoordinator, DeletedCounts},
    report::{WeeklyReport, WeeklyReportBuilder},
};
use crate::server::{ApiError, AppState};
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct WeekQuery {
    pub week_start: Option<String>,
    pub week_end: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WeeklyReportResponse {
    #[serde(flatten)]
    pub report: WeeklyReport,
    pub message: &'static str,
}

/// Builds the weekly report. Read-only, so it is not audited.
pub async fn weekly_report(
    State(state): State<AppState>,
    Query(week): Query<WeekQuery>,
) -> Result<Json<WeeklyReportResponse>, ApiError> {
    let report = WeeklyReportBuilder::new(state.storage.as_ref())
        .build(week.week_start.as_deref(), week.week_end.as_deref())
        .await?;

    Ok(Json(WeeklyReportResponse {
        report,
        message: "Weekly report generated successfully",
    }))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CleanupRequest {
    #[serde(default)]
    pub week_start: Option<String>,
    #[serde(default)]
    pub week_end: Option<String>,
    #[serde(default)]
    pub backup_confirmed: bool,
}

#[derive(Debug, Serialize)]
pub struct CleanupResponse {
    pub message: &'static str,
    pub deleted: DeletedCounts,
}

pub async fn cleanup(
    State(state): State<AppState>,
    meta: RequestMeta,
    payload: Result<Json<CleanupRequest>, JsonRejection>,
) -> Result<Json<CleanupResponse>, ApiError> {
    let request = json_body(payload)?;
    let deleted = CleanupCoordinator::new(state.storage.as_ref())
        .cleanup(request.week_start.as_deref(), request.week_end.as_deref(), request.backup_confirmed)
        .await?;

    Auditor::new(state.storage.as_ref(), meta)
        .record(audit::weekly_data_cleaned(
            request.week_start.as_deref().unwrap_or_default(),
            request.week_end.as_deref().unwrap_or_default(),
            &deleted,
        ))
        .await;

    Ok(Json(CleanupResponse {
        message: "Weekly data cleanup completed",
        deleted,
    }))
}
