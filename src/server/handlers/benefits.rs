use super::path_id;
use crate::libs::{
    benefits,
    mileage::MileageView,
    savings::TimeSavingsView,
    timesheet::TimesheetView,
    window::DateWindow,
};
use crate::server::{ApiError, AppState};
use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    Json,
};
use serde::Deserialize;

/// `?startDate=...&endDate=...`, both required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl PeriodQuery {
    fn window(&self) -> Result<DateWindow, ApiError> {
        Ok(DateWindow::parse(self.start_date.as_deref(), self.end_date.as_deref())?)
    }
}

pub async fn mileage(
    State(state): State<AppState>,
    employee_id: Result<Path<i64>, PathRejection>,
    Query(period): Query<PeriodQuery>,
) -> Result<Json<MileageView>, ApiError> {
    let employee_id = path_id(employee_id)?;
    let mileage = benefits::mileage(state.storage.as_ref(), employee_id, period.window()?).await?;
    Ok(Json(MileageView::from(&mileage)))
}

pub async fn timesheet(
    State(state): State<AppState>,
    employee_id: Result<Path<i64>, PathRejection>,
    Query(period): Query<PeriodQuery>,
) -> Result<Json<TimesheetView>, ApiError> {
    let employee_id = path_id(employee_id)?;
    let timesheet = benefits::timesheet(state.storage.as_ref(), employee_id, period.window()?).await?;
    Ok(Json(TimesheetView::from(&timesheet)))
}

pub async fn time_savings(
    State(state): State<AppState>,
    employee_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<TimeSavingsView>, ApiError> {
    let employee_id = path_id(employee_id)?;
    let savings = benefits::time_savings(state.storage.as_ref(), employee_id).await?;
    Ok(Json(TimeSavingsView::from(&savings)))
}
