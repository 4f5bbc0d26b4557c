use crate::libs::activity::{LogPage, LogQuery};
use crate::server::{ApiError, AppState};
use axum::{
    extract::{Query, State},
    Json,
};

const MAX_PAGE_SIZE: usize = 1000;

/// Admin listing of the activity log, newest first.
pub async fn list(State(state): State<AppState>, Query(query): Query<LogQuery>) -> Result<Json<LogPage>, ApiError> {
    let page = query.page.max(1);
    let limit = query.limit.clamp(1, MAX_PAGE_SIZE);
    let (logs, total) = state.storage.logs(LogQuery { page, limit, ..query }).await?;

    Ok(Json(LogPage {
        logs,
        total_pages: total.div_ceil(limit),
        current_page: page,
        total,
    }))
}
