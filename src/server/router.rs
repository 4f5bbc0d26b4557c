use axum::{
    body::Body,
    http::{header, HeaderValue, Method, Request},
    middleware::{self, Next},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use super::handlers::{self, benefits, emergency, employees, locations, logs, reports, tasks};
use super::AppState;

fn build_cors(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let api = Router::new()
        .route("/api/register", post(employees::register))
        .route("/api/tasks", post(tasks::create))
        .route("/api/tasks/{employee_id}", get(tasks::list))
        .route("/api/prioritized-tasks/{employee_id}", get(tasks::prioritized))
        .route("/api/task-progress", post(tasks::progress))
        .route("/api/location", post(locations::log))
        .route("/api/location/{employee_id}", get(locations::recent))
        .route("/api/emergency", post(emergency::trigger))
        .route("/api/emergency-contacts", get(emergency::contacts))
        .route("/api/mileage/{employee_id}", get(benefits::mileage))
        .route("/api/timesheet/{employee_id}", get(benefits::timesheet))
        .route("/api/time-savings/{employee_id}", get(benefits::time_savings))
        .route("/api/export/weekly-report", get(reports::weekly_report))
        .route("/api/cleanup/weekly-data", post(reports::cleanup))
        .route("/api/logs", get(logs::list))
        .route("/ping", get(handlers::ping));

    api.layer(middleware::from_fn(security_headers))
        .layer(build_cors(cors_origins))
        .with_state(state)
}

async fn security_headers(req: Request<Body>, next: Next) -> axum::response::Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();
    headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(header::REFERRER_POLICY, HeaderValue::from_static("no-referrer"));
    response
}
