#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use axum::Router;
    use fieldforce::db::db::Db;
    use fieldforce::libs::config::Config;
    use fieldforce::server::{router::build_router, AppState};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use test_context::{test_context, AsyncTestContext};
    use tower::util::ServiceExt;

    struct ApiTestContext {
        app: Router,
    }

    impl AsyncTestContext for ApiTestContext {
        async fn setup() -> Self {
            let db = Db::open_in_memory().unwrap();
            let state = AppState::new(Arc::new(db), &Config::default());
            ApiTestContext {
                app: build_router(state, &["http://localhost:3000".to_string()]),
            }
        }
    }

    impl ApiTestContext {
        async fn call(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
            let body = match body {
                Some(json) => Body::from(json.to_string()),
                None => Body::empty(),
            };
            let req = Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .header("x-forwarded-for", "203.0.113.9, 10.0.0.1")
                .header("user-agent", "field-app/2.1")
                .body(body)
                .unwrap();
            let resp = self.app.clone().oneshot(req).await.unwrap();
            let status = resp.status();
            let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
            (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
        }

        async fn register(&self, name: &str, email: &str) -> i64 {
            let (status, body) = self
                .call(Method::POST, "/api/register", Some(json!({ "name": name, "email": email, "hourlyRate": 40.0 })))
                .await;
            assert_eq!(status, StatusCode::OK, "{}", body);
            body["id"].as_i64().unwrap()
        }
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_register_rejects_duplicate_email(ctx: &mut ApiTestContext) {
        ctx.register("Ana", "ana@example.com").await;

        let (status, body) = ctx
            .call(Method::POST, "/api/register", Some(json!({ "name": "Other", "email": "ana@example.com" })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_malformed_bodies_are_bad_requests(ctx: &mut ApiTestContext) {
        let (status, _) = ctx.call(Method::POST, "/api/tasks", Some(json!({ "priority": 2 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = ctx.call(Method::POST, "/api/tasks", Some(json!({ "title": "  " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Task title is required");

        let (status, _) = ctx.call(Method::GET, "/api/tasks/not-a-number", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_task_lifecycle_is_audited(ctx: &mut ApiTestContext) {
        let employee_id = ctx.register("Ana", "ana@example.com").await;

        let (status, created) = ctx
            .call(
                Method::POST,
                "/api/tasks",
                Some(json!({
                    "employee_id": employee_id,
                    "title": "Repair pump",
                    "priority": 3,
                    "estimated_hours": 3.0,
                    "due_date": "2024-01-03T10:00:00.000Z",
                    "created_at": "2024-01-02T09:00:00Z"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        let task_id = created["id"].as_i64().unwrap();

        let (_, tasks) = ctx.call(Method::GET, &format!("/api/tasks/{}", employee_id), None).await;
        assert_eq!(tasks[0]["title"], "Repair pump");
        assert_eq!(tasks[0]["status"], "pending");

        let (_, ranked) = ctx.call(Method::GET, &format!("/api/prioritized-tasks/{}", employee_id), None).await;
        assert_eq!(ranked[0]["id"], task_id);
        assert_eq!(ranked[0]["heuristic_score"], 1000.0);

        let (status, _) = ctx
            .call(
                Method::POST,
                "/api/task-progress",
                Some(json!({ "task_id": task_id, "employee_id": employee_id, "action": "completed", "actual_hours": 2.0 })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let (_, sheet) = ctx
            .call(
                Method::GET,
                &format!("/api/timesheet/{}?startDate=2024-01-01&endDate=2024-01-07", employee_id),
                None,
            )
            .await;
        assert_eq!(sheet["totalHours"], "2.0");
        assert_eq!(sheet["totalPay"], "$80.00");

        let (_, savings) = ctx.call(Method::GET, &format!("/api/time-savings/{}", employee_id), None).await;
        assert_eq!(savings["timeSaved"], "1.0");

        let (_, page) = ctx.call(Method::GET, "/api/logs?limit=10", None).await;
        assert_eq!(page["total"], 3);
        let newest = &page["logs"][0];
        assert_eq!(newest["action_type"], "task_updated");
        assert_eq!(newest["employee_name"], "Ana");
        assert_eq!(newest["task_title"], "Repair pump");
        assert_eq!(newest["ip_address"], "203.0.113.9");
        assert_eq!(newest["device_info"], "field-app/2.1");
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_locations_and_mileage(ctx: &mut ApiTestContext) {
        let employee_id = ctx.register("Ben", "ben@example.com").await;
        for (lat, ts) in [(0.0, "2024-01-02T09:00:00"), (1.0, "2024-01-02T10:00:00")] {
            let (status, _) = ctx
                .call(
                    Method::POST,
                    "/api/location",
                    Some(json!({ "employee_id": employee_id, "latitude": lat, "longitude": 0.0, "timestamp": ts })),
                )
                .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (_, recent) = ctx.call(Method::GET, &format!("/api/location/{}", employee_id), None).await;
        assert_eq!(recent.as_array().unwrap().len(), 2);
        assert_eq!(recent[0]["latitude"], 1.0);

        let (status, mileage) = ctx
            .call(
                Method::GET,
                &format!("/api/mileage/{}?startDate=2024-01-01&endDate=2024-01-07", employee_id),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(mileage["totalMiles"], "69.09");
        assert_eq!(mileage["reimbursement"], "$46.29");
        assert_eq!(mileage["period"], "2024-01-01 to 2024-01-07");

        let (status, reversed) = ctx
            .call(
                Method::GET,
                &format!("/api/mileage/{}?startDate=2024-01-07T12:00:00&endDate=2024-01-07", employee_id),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(reversed["totalMiles"], "0.00");
        assert_eq!(reversed["reimbursement"], "$0.00");
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_emergency_and_contacts(ctx: &mut ApiTestContext) {
        let (status, body) = ctx
            .call(
                Method::POST,
                "/api/emergency",
                Some(json!({
                    "employee_id": 1,
                    "employee_name": "Ana",
                    "emergency_type": "medical",
                    "location": { "lat": 40.0, "lng": -74.0 },
                    "message": "Ladder fall"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["emergency"]["status"], "active");

        let (_, contacts) = ctx.call(Method::GET, "/api/emergency-contacts", None).await;
        assert_eq!(contacts.as_array().unwrap().len(), 4);

        let (_, page) = ctx.call(Method::GET, "/api/logs?action_type=emergency_triggered", None).await;
        assert_eq!(page["total"], 1);
        assert_eq!(page["logs"][0]["description"], "EMERGENCY: medical - Ladder fall");
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_weekly_report_then_cleanup(ctx: &mut ApiTestContext) {
        let (status, _) = ctx
            .call(
                Method::POST,
                "/api/tasks",
                Some(json!({ "title": "Done", "status": "completed", "created_at": "2024-01-07T23:59:59.999" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, report) = ctx
            .call(Method::GET, "/api/export/weekly-report?week_start=2024-01-01&week_end=2024-01-07", None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["weekly_report"]["week_number"], "Week-01-2024");
        assert_eq!(report["weekly_report"]["completed_tasks"], 1);
        assert_eq!(report["files"].as_object().unwrap().len(), 6);
        assert_eq!(report["message"], "Weekly report generated successfully");

        let (status, _) = ctx
            .call(Method::GET, "/api/export/weekly-report?week_start=2024-01-01", None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, reversed) = ctx
            .call(Method::GET, "/api/export/weekly-report?week_start=2024-01-08&week_end=2024-01-07", None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(reversed["weekly_report"]["total_tasks"], 0);

        let (status, untouched) = ctx
            .call(
                Method::POST,
                "/api/cleanup/weekly-data",
                Some(json!({ "week_start": "2024-01-08", "week_end": "2024-01-07", "backup_confirmed": true })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(untouched["deleted"]["tasks"], 0);

        let (status, cleaned) = ctx
            .call(
                Method::POST,
                "/api/cleanup/weekly-data",
                Some(json!({ "week_start": "2024-01-01", "week_end": "2024-01-07", "backup_confirmed": true })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cleaned["deleted"]["tasks"], 1);

        let (_, page) = ctx.call(Method::GET, "/api/logs?action_type=weekly_data_cleaned", None).await;
        assert_eq!(page["total"], 2);
    }

    #[test_context(ApiTestContext)]
    #[tokio::test]
    async fn test_log_pages(ctx: &mut ApiTestContext) {
        for i in 0..3 {
            ctx.register(&format!("E{}", i), &format!("e{}@example.com", i)).await;
        }

        let (status, page) = ctx.call(Method::GET, "/api/logs?page=2&limit=2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["totalPages"], 2);
        assert_eq!(page["currentPage"], 2);
        assert_eq!(page["logs"].as_array().unwrap().len(), 1);

        let (_, clamped) = ctx.call(Method::GET, "/api/logs?page=0&limit=0", None).await;
        assert_eq!(clamped["currentPage"], 1);
        assert_eq!(clamped["totalPages"], 3);

        let (status, far) = ctx.call(Method::GET, "/api/logs?page=1000000000000000000&limit=100", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(far["logs"].as_array().unwrap().is_empty());
        assert_eq!(far["total"], 3);
    }
}
