#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use fieldforce::db::db::Db;
    use fieldforce::libs::activity::{ActionType, LogQuery, NewActivity};
    use fieldforce::libs::audit::{self, Auditor, RequestMeta};
    use fieldforce::libs::employee::NewEmployee;
    use fieldforce::libs::error::{Error, StorageError};
    use fieldforce::libs::geo::Coordinates;
    use fieldforce::libs::location::NewLocation;
    use fieldforce::libs::storage::Storage;
    use fieldforce::libs::task::{NewTask, TaskFilter, TaskStatus};
    use fieldforce::libs::window::DateWindow;
    use test_context::{test_context, AsyncTestContext};

    struct StorageTestContext {
        db: Db,
    }

    impl AsyncTestContext for StorageTestContext {
        async fn setup() -> Self {
            StorageTestContext {
                db: Db::open_in_memory().unwrap(),
            }
        }
    }

    fn base() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_hms_opt(8, 0, 0).unwrap()
    }

    async fn fix(db: &Db, employee_id: i64, minutes: i64) {
        db.insert_location(NewLocation {
            employee_id,
            latitude: minutes as f64,
            longitude: 0.0,
            accuracy: None,
            battery_level: Some(80.0),
            timestamp: Some(base() + Duration::minutes(minutes)),
        })
        .await
        .unwrap();
    }

    #[test_context(StorageTestContext)]
    #[tokio::test]
    async fn test_employee_defaults(ctx: &mut StorageTestContext) {
        let employee = ctx.db.insert_employee(NewEmployee::new("Ana", "ana@example.com")).await.unwrap();

        assert_eq!(employee.role, "employee");
        assert_eq!(employee.hourly_rate, 25.0);
        assert!(employee.is_active);
        assert_eq!(ctx.db.employee(employee.id).await.unwrap(), Some(employee));
        assert_eq!(ctx.db.employee(404).await.unwrap(), None);
    }

    #[test_context(StorageTestContext)]
    #[tokio::test]
    async fn test_duplicate_email_is_a_constraint_error(ctx: &mut StorageTestContext) {
        ctx.db.insert_employee(NewEmployee::new("Ana", "ana@example.com")).await.unwrap();
        let err = ctx.db.insert_employee(NewEmployee::new("Ana B", "ana@example.com")).await.unwrap_err();

        assert!(matches!(err, Error::Storage(StorageError::Constraint(_))));
        assert!(err.is_client_error());
    }

    #[test_context(StorageTestContext)]
    #[tokio::test]
    async fn test_task_defaults_and_ordering(ctx: &mut StorageTestContext) {
        for (title, priority) in [("low", None), ("high", Some(3)), ("medium", Some(2))] {
            let mut task = NewTask::new(title);
            task.employee_id = Some(1);
            task.priority = priority;
            ctx.db.insert_task(task).await.unwrap();
        }

        let tasks = ctx.db.tasks(TaskFilter::ByEmployee(1)).await.unwrap();
        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();

        assert_eq!(titles, vec!["high", "medium", "low"]);
        assert_eq!(tasks[2].priority, 1);
        assert!(tasks.iter().all(|t| t.status == TaskStatus::Pending));
        assert!(ctx.db.tasks(TaskFilter::ByEmployee(2)).await.unwrap().is_empty());
    }

    #[test_context(StorageTestContext)]
    #[tokio::test]
    async fn test_update_progress(ctx: &mut StorageTestContext) {
        let mut new = NewTask::new("Install meter");
        new.employee_id = Some(1);
        new.due_date = Some(base());
        let task = ctx.db.insert_task(new).await.unwrap();

        assert!(ctx.db.update_task_progress(task.id, TaskStatus::Completed, 2.5).await.unwrap());
        assert!(!ctx.db.update_task_progress(task.id + 100, TaskStatus::Completed, 1.0).await.unwrap());

        let stored = ctx.db.task(task.id).await.unwrap().unwrap();
        assert_eq!(stored.status, TaskStatus::Completed);
        assert_eq!(stored.actual_hours, Some(2.5));
        assert_eq!(stored.due_date, Some(base()));
        assert_eq!(ctx.db.tasks(TaskFilter::PendingForEmployee(1)).await.unwrap().len(), 0);
        assert_eq!(ctx.db.tasks(TaskFilter::CompletedForEmployee(1)).await.unwrap().len(), 1);
    }

    #[test_context(StorageTestContext)]
    #[tokio::test]
    async fn test_location_orderings(ctx: &mut StorageTestContext) {
        for minutes in [30, 10, 20, 40] {
            fix(&ctx.db, 1, minutes).await;
        }
        fix(&ctx.db, 2, 15).await;

        let recent = ctx.db.recent_locations(1, 2).await.unwrap();
        let recent: Vec<f64> = recent.iter().map(|f| f.latitude).collect();
        assert_eq!(recent, vec![40.0, 30.0]);

        let window = DateWindow::new(base() + Duration::minutes(10), base() + Duration::minutes(30));
        let trail: Vec<f64> = ctx.db.employee_locations(1, window).await.unwrap().iter().map(|f| f.latitude).collect();
        assert_eq!(trail, vec![10.0, 20.0, 30.0]);

        let all: Vec<i64> = ctx.db.locations_in_window(window).await.unwrap().iter().map(|f| f.employee_id).collect();
        assert_eq!(all, vec![1, 2, 1, 1]);

        let stored = &ctx.db.recent_locations(2, 10).await.unwrap()[0];
        assert_eq!(stored.battery_level, Some(80.0));
    }

    #[test_context(StorageTestContext)]
    #[tokio::test]
    async fn test_log_paging(ctx: &mut StorageTestContext) {
        for i in 0..5 {
            let action = if i % 2 == 0 { ActionType::LocationLogged } else { ActionType::TaskCreated };
            let mut entry = NewActivity::new(action, format!("entry {}", i));
            entry.employee_id = Some(if i < 3 { 1 } else { 2 });
            entry.location = Some(Coordinates::new(1.5, -2.5));
            entry.details = Some(serde_json::json!({ "n": i }));
            entry.timestamp = Some(base() + Duration::minutes(i));
            ctx.db.insert_log(entry).await.unwrap();
        }

        let (page, total) = ctx.db.logs(LogQuery { page: 1, limit: 2, ..Default::default() }).await.unwrap();
        assert_eq!(total, 5);
        assert_eq!(page.iter().map(|l| l.description.as_str()).collect::<Vec<_>>(), vec!["entry 4", "entry 3"]);
        assert_eq!(page[0].location, Some(Coordinates::new(1.5, -2.5)));
        assert_eq!(page[0].details, Some(serde_json::json!({ "n": 4 })));

        let (last, _) = ctx.db.logs(LogQuery { page: 3, limit: 2, ..Default::default() }).await.unwrap();
        assert_eq!(last.len(), 1);
        assert_eq!(last[0].description, "entry 0");

        let (filtered, total) = ctx
            .db
            .logs(LogQuery {
                employee_id: Some(1),
                action_type: Some("location_logged".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(total, 2);
        assert!(filtered.iter().all(|l| l.action_type == ActionType::LocationLogged && l.employee_id == Some(1)));
    }

    #[test_context(StorageTestContext)]
    #[tokio::test]
    async fn test_log_page_far_past_the_end(ctx: &mut StorageTestContext) {
        ctx.db.insert_log(NewActivity::new(ActionType::SystemAction, "only entry")).await.unwrap();

        let (page, total) = ctx
            .db
            .logs(LogQuery { page: usize::MAX, limit: 100, ..Default::default() })
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert!(page.is_empty());

        let (page, _) = ctx
            .db
            .logs(LogQuery { page: 1, limit: usize::MAX, ..Default::default() })
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
    }

    #[test_context(StorageTestContext)]
    #[tokio::test]
    async fn test_audit_employee_names(ctx: &mut StorageTestContext) {
        let ana = ctx.db.insert_employee(NewEmployee::new("Ana", "ana@example.com")).await.unwrap();
        let auditor = Auditor::new(&ctx.db, RequestMeta::default());

        auditor
            .record(audit::location_logged(ana.id, Coordinates::new(1.0, 2.0), serde_json::json!({})))
            .await;
        auditor
            .record(audit::emergency_triggered(Some(ana.id), Some("Unknown"), "medical", None, None, serde_json::json!({})))
            .await;
        auditor.record(NewActivity::new(ActionType::SystemAction, "nightly sync")).await;

        let (logs, _) = ctx.db.logs(LogQuery::default()).await.unwrap();
        let names: Vec<&str> = logs.iter().rev().map(|l| l.employee_name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Unknown", "Unknown"]);
        assert_eq!(logs[1].employee_id, Some(ana.id));
    }
}
