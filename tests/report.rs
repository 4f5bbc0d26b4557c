#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveDateTime};
    use fieldforce::db::db::Db;
    use fieldforce::libs::activity::{ActionType, ActivityLog, LogQuery, NewActivity};
    use fieldforce::libs::emergency::{Emergency, NewEmergency};
    use fieldforce::libs::employee::{Employee, NewEmployee};
    use fieldforce::libs::error::{Error, Result, StorageError};
    use fieldforce::libs::location::{LocationFix, NewLocation};
    use fieldforce::libs::report::WeeklyReportBuilder;
    use fieldforce::libs::storage::Storage;
    use fieldforce::libs::task::{NewTask, Task, TaskFilter, TaskStatus};
    use fieldforce::libs::window::DateWindow;
    use test_context::{test_context, AsyncTestContext};

    struct ReportTestContext {
        db: Db,
    }

    impl AsyncTestContext for ReportTestContext {
        async fn setup() -> Self {
            ReportTestContext {
                db: Db::open_in_memory().unwrap(),
            }
        }
    }

    fn at(day: u32, h: u32, m: u32, s: u32, ms: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap().and_hms_milli_opt(h, m, s, ms).unwrap()
    }

    async fn task(db: &Db, created_at: NaiveDateTime, status: TaskStatus) {
        let mut new = NewTask::new("Meter reading");
        new.employee_id = Some(1);
        new.status = Some(status);
        new.created_at = Some(created_at);
        db.insert_task(new).await.unwrap();
    }

    async fn fix(db: &Db, employee_id: i64, lat: f64, timestamp: NaiveDateTime) {
        db.insert_location(NewLocation {
            employee_id,
            latitude: lat,
            longitude: 0.0,
            accuracy: Some(5.0),
            battery_level: None,
            timestamp: Some(timestamp),
        })
        .await
        .unwrap();
    }

    #[test_context(ReportTestContext)]
    #[tokio::test]
    async fn test_empty_week(ctx: &mut ReportTestContext) {
        let report = WeeklyReportBuilder::new(&ctx.db).build(Some("2024-01-01"), Some("2024-01-07")).await.unwrap();

        assert_eq!(report.summary.week_number, "Week-01-2024");
        assert_eq!(report.summary.total_tasks, 0);
        assert_eq!(report.summary.total_mileage, "0.00");
        assert_eq!(report.files.len(), 6);
        for (name, csv) in &report.files {
            if name != "summary" {
                assert_eq!(csv.lines().count(), 1, "{} should be header only", name);
            }
        }
        assert_eq!(report.files["summary"].lines().count(), 2);
    }

    #[test_context(ReportTestContext)]
    #[tokio::test]
    async fn test_end_of_day_is_included(ctx: &mut ReportTestContext) {
        task(&ctx.db, at(7, 23, 59, 59, 999), TaskStatus::Completed).await;
        task(&ctx.db, at(8, 0, 0, 0, 0), TaskStatus::Completed).await;
        task(&ctx.db, at(1, 0, 0, 0, 0), TaskStatus::Pending).await;

        let report = WeeklyReportBuilder::new(&ctx.db).build(Some("2024-01-01"), Some("2024-01-07")).await.unwrap();

        assert_eq!(report.summary.week_end, at(7, 23, 59, 59, 999));
        assert_eq!(report.summary.total_tasks, 2);
        assert_eq!(report.summary.completed_tasks, 1);
        assert_eq!(report.files["tasks"].lines().count(), 3);
    }

    #[test_context(ReportTestContext)]
    #[tokio::test]
    async fn test_counts_every_collection(ctx: &mut ReportTestContext) {
        ctx.db.insert_employee(NewEmployee::new("Ana", "ana@example.com")).await.unwrap();
        ctx.db.insert_employee(NewEmployee::new("Ben", "ben@example.com")).await.unwrap();
        ctx.db.insert_employee(NewEmployee::new("Cy", "cy@example.com").inactive()).await.unwrap();

        fix(&ctx.db, 1, 0.0, at(2, 9, 0, 0, 0)).await;
        fix(&ctx.db, 1, 1.0, at(2, 10, 0, 0, 0)).await;
        fix(&ctx.db, 1, 9.0, at(9, 10, 0, 0, 0)).await;

        let mut log = NewActivity::new(ActionType::SystemAction, "nightly sync");
        log.timestamp = Some(at(3, 1, 0, 0, 0));
        ctx.db.insert_log(log).await.unwrap();

        ctx.db
            .insert_emergency(NewEmergency {
                employee_id: Some(1),
                employee_name: Some("Ana".to_string()),
                emergency_type: "medical".to_string(),
                location: None,
                message: Some("Fall on site".to_string()),
                created_at: Some(at(4, 12, 0, 0, 0)),
            })
            .await
            .unwrap();

        let report = WeeklyReportBuilder::new(&ctx.db).build(Some("2024-01-01"), Some("2024-01-07")).await.unwrap();
        let s = &report.summary;

        assert_eq!(s.total_employees, 2);
        assert_eq!(s.total_locations, 2);
        assert_eq!(s.total_logs, 1);
        assert_eq!(s.emergencies, 1);
        assert_eq!(s.total_mileage, "69.09");
        assert!(report.files["emergencies"].contains("Fall on site"));
    }

    #[test_context(ReportTestContext)]
    #[tokio::test]
    async fn test_mileage_bundles_all_employees(ctx: &mut ReportTestContext) {
        // Two employees standing still, interleaved in time
        fix(&ctx.db, 1, 0.0, at(2, 9, 0, 0, 0)).await;
        fix(&ctx.db, 2, 1.0, at(2, 9, 5, 0, 0)).await;
        fix(&ctx.db, 1, 0.0, at(2, 9, 10, 0, 0)).await;

        let report = WeeklyReportBuilder::new(&ctx.db).build(Some("2024-01-01"), Some("2024-01-07")).await.unwrap();

        assert_eq!(report.summary.total_mileage, "138.19");
    }

    #[test_context(ReportTestContext)]
    #[tokio::test]
    async fn test_invalid_dates_fail_before_reading(ctx: &mut ReportTestContext) {
        let err = WeeklyReportBuilder::new(&ctx.db).build(Some("2024-01-01"), None).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    /// Delegates to a real database but cannot read the activity log.
    struct LogsUnreadable {
        inner: Db,
    }

    #[async_trait]
    impl Storage for LogsUnreadable {
        async fn insert_employee(&self, employee: NewEmployee) -> Result<Employee> {
            self.inner.insert_employee(employee).await
        }
        async fn employee(&self, id: i64) -> Result<Option<Employee>> {
            self.inner.employee(id).await
        }
        async fn active_employees(&self) -> Result<Vec<Employee>> {
            self.inner.active_employees().await
        }
        async fn insert_task(&self, task: NewTask) -> Result<Task> {
            self.inner.insert_task(task).await
        }
        async fn task(&self, id: i64) -> Result<Option<Task>> {
            self.inner.task(id).await
        }
        async fn tasks(&self, filter: TaskFilter) -> Result<Vec<Task>> {
            self.inner.tasks(filter).await
        }
        async fn tasks_in_window(&self, window: DateWindow) -> Result<Vec<Task>> {
            self.inner.tasks_in_window(window).await
        }
        async fn completed_tasks_in_window(&self, employee_id: i64, window: DateWindow) -> Result<Vec<Task>> {
            self.inner.completed_tasks_in_window(employee_id, window).await
        }
        async fn update_task_progress(&self, task_id: i64, status: TaskStatus, actual_hours: f64) -> Result<bool> {
            self.inner.update_task_progress(task_id, status, actual_hours).await
        }
        async fn delete_completed_tasks(&self, window: DateWindow) -> Result<usize> {
            self.inner.delete_completed_tasks(window).await
        }
        async fn insert_location(&self, location: NewLocation) -> Result<LocationFix> {
            self.inner.insert_location(location).await
        }
        async fn employee_locations(&self, employee_id: i64, window: DateWindow) -> Result<Vec<LocationFix>> {
            self.inner.employee_locations(employee_id, window).await
        }
        async fn recent_locations(&self, employee_id: i64, limit: usize) -> Result<Vec<LocationFix>> {
            self.inner.recent_locations(employee_id, limit).await
        }
        async fn locations_in_window(&self, window: DateWindow) -> Result<Vec<LocationFix>> {
            self.inner.locations_in_window(window).await
        }
        async fn delete_locations(&self, window: DateWindow) -> Result<usize> {
            self.inner.delete_locations(window).await
        }
        async fn insert_log(&self, entry: NewActivity) -> Result<ActivityLog> {
            self.inner.insert_log(entry).await
        }
        async fn logs_in_window(&self, _window: DateWindow) -> Result<Vec<ActivityLog>> {
            Err(Error::Storage(StorageError::Worker("logs table is unreadable".to_string())))
        }
        async fn logs(&self, query: LogQuery) -> Result<(Vec<ActivityLog>, usize)> {
            self.inner.logs(query).await
        }
        async fn delete_logs(&self, window: DateWindow) -> Result<usize> {
            self.inner.delete_logs(window).await
        }
        async fn insert_emergency(&self, emergency: NewEmergency) -> Result<Emergency> {
            self.inner.insert_emergency(emergency).await
        }
        async fn emergencies_in_window(&self, window: DateWindow) -> Result<Vec<Emergency>> {
            self.inner.emergencies_in_window(window).await
        }
    }

    #[test_context(ReportTestContext)]
    #[tokio::test]
    async fn test_one_failed_read_fails_the_report(ctx: &mut ReportTestContext) {
        task(&ctx.db, at(2, 9, 0, 0, 0), TaskStatus::Completed).await;
        fix(&ctx.db, 1, 0.0, at(2, 9, 0, 0, 0)).await;

        let storage = LogsUnreadable { inner: ctx.db.clone() };
        let err = WeeklyReportBuilder::new(&storage)
            .build(Some("2024-01-01"), Some("2024-01-07"))
            .await
            .unwrap_err();

        match err {
            Error::Storage(StorageError::Worker(msg)) => assert_eq!(msg, "logs table is unreadable"),
            other => panic!("expected the log read failure, got {:?}", other),
        }
    }
}
