#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use fieldforce::db::db::Db;
    use fieldforce::libs::benefits;
    use fieldforce::libs::employee::NewEmployee;
    use fieldforce::libs::location::NewLocation;
    use fieldforce::libs::savings::{self, TimeSavingsView};
    use fieldforce::libs::storage::Storage;
    use fieldforce::libs::task::{NewTask, Task, TaskStatus};
    use fieldforce::libs::timesheet::{self, TimesheetView};
    use fieldforce::libs::window::DateWindow;
    use test_context::{test_context, AsyncTestContext};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    fn task(estimated: Option<f64>, actual: Option<f64>) -> Task {
        Task {
            id: 1,
            employee_id: Some(1),
            title: "Replace boiler valve".to_string(),
            description: None,
            customer_name: None,
            customer_phone: None,
            address: None,
            priority: 1,
            due_date: None,
            status: TaskStatus::Completed,
            estimated_hours: estimated,
            actual_hours: actual,
            created_at: at(2, 9),
        }
    }

    fn week() -> DateWindow {
        DateWindow::parse(Some("2024-01-01"), Some("2024-01-07")).unwrap()
    }

    #[test]
    fn test_timesheet_without_overtime() {
        let sheet = timesheet::calculate(&[task(None, Some(6.0)), task(None, Some(2.5))], 20.0, week());

        assert_eq!(sheet.total_hours, 8.5);
        assert_eq!(sheet.overtime, 0.0);
        assert_eq!(sheet.total_pay, 170.0);
    }

    #[test]
    fn test_timesheet_splits_overtime() {
        let sheet = timesheet::calculate(&[task(None, Some(30.0)), task(None, Some(15.0)), task(None, None)], 20.0, week());
        let view = TimesheetView::from(&sheet);

        assert_eq!(sheet.regular_hours, 40.0);
        assert_eq!(sheet.overtime, 5.0);
        assert_eq!(view.total_hours, "45.0");
        assert_eq!(view.regular_pay, "$800.00");
        assert_eq!(view.overtime_pay, "$150.00");
        assert_eq!(view.total_pay, "$950.00");
        assert_eq!(view.period, "2024-01-01 to 2024-01-07");
    }

    #[test]
    fn test_savings_counts_missing_estimate_as_one_hour() {
        let s = savings::estimate(&[task(Some(4.0), Some(3.0)), task(None, Some(0.5))]);
        let view = TimeSavingsView::from(&s);

        assert_eq!(s.estimated_hours, 5.0);
        assert_eq!(s.actual_hours, 3.5);
        assert_eq!(view.time_saved, "1.5");
        assert_eq!(view.efficiency, "142.9");
        assert_eq!(view.message, "You saved 1.5 hours compared to the estimates!");
    }

    #[test]
    fn test_savings_from_totals() {
        let s = savings::from_totals(10.0, 8.0);
        assert_eq!(s.time_saved, 2.0);
        assert_eq!(s.efficiency_percent, 125.0);

        let idle = savings::from_totals(10.0, 0.0);
        assert_eq!(idle.efficiency_percent, 0.0);
        assert_eq!(TimeSavingsView::from(&idle).time_saved, "10.0");
    }

    #[test]
    fn test_savings_clamps_overruns() {
        let s = savings::estimate(&[task(Some(2.0), Some(3.0))]);
        let view = TimeSavingsView::from(&s);

        assert_eq!(s.time_saved, 0.0);
        assert_eq!(view.time_saved, "0.0");
        assert_eq!(view.message, "Keep tracking for time savings insights!");
    }

    #[test]
    fn test_savings_without_actual_hours() {
        let s = savings::estimate(&[task(Some(2.0), None)]);

        assert_eq!(s.efficiency_percent, 0.0);
        assert_eq!(TimeSavingsView::from(&s).efficiency, "0");
    }

    struct BenefitsTestContext {
        db: Db,
        employee_id: i64,
    }

    impl AsyncTestContext for BenefitsTestContext {
        async fn setup() -> Self {
            let db = Db::open_in_memory().unwrap();
            let employee = db
                .insert_employee(NewEmployee::new("Dana Field", "dana@example.com").with_rate(30.0))
                .await
                .unwrap();
            BenefitsTestContext {
                db,
                employee_id: employee.id,
            }
        }
    }

    async fn completed_task(db: &Db, employee_id: i64, created_at: NaiveDateTime, hours: f64) {
        let mut new = NewTask::new("Inspection");
        new.employee_id = Some(employee_id);
        new.status = Some(TaskStatus::Completed);
        new.actual_hours = Some(hours);
        new.estimated_hours = Some(hours + 1.0);
        new.created_at = Some(created_at);
        db.insert_task(new).await.unwrap();
    }

    #[test_context(BenefitsTestContext)]
    #[tokio::test]
    async fn test_timesheet_reads_only_completed_in_window(ctx: &mut BenefitsTestContext) {
        completed_task(&ctx.db, ctx.employee_id, at(2, 9), 10.0).await;
        completed_task(&ctx.db, ctx.employee_id, at(9, 9), 50.0).await;
        let mut pending = NewTask::new("Pending visit");
        pending.employee_id = Some(ctx.employee_id);
        pending.actual_hours = Some(8.0);
        pending.created_at = Some(at(3, 9));
        ctx.db.insert_task(pending).await.unwrap();

        let sheet = benefits::timesheet(&ctx.db, ctx.employee_id, week()).await.unwrap();

        assert_eq!(sheet.total_hours, 10.0);
        assert_eq!(sheet.hourly_rate, 30.0);
        assert_eq!(sheet.total_pay, 300.0);
    }

    #[test_context(BenefitsTestContext)]
    #[tokio::test]
    async fn test_timesheet_for_unknown_employee_uses_default_rate(ctx: &mut BenefitsTestContext) {
        completed_task(&ctx.db, 999, at(2, 9), 2.0).await;

        let sheet = benefits::timesheet(&ctx.db, 999, week()).await.unwrap();

        assert_eq!(sheet.hourly_rate, 25.0);
        assert_eq!(sheet.total_pay, 50.0);
    }

    #[test_context(BenefitsTestContext)]
    #[tokio::test]
    async fn test_mileage_reads_window_in_time_order(ctx: &mut BenefitsTestContext) {
        // Inserted out of order; the read sorts by timestamp
        for (lat, hour) in [(2.0, 11), (0.0, 9), (1.0, 10), (50.0, 12)] {
            let day = if lat == 50.0 { 8 } else { 2 };
            ctx.db
                .insert_location(NewLocation {
                    employee_id: ctx.employee_id,
                    latitude: lat,
                    longitude: 0.0,
                    accuracy: None,
                    battery_level: None,
                    timestamp: Some(at(day, hour)),
                })
                .await
                .unwrap();
        }

        let m = benefits::mileage(&ctx.db, ctx.employee_id, week()).await.unwrap();

        assert_eq!(m.total_miles_display(), "138.19");
    }

    #[test_context(BenefitsTestContext)]
    #[tokio::test]
    async fn test_time_savings_ignores_dates(ctx: &mut BenefitsTestContext) {
        completed_task(&ctx.db, ctx.employee_id, at(2, 9), 3.0).await;
        completed_task(&ctx.db, ctx.employee_id, at(20, 9), 1.0).await;

        let s = benefits::time_savings(&ctx.db, ctx.employee_id).await.unwrap();

        assert_eq!(s.estimated_hours, 6.0);
        assert_eq!(s.actual_hours, 4.0);
        assert_eq!(s.time_saved, 2.0);
    }
}
