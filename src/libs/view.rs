use super::{
    formatter::{format_fixed, format_hours},
    mileage::MileageView,
    priority::ScoredTask,
    report::WeeklySummary,
    savings::TimeSavingsView,
    task::Task,
    timesheet::TimesheetView,
};
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn tasks(tasks: &[Task]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "TITLE", "CUSTOMER", "ADDRESS", "PRIORITY", "DUE", "STATUS", "EST H", "ACT H"]);
        for task in tasks {
            table.add_row(row![
                task.id,
                task.title,
                task.customer_name.as_deref().unwrap_or("-"),
                task.address.as_deref().unwrap_or("-"),
                task.priority,
                task.due_date.map(|d| d.format("%Y-%m-%d %H:%M").to_string()).unwrap_or_else(|| "-".to_string()),
                task.status,
                task.estimated_hours.map(format_hours).unwrap_or_else(|| "-".to_string()),
                task.actual_hours.map(format_hours).unwrap_or_else(|| "-".to_string())
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn prioritized(tasks: &[ScoredTask]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["#", "ID", "TITLE", "PRIORITY", "DAYS LEFT", "SCORE"]);
        for (idx, scored) in tasks.iter().enumerate() {
            table.add_row(row![
                idx + 1,
                scored.task.id,
                scored.task.title,
                scored.task.priority,
                scored.days_until_due.map(|d| format_fixed(d, 1)).unwrap_or_else(|| "-".to_string()),
                format_fixed(scored.heuristic_score, 0)
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn mileage(view: &MileageView) -> Result<()> {
        let mut table = Table::new();
        table.add_row(row!["MILES", "REIMBURSEMENT", "PERIOD"]);
        table.add_row(row![view.total_miles, view.reimbursement, view.period]);
        table.printstd();

        Ok(())
    }

    pub fn timesheet(view: &TimesheetView) -> Result<()> {
        let mut table = Table::new();
        table.add_row(row!["", "HOURS", "PAY"]);
        table.add_row(row!["Regular", view.regular_hours, view.regular_pay]);
        table.add_row(row!["Overtime", view.overtime, view.overtime_pay]);
        table.add_row(row!["Total", view.total_hours, view.total_pay]);
        table.printstd();

        Ok(())
    }

    pub fn savings(view: &TimeSavingsView) -> Result<()> {
        let mut table = Table::new();
        table.add_row(row!["TIME SAVED (H)", "EFFICIENCY %"]);
        table.add_row(row![view.time_saved, view.efficiency]);
        table.printstd();
        println!("{}\n{}", view.message, view.tip);

        Ok(())
    }

    pub fn summary(summary: &WeeklySummary) -> Result<()> {
        let mut table = Table::new();
        table.add_row(row!["Week", summary.week_number]);
        table.add_row(row!["From", summary.week_start.format("%Y-%m-%d %H:%M:%S")]);
        table.add_row(row!["To", summary.week_end.format("%Y-%m-%d %H:%M:%S")]);
        table.add_row(row!["Active employees", summary.total_employees]);
        table.add_row(row!["Tasks", summary.total_tasks]);
        table.add_row(row!["Completed tasks", summary.completed_tasks]);
        table.add_row(row!["Location fixes", summary.total_locations]);
        table.add_row(row!["Log entries", summary.total_logs]);
        table.add_row(row!["Emergencies", summary.emergencies]);
        table.add_row(row!["Total miles", summary.total_mileage]);
        table.printstd();

        Ok(())
    }

    pub fn migration_history(history: &[(u32, String, String)]) -> Result<()> {
        let mut table = Table::new();
        table.add_row(row!["VERSION", "NAME", "APPLIED AT"]);
        for (version, name, applied_at) in history {
            table.add_row(row![version, name, applied_at]);
        }
        table.printstd();

        Ok(())
    }
}
