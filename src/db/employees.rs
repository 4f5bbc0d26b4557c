use crate::libs::employee::{Employee, NewEmployee, DEFAULT_HOURLY_RATE, DEFAULT_ROLE};
use crate::libs::window::{self, format_timestamp};
use rusqlite::{params, Connection, OptionalExtension, Result, Row};

const INSERT_EMPLOYEE: &str = "INSERT INTO employees (name, email, role, hourly_rate, is_active, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_EMPLOYEES: &str = "SELECT id, name, email, role, hourly_rate, is_active, created_at FROM employees";

pub struct Employees<'c> {
    conn: &'c Connection,
}

impl<'c> Employees<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Employees { conn }
    }

    pub fn insert(&self, employee: &NewEmployee) -> Result<Employee> {
        let created_at = window::now();
        let role = employee.role.clone().unwrap_or_else(|| DEFAULT_ROLE.to_string());
        let hourly_rate = employee.hourly_rate.unwrap_or(DEFAULT_HOURLY_RATE);
        let is_active = employee.is_active.unwrap_or(true);

        self.conn.execute(
            INSERT_EMPLOYEE,
            params![employee.name, employee.email, role, hourly_rate, is_active, format_timestamp(&created_at)],
        )?;

        Ok(Employee {
            id: self.conn.last_insert_rowid(),
            name: employee.name.clone(),
            email: employee.email.clone(),
            role,
            hourly_rate,
            is_active,
            created_at,
        })
    }

    pub fn get(&self, id: i64) -> Result<Option<Employee>> {
        self.conn
            .query_row(&format!("{} WHERE id = ?1", SELECT_EMPLOYEES), params![id], Self::map_row)
            .optional()
    }

    pub fn fetch_active(&self) -> Result<Vec<Employee>> {
        let mut stmt = self.conn.prepare(&format!("{} WHERE is_active = 1 ORDER BY id", SELECT_EMPLOYEES))?;
        let employees = stmt.query_map([], Self::map_row)?.collect::<Result<Vec<_>>>()?;
        Ok(employees)
    }

    fn map_row(row: &Row) -> Result<Employee> {
        Ok(Employee {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            role: row.get(3)?,
            hourly_rate: row.get(4)?,
            is_active: row.get(5)?,
            created_at: row.get(6)?,
        })
    }
}
