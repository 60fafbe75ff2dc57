use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate};

use crate::error::{ApiError, ApiResult};
use crate::model::stats::{EmployeeStats, MonthlyAttendanceStats};
use crate::store::{ATTENDANCE, EMPLOYEES, Filter, RecordStore, StoreError};

/// Read-only aggregation over attendance records, computed on demand.
#[derive(Clone)]
pub struct StatsEngine {
    store: Arc<dyn RecordStore>,
}

/// `[1st of (year, month), 1st of the following month)`, December
/// rolling into January of the next year. None for an invalid month.
fn month_range(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((start, end))
}

fn count_present(records: &[mongodb::bson::Document]) -> u64 {
    records
        .iter()
        .filter(|r| r.get_str("status") == Ok("Present"))
        .count() as u64
}

impl StatsEngine {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Lifetime totals for every employee. Present and Absent are
    /// counted independently; `total_days` is the record count.
    pub async fn lifetime(&self) -> ApiResult<Vec<EmployeeStats>> {
        let employees = self.store.find_many(EMPLOYEES, Filter::new(), None).await?;

        let mut stats = Vec::with_capacity(employees.len());
        for employee in &employees {
            let employee_id = employee.get_str("employee_id").map_err(StoreError::from)?;
            let records = self
                .store
                .find_many(ATTENDANCE, Filter::new().eq("employee_id", employee_id), None)
                .await?;

            let total_present = count_present(&records);
            let total_absent = records
                .iter()
                .filter(|r| r.get_str("status") == Ok("Absent"))
                .count() as u64;

            stats.push(EmployeeStats {
                employee_id: employee_id.to_owned(),
                full_name: employee
                    .get_str("full_name")
                    .map_err(StoreError::from)?
                    .to_owned(),
                total_present,
                total_absent,
                total_days: records.len() as u64,
            });
        }
        Ok(stats)
    }

    /// Monthly rollup for one employee. Month and year default
    /// independently to the current calendar month/year.
    pub async fn monthly(
        &self,
        employee_id: &str,
        month: Option<u32>,
        year: Option<i32>,
    ) -> ApiResult<MonthlyAttendanceStats> {
        let employee = self
            .store
            .find_one(EMPLOYEES, Filter::new().eq("employee_id", employee_id))
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Employee '{employee_id}' not found")))?;

        let today = Local::now().date_naive();
        let month = month.unwrap_or_else(|| today.month());
        let year = year.unwrap_or_else(|| today.year());

        let (start, end) = month_range(year, month)
            .ok_or_else(|| ApiError::BadRequest(format!("invalid month or year: {month}/{year}")))?;

        // ISO date strings compare lexicographically as dates.
        let records = self
            .store
            .find_many(
                ATTENDANCE,
                Filter::new()
                    .eq("employee_id", employee_id)
                    .between("date", start.to_string(), end.to_string()),
                None,
            )
            .await?;

        let total_days = records.len() as u64;
        let present_days = count_present(&records);
        let absent_days = total_days - present_days;
        let rate = if total_days > 0 {
            present_days as f64 / total_days as f64 * 100.0
        } else {
            0.0
        };

        Ok(MonthlyAttendanceStats {
            employee_id: employee_id.to_owned(),
            full_name: employee
                .get_str("full_name")
                .map_err(StoreError::from)?
                .to_owned(),
            department: employee
                .get_str("department")
                .map_err(StoreError::from)?
                .to_owned(),
            month,
            year,
            total_days,
            present_days,
            absent_days,
            attendance_rate: (rate * 10.0).round() / 10.0,
        })
    }
}
