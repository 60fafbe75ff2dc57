use std::sync::Arc;

use chrono::NaiveDate;
use mongodb::bson::doc;

use crate::error::{ApiError, ApiResult};
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::store::{ATTENDANCE, EMPLOYEES, Filter, RecordStore, Sort, StoreError};

/// One attendance record per employee per day, upsert on conflict.
#[derive(Clone)]
pub struct AttendanceRepo {
    store: Arc<dyn RecordStore>,
}

impl AttendanceRepo {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Inserts a record for `(employee_id, date)`, or overwrites the
    /// status of the existing one (the store-assigned id is preserved).
    pub async fn upsert(
        &self,
        employee_id: &str,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> ApiResult<AttendanceRecord> {
        let employee = self
            .store
            .find_one(EMPLOYEES, Filter::new().eq("employee_id", employee_id))
            .await?;
        if employee.is_none() {
            return Err(ApiError::NotFound(format!(
                "Employee '{employee_id}' not found"
            )));
        }

        let date_str = date.to_string();
        let existing = self
            .store
            .find_one(
                ATTENDANCE,
                Filter::new()
                    .eq("employee_id", employee_id)
                    .eq("date", date_str.as_str()),
            )
            .await?;

        let id = match existing {
            Some(record) => {
                let id = record.get_object_id("_id").map_err(StoreError::from)?;
                self.store
                    .update_one(
                        ATTENDANCE,
                        Filter::new().eq("_id", id),
                        doc! { "status": status.as_str() },
                    )
                    .await?;
                id.into()
            }
            None => {
                self.store
                    .insert_one(
                        ATTENDANCE,
                        doc! {
                            "employee_id": employee_id,
                            "date": date_str,
                            "status": status.as_str(),
                        },
                    )
                    .await?
            }
        };

        let saved = self
            .store
            .find_one(ATTENDANCE, Filter::new().eq("_id", id))
            .await?
            .ok_or_else(|| StoreError::Backend("saved attendance record not found".into()))?;
        Ok(AttendanceRecord::from_doc(&saved)?)
    }

    /// Optional filters are ANDed; results are sorted by date, newest
    /// first.
    pub async fn list(
        &self,
        employee_id: Option<&str>,
        date: Option<NaiveDate>,
    ) -> ApiResult<Vec<AttendanceRecord>> {
        let mut filter = Filter::new();
        if let Some(employee_id) = employee_id {
            filter = filter.eq("employee_id", employee_id);
        }
        if let Some(date) = date {
            filter = filter.eq("date", date.to_string());
        }

        let documents = self
            .store
            .find_many(ATTENDANCE, filter, Some(Sort::desc("date")))
            .await?;
        documents
            .iter()
            .map(|d| AttendanceRecord::from_doc(d).map_err(ApiError::from))
            .collect()
    }

    /// Removes every record for the employee; used by the cascading
    /// employee delete.
    pub async fn delete_all_for(&self, employee_id: &str) -> ApiResult<u64> {
        Ok(self
            .store
            .delete_many(ATTENDANCE, Filter::new().eq("employee_id", employee_id))
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::employee::EmployeeRepo;
    use crate::store::mem::MemStore;

    fn repos() -> (EmployeeRepo, AttendanceRepo) {
        let store: Arc<dyn RecordStore> = Arc::new(MemStore::new());
        let attendance = AttendanceRepo::new(store.clone());
        (EmployeeRepo::new(store, attendance.clone()), attendance)
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[actix_web::test]
    async fn upsert_rejects_unknown_employee() {
        let (_, attendance) = repos();
        let err = attendance
            .upsert("EMP-404", day("2024-03-01"), AttendanceStatus::Present)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[actix_web::test]
    async fn upsert_overwrites_existing_day_in_place() {
        let (employees, attendance) = repos();
        employees
            .create("EMP-001", "John Doe", "john@company.com", "Engineering")
            .await
            .unwrap();

        let created = attendance
            .upsert("EMP-001", day("2024-03-01"), AttendanceStatus::Present)
            .await
            .unwrap();
        let updated = attendance
            .upsert("EMP-001", day("2024-03-01"), AttendanceStatus::Absent)
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.status, AttendanceStatus::Absent);

        let records = attendance.list(Some("EMP-001"), None).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, AttendanceStatus::Absent);
    }

    #[actix_web::test]
    async fn list_sorts_by_date_descending() {
        let (employees, attendance) = repos();
        employees
            .create("EMP-001", "John Doe", "john@company.com", "Engineering")
            .await
            .unwrap();
        for date in ["2024-03-01", "2024-03-03", "2024-03-02"] {
            attendance
                .upsert("EMP-001", day(date), AttendanceStatus::Present)
                .await
                .unwrap();
        }

        let records = attendance.list(None, None).await.unwrap();
        let dates: Vec<String> = records.iter().map(|r| r.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-03-03", "2024-03-02", "2024-03-01"]);
    }

    #[actix_web::test]
    async fn list_filters_by_employee_and_date_together() {
        let (employees, attendance) = repos();
        employees
            .create("EMP-001", "John Doe", "john@company.com", "Engineering")
            .await
            .unwrap();
        employees
            .create("EMP-002", "Jane Roe", "jane@company.com", "Engineering")
            .await
            .unwrap();
        attendance
            .upsert("EMP-001", day("2024-03-01"), AttendanceStatus::Present)
            .await
            .unwrap();
        attendance
            .upsert("EMP-001", day("2024-03-02"), AttendanceStatus::Absent)
            .await
            .unwrap();
        attendance
            .upsert("EMP-002", day("2024-03-01"), AttendanceStatus::Present)
            .await
            .unwrap();

        let records = attendance
            .list(Some("EMP-001"), Some(day("2024-03-01")))
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].employee_id, "EMP-001");
        assert_eq!(records[0].date, day("2024-03-01"));
    }

    #[actix_web::test]
    async fn delete_all_for_reports_removed_count() {
        let (employees, attendance) = repos();
        employees
            .create("EMP-001", "John Doe", "john@company.com", "Engineering")
            .await
            .unwrap();
        for date in ["2024-03-01", "2024-03-02"] {
            attendance
                .upsert("EMP-001", day(date), AttendanceStatus::Present)
                .await
                .unwrap();
        }

        assert_eq!(attendance.delete_all_for("EMP-001").await.unwrap(), 2);
        assert!(attendance.list(Some("EMP-001"), None).await.unwrap().is_empty());
    }
}
