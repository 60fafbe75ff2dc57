use std::sync::Arc;

use mongodb::bson::doc;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::model::employee::Employee;
use crate::repo::attendance::AttendanceRepo;
use crate::store::{EMPLOYEES, Filter, RecordStore, StoreError};

/// Employee identity and department-name canonicalization. Uniqueness
/// checks are check-then-act; the store enforces no constraint of its
/// own (accepted weak consistency under concurrent creates).
#[derive(Clone)]
pub struct EmployeeRepo {
    store: Arc<dyn RecordStore>,
    attendance: AttendanceRepo,
}

impl EmployeeRepo {
    pub fn new(store: Arc<dyn RecordStore>, attendance: AttendanceRepo) -> Self {
        Self { store, attendance }
    }

    pub async fn create(
        &self,
        employee_id: &str,
        full_name: &str,
        email: &str,
        department: &str,
    ) -> ApiResult<Employee> {
        let existing = self
            .store
            .find_one(EMPLOYEES, Filter::new().eq("employee_id", employee_id))
            .await?;
        if existing.is_some() {
            return Err(ApiError::Conflict(format!(
                "Employee ID '{employee_id}' already exists"
            )));
        }

        let existing_email = self
            .store
            .find_one(EMPLOYEES, Filter::new().eq("email", email))
            .await?;
        if existing_email.is_some() {
            return Err(ApiError::Conflict(format!("Email '{email}' already exists")));
        }

        // First writer wins the department casing.
        let department = match self
            .store
            .find_one(EMPLOYEES, Filter::new().eq_ignore_case("department", department))
            .await?
        {
            Some(existing_dept) => existing_dept
                .get_str("department")
                .map_err(StoreError::from)?
                .to_owned(),
            None => department.to_owned(),
        };

        let id = self
            .store
            .insert_one(
                EMPLOYEES,
                doc! {
                    "employee_id": employee_id,
                    "full_name": full_name,
                    "email": email,
                    "department": department,
                },
            )
            .await?;
        let created = self
            .store
            .find_one(EMPLOYEES, Filter::new().eq("_id", id))
            .await?
            .ok_or_else(|| StoreError::Backend("inserted employee not found".into()))?;

        info!(employee_id, "employee created");
        Ok(Employee::from_doc(&created)?)
    }

    /// All employees in store-native order.
    pub async fn list(&self) -> ApiResult<Vec<Employee>> {
        let documents = self.store.find_many(EMPLOYEES, Filter::new(), None).await?;
        documents
            .iter()
            .map(|d| Employee::from_doc(d).map_err(ApiError::from))
            .collect()
    }

    pub async fn get(&self, employee_id: &str) -> ApiResult<Employee> {
        let document = self
            .store
            .find_one(EMPLOYEES, Filter::new().eq("employee_id", employee_id))
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Employee '{employee_id}' not found")))?;
        Ok(Employee::from_doc(&document)?)
    }

    /// Cascades to the employee's attendance records first. The two
    /// deletes are independent store calls; a crash in between leaves
    /// orphaned attendance rows (accepted).
    pub async fn delete(&self, employee_id: &str) -> ApiResult<()> {
        let existing = self
            .store
            .find_one(EMPLOYEES, Filter::new().eq("employee_id", employee_id))
            .await?;
        if existing.is_none() {
            return Err(ApiError::NotFound(format!(
                "Employee '{employee_id}' not found"
            )));
        }

        let removed_records = self.attendance.delete_all_for(employee_id).await?;
        self.store
            .delete_one(EMPLOYEES, Filter::new().eq("employee_id", employee_id))
            .await?;

        info!(employee_id, removed_records, "employee deleted");
        Ok(())
    }
}
