use actix_web::{HttpResponse, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::{ApiError, ApiResult};
use crate::model::employee::Employee;
use crate::repo::employee::EmployeeRepo;

#[derive(Deserialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "EMP-001")]
    pub employee_id: String,

    #[schema(example = "John Doe")]
    pub full_name: String,

    #[schema(example = "john.doe@company.com", format = "email")]
    pub email: String,

    #[schema(example = "Engineering")]
    pub department: String,
}

fn validate(payload: &CreateEmployee) -> ApiResult<()> {
    if payload.employee_id.trim().is_empty() {
        return Err(ApiError::BadRequest("employee_id must not be empty".into()));
    }
    if payload.full_name.trim().is_empty() {
        return Err(ApiError::BadRequest("full_name must not be empty".into()));
    }
    if payload.department.trim().is_empty() {
        return Err(ApiError::BadRequest("department must not be empty".into()));
    }
    if !payload.email.contains('@') {
        return Err(ApiError::BadRequest(format!(
            "'{}' is not a valid email address",
            payload.email
        )));
    }
    Ok(())
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Duplicate employee_id or email", body = Object, example = json!({
            "message": "Employee ID 'EMP-001' already exists"
        }))
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    repo: web::Data<EmployeeRepo>,
    payload: web::Json<CreateEmployee>,
) -> ApiResult<HttpResponse> {
    validate(&payload)?;
    let employee = repo
        .create(
            &payload.employee_id,
            &payload.full_name,
            &payload.email,
            &payload.department,
        )
        .await?;
    Ok(HttpResponse::Created().json(employee))
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees", body = [Employee])
    ),
    tag = "Employee"
)]
pub async fn list_employees(repo: web::Data<EmployeeRepo>) -> ApiResult<HttpResponse> {
    let employees = repo.list().await?;
    Ok(HttpResponse::Ok().json(employees))
}

/// Get Employee by business id
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Business key of the employee")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee 'EMP-404' not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    repo: web::Data<EmployeeRepo>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let employee = repo.get(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Delete Employee (cascades to attendance records)
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Business key of the employee")
    ),
    responses(
        (status = 204, description = "Employee and attendance records deleted"),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee 'EMP-404' not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    repo: web::Data<EmployeeRepo>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    repo.delete(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
