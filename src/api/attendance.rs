use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiResult;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::stats::{EmployeeStats, MonthlyAttendanceStats};
use crate::repo::attendance::AttendanceRepo;
use crate::stats::StatsEngine;

#[derive(Deserialize, ToSchema)]
pub struct CreateAttendance {
    #[schema(example = "EMP-001")]
    pub employee_id: String,

    #[schema(example = "2024-03-01", value_type = String, format = "date")]
    pub date: NaiveDate,

    pub status: AttendanceStatus,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AttendanceQuery {
    /// Filter by employee business key.
    pub employee_id: Option<String>,

    /// Filter by exact date.
    #[param(example = "2024-03-01", value_type = String)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct MonthlyStatsQuery {
    /// 1-12; defaults to the current month.
    #[param(example = 3)]
    pub month: Option<u32>,

    /// Defaults to the current year.
    #[param(example = 2024)]
    pub year: Option<i32>,
}

/// Record attendance (upsert per employee and day)
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = CreateAttendance,
    responses(
        (status = 201, description = "Attendance record created or updated", body = AttendanceRecord),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee 'EMP-404' not found"
        }))
    ),
    tag = "Attendance"
)]
pub async fn create_attendance(
    repo: web::Data<AttendanceRepo>,
    payload: web::Json<CreateAttendance>,
) -> ApiResult<HttpResponse> {
    let record = repo
        .upsert(&payload.employee_id, payload.date, payload.status)
        .await?;
    Ok(HttpResponse::Created().json(record))
}

/// List attendance records
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Attendance records, newest date first", body = [AttendanceRecord])
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    repo: web::Data<AttendanceRepo>,
    query: web::Query<AttendanceQuery>,
) -> ApiResult<HttpResponse> {
    let records = repo.list(query.employee_id.as_deref(), query.date).await?;
    Ok(HttpResponse::Ok().json(records))
}

/// Lifetime attendance totals for all employees
#[utoipa::path(
    get,
    path = "/api/attendance/stats",
    responses(
        (status = 200, description = "Lifetime totals per employee", body = [EmployeeStats])
    ),
    tag = "Attendance"
)]
pub async fn attendance_stats(stats: web::Data<StatsEngine>) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(stats.lifetime().await?))
}

/// Monthly attendance rollup for one employee
#[utoipa::path(
    get,
    path = "/api/attendance/monthly-stats/{employee_id}",
    params(
        ("employee_id", Path, description = "Business key of the employee"),
        MonthlyStatsQuery
    ),
    responses(
        (status = 200, description = "Monthly rollup", body = MonthlyAttendanceStats),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee 'EMP-404' not found"
        }))
    ),
    tag = "Attendance"
)]
pub async fn monthly_stats(
    stats: web::Data<StatsEngine>,
    path: web::Path<String>,
    query: web::Query<MonthlyStatsQuery>,
) -> ApiResult<HttpResponse> {
    let employee_id = path.into_inner();
    let monthly = stats.monthly(&employee_id, query.month, query.year).await?;
    Ok(HttpResponse::Ok().json(monthly))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::json;

    use crate::repo::employee::EmployeeRepo;
    use crate::routes;
    use crate::store::RecordStore;
    use crate::store::mem::MemStore;

    use super::*;

    fn app_data() -> (
        web::Data<EmployeeRepo>,
        web::Data<AttendanceRepo>,
        web::Data<StatsEngine>,
    ) {
        let store: Arc<dyn RecordStore> = Arc::new(MemStore::new());
        let attendance = AttendanceRepo::new(store.clone());
        let employees = EmployeeRepo::new(store.clone(), attendance.clone());
        (
            web::Data::new(employees),
            web::Data::new(attendance),
            web::Data::new(StatsEngine::new(store)),
        )
    }

    #[actix_web::test]
    async fn create_attendance_returns_201_for_create_and_update() {
        let (employees, attendance, stats) = app_data();
        employees
            .create("EMP-001", "John Doe", "john@company.com", "Engineering")
            .await
            .unwrap();
        let app = test::init_service(
            App::new()
                .app_data(employees)
                .app_data(attendance)
                .app_data(stats)
                .configure(routes::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/attendance")
            .set_json(json!({
                "employee_id": "EMP-001",
                "date": "2024-03-01",
                "status": "Present"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: AttendanceRecord = test::read_body_json(resp).await;

        let req = test::TestRequest::post()
            .uri("/api/attendance")
            .set_json(json!({
                "employee_id": "EMP-001",
                "date": "2024-03-01",
                "status": "Absent"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let updated: AttendanceRecord = test::read_body_json(resp).await;

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.status, AttendanceStatus::Absent);
    }

    #[actix_web::test]
    async fn create_attendance_for_unknown_employee_returns_404() {
        let (employees, attendance, stats) = app_data();
        let app = test::init_service(
            App::new()
                .app_data(employees)
                .app_data(attendance)
                .app_data(stats)
                .configure(routes::configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/attendance")
            .set_json(json!({
                "employee_id": "EMP-404",
                "date": "2024-03-01",
                "status": "Present"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn list_attendance_honors_query_filters() {
        let (employees, attendance, stats) = app_data();
        employees
            .create("EMP-001", "John Doe", "john@company.com", "Engineering")
            .await
            .unwrap();
        attendance
            .upsert("EMP-001", "2024-03-01".parse().unwrap(), AttendanceStatus::Present)
            .await
            .unwrap();
        attendance
            .upsert("EMP-001", "2024-03-02".parse().unwrap(), AttendanceStatus::Absent)
            .await
            .unwrap();
        let app = test::init_service(
            App::new()
                .app_data(employees)
                .app_data(attendance)
                .app_data(stats)
                .configure(routes::configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/attendance?employee_id=EMP-001&date=2024-03-02")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let records: Vec<AttendanceRecord> = test::read_body_json(resp).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date.to_string(), "2024-03-02");
    }

    #[actix_web::test]
    async fn monthly_stats_endpoint_returns_rollup() {
        let (employees, attendance, stats) = app_data();
        employees
            .create("EMP-001", "John Doe", "john@company.com", "Engineering")
            .await
            .unwrap();
        attendance
            .upsert("EMP-001", "2024-03-01".parse().unwrap(), AttendanceStatus::Present)
            .await
            .unwrap();
        let app = test::init_service(
            App::new()
                .app_data(employees)
                .app_data(attendance)
                .app_data(stats)
                .configure(routes::configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/attendance/monthly-stats/EMP-001?month=3&year=2024")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let monthly: MonthlyAttendanceStats = test::read_body_json(resp).await;
        assert_eq!(monthly.total_days, 1);
        assert_eq!(monthly.attendance_rate, 100.0);
    }
}
