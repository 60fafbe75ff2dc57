use utoipa::OpenApi;

use crate::api::attendance::CreateAttendance;
use crate::api::employee::CreateEmployee;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::employee::Employee;
use crate::model::stats::{EmployeeStats, MonthlyAttendanceStats};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS API",
        version = "1.0.0",
        description = r#"
## Human Resource Management (HRMS) attendance service

Tracks employees and their daily attendance status, and derives
aggregate and monthly attendance statistics.

### Key Features
- **Employee Management**
  - Create, list, view, and delete employee records
  - Department names are canonicalized case-insensitively
- **Attendance Tracking**
  - One record per employee per day; re-submitting a day overwrites its status
- **Statistics**
  - Lifetime present/absent totals per employee
  - Monthly rollups with attendance rate

### Response Format
JSON-based RESTful responses; failures carry a `message` field.

---
Built with **Rust**, **Actix Web**, **MongoDB**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::create_attendance,
        crate::api::attendance::list_attendance,
        crate::api::attendance::attendance_stats,
        crate::api::attendance::monthly_stats,

        crate::api::health::health,
    ),
    components(
        schemas(
            CreateEmployee,
            Employee,
            CreateAttendance,
            AttendanceRecord,
            AttendanceStatus,
            EmployeeStats,
            MonthlyAttendanceStats
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance tracking and statistics APIs"),
        (name = "Health", description = "Service liveness and store connectivity"),
    )
)]
pub struct ApiDoc;
