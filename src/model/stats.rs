use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifetime attendance totals for one employee. `total_present` and
/// `total_absent` are counted independently of `total_days`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmployeeStats {
    #[schema(example = "EMP-001")]
    pub employee_id: String,

    #[schema(example = "John Doe")]
    pub full_name: String,

    #[schema(example = 3)]
    pub total_present: u64,

    #[schema(example = 2)]
    pub total_absent: u64,

    #[schema(example = 5)]
    pub total_days: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MonthlyAttendanceStats {
    #[schema(example = "EMP-001")]
    pub employee_id: String,

    #[schema(example = "John Doe")]
    pub full_name: String,

    #[schema(example = "Engineering")]
    pub department: String,

    #[schema(example = 3)]
    pub month: u32,

    #[schema(example = 2024)]
    pub year: i32,

    #[schema(example = 21)]
    pub total_days: u64,

    #[schema(example = 19)]
    pub present_days: u64,

    /// Derived as `total_days - present_days`.
    #[schema(example = 2)]
    pub absent_days: u64,

    #[schema(example = 90.5)]
    pub attendance_rate: f64,
}
