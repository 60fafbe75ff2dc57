use chrono::NaiveDate;
use mongodb::bson::Document;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::StoreError;

/// Daily attendance status. Serialized as the literal strings
/// `Present` / `Absent`, both on the wire and in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttendanceRecord {
    /// Store-assigned identifier, hex encoded.
    #[schema(example = "665f1e9b2c8a4d0012345678")]
    pub id: String,

    #[schema(example = "EMP-001")]
    pub employee_id: String,

    #[schema(example = "2024-03-01", value_type = String, format = "date")]
    pub date: NaiveDate,

    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    pub fn from_doc(document: &Document) -> Result<Self, StoreError> {
        let date_str = document.get_str("date")?;
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .map_err(|e| StoreError::Malformed(format!("bad date '{date_str}': {e}")))?;
        let status = match document.get_str("status")? {
            "Present" => AttendanceStatus::Present,
            "Absent" => AttendanceStatus::Absent,
            other => {
                return Err(StoreError::Malformed(format!(
                    "unknown attendance status '{other}'"
                )));
            }
        };
        Ok(Self {
            id: document.get_object_id("_id")?.to_hex(),
            employee_id: document.get_str("employee_id")?.to_owned(),
            date,
            status,
        })
    }
}
