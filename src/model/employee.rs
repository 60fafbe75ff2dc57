use mongodb::bson::Document;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::StoreError;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "665f1e9b2c8a4d0012345678",
        "employee_id": "EMP-001",
        "full_name": "John Doe",
        "email": "john.doe@company.com",
        "department": "Engineering"
    })
)]
pub struct Employee {
    /// Store-assigned identifier, hex encoded.
    #[schema(example = "665f1e9b2c8a4d0012345678")]
    pub id: String,

    #[schema(example = "EMP-001")]
    pub employee_id: String,

    #[schema(example = "John Doe")]
    pub full_name: String,

    #[schema(example = "john.doe@company.com")]
    pub email: String,

    #[schema(example = "Engineering")]
    pub department: String,
}

impl Employee {
    pub fn from_doc(document: &Document) -> Result<Self, StoreError> {
        Ok(Self {
            id: document.get_object_id("_id")?.to_hex(),
            employee_id: document.get_str("employee_id")?.to_owned(),
            full_name: document.get_str("full_name")?.to_owned(),
            email: document.get_str("email")?.to_owned(),
            department: document.get_str("department")?.to_owned(),
        })
    }
}
