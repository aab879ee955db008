use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum Department {
    Sales,
    Admin,
}

/// On-site employee tracked via biometric clock punches.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "person_id": "1024",
        "name": "Ayesha Rahman",
        "email": "ayesha@company.com",
        "department": "Admin",
        "is_active": true,
        "salary": 45000.0,
        "shift_start": "10:00:00",
        "shift_end": "19:00:00"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    /// Identifier assigned by the attendance machine.
    #[schema(example = "1024")]
    pub person_id: String,

    #[schema(example = "Ayesha Rahman")]
    pub name: String,

    #[schema(example = "ayesha@company.com", nullable = true)]
    pub email: Option<String>,

    #[schema(example = "+971501234567", nullable = true)]
    pub phone: Option<String>,

    pub department: Option<Department>,

    #[schema(example = "Dubai HQ", nullable = true)]
    pub location: Option<String>,

    #[schema(example = "Support", nullable = true)]
    pub team: Option<String>,

    /// Cleared when the employee leaves the company; records are retained.
    pub is_active: bool,

    #[schema(value_type = String, format = "date", nullable = true)]
    pub joining_date: Option<NaiveDate>,

    #[schema(value_type = String, format = "date", nullable = true)]
    pub leaving_date: Option<NaiveDate>,

    #[schema(example = "Accountant", nullable = true)]
    pub designation: Option<String>,

    #[schema(example = 45000.0, nullable = true)]
    pub salary: Option<f64>,

    #[schema(value_type = String, example = "10:00:00", nullable = true)]
    pub shift_start: Option<NaiveTime>,

    #[schema(value_type = String, example = "19:00:00", nullable = true)]
    pub shift_end: Option<NaiveTime>,
}

/// Remote employee tracked via phone-call statistics.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": 7,
        "extension_id": "3068",
        "name": "Maria Santos",
        "is_active": true
    })
)]
pub struct RemoteEmployee {
    #[schema(example = 7)]
    pub id: u64,

    /// PBX extension, e.g. "3068".
    #[schema(example = "3068")]
    pub extension_id: String,

    #[schema(example = "Maria Santos")]
    pub name: String,

    #[schema(nullable = true)]
    pub email: Option<String>,

    #[schema(nullable = true)]
    pub phone: Option<String>,

    pub department: Option<Department>,

    #[schema(nullable = true)]
    pub location: Option<String>,

    #[schema(nullable = true)]
    pub team: Option<String>,

    pub is_active: bool,

    #[schema(value_type = String, format = "date", nullable = true)]
    pub joining_date: Option<NaiveDate>,

    #[schema(value_type = String, format = "date", nullable = true)]
    pub leaving_date: Option<NaiveDate>,
}
