use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::status::RequestStatus;

/// Same-day request to leave the office early (field visit, customer
/// meeting). Tied to exactly one of an on-site or a remote employee.
///
/// Approval for an on-site employee may retroactively rewrite that day's
/// punch record before the month is reclassified.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EarlyLeaveRequest {
    pub id: u64,

    #[schema(nullable = true)]
    pub employee_id: Option<u64>,

    #[schema(nullable = true)]
    pub remote_employee_id: Option<u64>,

    #[schema(value_type = String, format = "date")]
    pub request_date: NaiveDate,

    #[schema(value_type = String, example = "15:30:00")]
    pub leaving_time: NaiveTime,

    #[schema(value_type = String, example = "17:30:00", nullable = true)]
    pub return_time: Option<NaiveTime>,

    #[schema(example = "Client office, Deira")]
    pub destination: String,

    #[schema(example = "Al Noor Trading")]
    pub customer_name: String,

    pub reason: String,

    pub status: RequestStatus,

    #[schema(nullable = true)]
    pub admin_notes: Option<String>,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,

    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub reviewed_at: Option<DateTime<Utc>>,
}
