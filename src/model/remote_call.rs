use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::status::DayStatus;

/// Daily call statistics for a remote employee. Unique per (employee, date).
///
/// `attendance_status` is derived from talk duration and weekday on every
/// store write; it is never accepted from a caller.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RemoteCallRecord {
    pub id: u64,
    pub employee_id: u64,

    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,

    pub answered_calls: u32,
    pub no_answered: u32,
    pub busy: u32,
    pub failed: u32,
    pub voicemail: u32,

    /// Total ring time in seconds.
    pub total_ring_secs: i64,

    /// Total talk time in seconds; drives the attendance thresholds.
    pub total_talk_secs: i64,

    pub attendance_status: DayStatus,
}
