use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One entry in an employee's shift timing history.
///
/// Entries for one employee are totally ordered by `effective_from`; the
/// applicable entry for a month is the latest with `effective_from` on or
/// before the month start.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ShiftHistory {
    pub id: u64,

    pub employee_id: u64,

    #[schema(value_type = String, example = "09:30:00")]
    pub shift_start: NaiveTime,

    #[schema(value_type = String, example = "18:30:00")]
    pub shift_end: NaiveTime,

    #[schema(value_type = String, format = "date", example = "2026-03-01")]
    pub effective_from: NaiveDate,
}
