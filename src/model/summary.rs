use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Cached monthly aggregate for an on-site employee.
/// Unique per (employee, year, month); recomputed idempotently whenever a
/// report is generated or a record in the month is edited.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MonthlySummary {
    pub id: u64,
    pub employee_id: u64,
    pub year: i32,
    pub month: u32,

    /// Days with a non-zero punch signal.
    pub working_days: u32,
    pub full_days: u32,
    pub half_days: u32,
    pub late_days: u32,
    /// Unpaid absences.
    pub leave_days: u32,
    pub paid_leave_days: u32,
    /// Sundays plus declared holidays, through the evaluation cutoff.
    pub holidays: u32,
    /// Payroll credit: full + 0.5*half + holidays + paid leave.
    pub total_working_days: f64,
}

/// Cached monthly aggregate for a remote employee.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RemoteMonthlySummary {
    pub id: u64,
    pub employee_id: u64,
    pub year: i32,
    pub month: u32,

    pub present_days: u32,
    pub half_days: u32,
    pub absent_days: u32,
    pub holidays: u32,
    pub total_calls: u32,
    pub total_talk_secs: i64,
    pub total_working_days: f64,
}
