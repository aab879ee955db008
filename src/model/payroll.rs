use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AdjustmentType {
    Incentive,
    Reduction,
}

/// Free-standing manual payroll correction, applied after computed payroll.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PayrollAdjustment {
    pub id: u64,
    pub employee_id: u64,
    pub year: i32,

    #[schema(example = 4, minimum = 1, maximum = 12)]
    pub month: u32,

    pub adjustment_type: AdjustmentType,

    #[schema(example = 500.0)]
    pub amount: f64,

    #[schema(example = "Quarterly sales incentive")]
    pub reason: String,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}
