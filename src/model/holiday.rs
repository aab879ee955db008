use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Organization-wide holiday (in addition to Sundays). Unique per date.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Holiday {
    pub id: u64,

    #[schema(value_type = String, format = "date", example = "2026-12-25")]
    pub date: NaiveDate,

    #[schema(example = "Christmas")]
    pub name: String,
}
