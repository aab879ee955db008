use chrono::{NaiveTime, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Daily punch record for an on-site employee. Unique per (employee, date).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttendanceRecord {
    pub id: u64,
    pub employee_id: u64,

    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(value_type = String, example = "10:02:00", nullable = true)]
    pub first_in: Option<NaiveTime>,

    #[schema(value_type = String, example = "19:11:00", nullable = true)]
    pub last_out: Option<NaiveTime>,

    /// Recorded working duration in seconds. Zero when either punch is
    /// missing or last-out is not after first-in.
    pub work_secs: i64,
}

impl AttendanceRecord {
    pub fn duration_secs(first_in: Option<NaiveTime>, last_out: Option<NaiveTime>) -> i64 {
        match (first_in, last_out) {
            (Some(fi), Some(lo)) if lo > fi => (lo - fi).num_seconds(),
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn duration_is_last_out_minus_first_in() {
        assert_eq!(
            AttendanceRecord::duration_secs(Some(t(10, 0)), Some(t(19, 30))),
            9 * 3600 + 1800
        );
    }

    #[test]
    fn duration_is_zero_when_out_not_after_in() {
        assert_eq!(AttendanceRecord::duration_secs(Some(t(19, 0)), Some(t(10, 0))), 0);
        assert_eq!(AttendanceRecord::duration_secs(Some(t(10, 0)), Some(t(10, 0))), 0);
    }

    #[test]
    fn duration_is_zero_when_punch_missing() {
        assert_eq!(AttendanceRecord::duration_secs(None, Some(t(19, 0))), 0);
        assert_eq!(AttendanceRecord::duration_secs(Some(t(10, 0)), None), 0);
        assert_eq!(AttendanceRecord::duration_secs(None, None), 0);
    }
}
