use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

use crate::model::status::RequestStatus;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LeaveType {
    Sick,
    Medical,
    Annual,
    Casual,
}

impl LeaveType {
    /// Sick and medical leave must be backed by a supporting document.
    pub fn requires_document(&self) -> bool {
        matches!(self, LeaveType::Sick | LeaveType::Medical)
    }
}

/// Multi-day leave request from an on-site employee.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeaveRequest {
    pub id: u64,
    pub employee_id: u64,

    pub leave_type: LeaveType,

    #[schema(value_type = String, format = "date", example = "2026-04-06")]
    pub start_date: NaiveDate,

    #[schema(value_type = String, format = "date", example = "2026-04-10")]
    pub end_date: NaiveDate,

    #[schema(example = "Family travel")]
    pub reason: String,

    /// Whether a supporting document was submitted alongside the request.
    pub has_document: bool,

    /// Inclusive day span at submission time.
    pub requested_days: u32,

    /// Set on approval; may be fewer than requested (partial approval).
    #[schema(nullable = true)]
    pub approved_days: Option<u32>,

    pub status: RequestStatus,

    #[schema(nullable = true)]
    pub admin_notes: Option<String>,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,

    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl LeaveRequest {
    /// Inclusive day span of a date range, never less than one.
    pub fn span_between(start: NaiveDate, end: NaiveDate) -> u32 {
        ((end - start).num_days() + 1).max(1) as u32
    }

    /// Approved days once approved, otherwise the requested span.
    pub fn get_effective_days(&self) -> u32 {
        if self.status == RequestStatus::Approved {
            if let Some(days) = self.approved_days {
                return days;
            }
        }
        self.requested_days
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn request(status: RequestStatus, requested: u32, approved: Option<u32>) -> LeaveRequest {
        LeaveRequest {
            id: 1,
            employee_id: 1,
            leave_type: LeaveType::Annual,
            start_date: NaiveDate::from_ymd_opt(2026, 4, 6).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 4, 10).unwrap(),
            reason: "travel".into(),
            has_document: false,
            requested_days: requested,
            approved_days: approved,
            status,
            admin_notes: None,
            created_at: Utc::now(),
            reviewed_at: None,
        }
    }

    #[test]
    fn effective_days_prefers_approved_days_once_approved() {
        let req = request(RequestStatus::Approved, 5, Some(2));
        assert_eq!(req.get_effective_days(), 2);
    }

    #[test]
    fn effective_days_falls_back_to_requested() {
        assert_eq!(request(RequestStatus::Pending, 5, Some(2)).get_effective_days(), 5);
        assert_eq!(request(RequestStatus::Approved, 5, None).get_effective_days(), 5);
        assert_eq!(request(RequestStatus::Rejected, 5, Some(2)).get_effective_days(), 5);
    }

    #[test]
    fn span_is_inclusive_of_both_endpoints() {
        let req = request(RequestStatus::Pending, 5, None);
        assert_eq!(LeaveRequest::span_between(req.start_date, req.end_date), 5);
        assert_eq!(LeaveRequest::span_between(req.start_date, req.start_date), 1);
    }

    #[test]
    fn document_required_only_for_sick_and_medical() {
        assert!(LeaveType::Sick.requires_document());
        assert!(LeaveType::Medical.requires_document());
        assert!(!LeaveType::Annual.requires_document());
        assert!(!LeaveType::Casual.requires_document());
    }
}
