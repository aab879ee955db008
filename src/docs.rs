use utoipa::OpenApi;

use crate::api::employee::{
    CreateEmployee, CreateRemoteEmployee, CreateShiftEntry, EmployeeFilter, EmployeeListResponse,
    RemoteEmployeeListResponse, UpdateEmployee, UpdateRemoteEmployee,
};
use crate::api::holiday::CreateHoliday;
use crate::api::ingest::{
    CallRow, IngestCalls, IngestPunches, IngestResponse, PunchRow, RowError, UpdateAttendance,
};
use crate::api::leave::{
    ApproveEarlyLeave, ApproveLeave, CreateEarlyLeave, CreateLeave, DeclineEarlyLeave,
    EarlyLeaveFilter, LeaveFilter, LeaveListResponse, RejectLeave,
};
use crate::api::payroll::{
    AdjustmentQuery, CreateAdjustment, PayrollDashboardResponse, PayrollLineResponse, PayrollQuery,
};
use crate::api::report::{
    DayCell, HolidayInfo, OnsiteReportResponse, OnsiteReportRow, RemoteDayCell,
    RemoteReportResponse, RemoteReportRow, ReportQuery,
};
use crate::engine::aggregate::{MonthlyAggregate, RemoteMonthlyAggregate};
use crate::model::attendance::AttendanceRecord;
use crate::model::early_leave::EarlyLeaveRequest;
use crate::model::employee::{Department, Employee, RemoteEmployee};
use crate::model::holiday::Holiday;
use crate::model::leave_request::{LeaveRequest, LeaveType};
use crate::model::payroll::{AdjustmentType, PayrollAdjustment};
use crate::model::remote_call::RemoteCallRecord;
use crate::model::shift::ShiftHistory;
use crate::model::status::{DayStatus, RequestStatus};
use crate::model::summary::{MonthlySummary, RemoteMonthlySummary};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance & Payroll API",
        version = "1.0.0",
        description = r#"
## Attendance & Payroll Service

Computes monthly attendance and payroll status for two employee
populations: on-site staff tracked by biometric clock punches and remote
staff tracked by phone-call statistics.

### Key Features
- **Ingestion**
  - Normalized punch and call-statistics batches, per-row error isolation
- **Classification**
  - Daily present/late/half-day/absent/holiday/paid-leave statuses
  - Monthly aggregates recomputed idempotently on every report
- **Leave Management**
  - Leave and early-leave request lifecycles with admin approval
- **Payroll**
  - Daily-rate payroll for the Admin department plus manual adjustments

### Response Format
- JSON-based RESTful responses
- Pagination supported for list endpoints

---
Built with **Rust**, **Actix Web**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::ingest::ingest_punches,
        crate::api::ingest::ingest_calls,
        crate::api::ingest::update_attendance,

        crate::api::report::onsite_report,
        crate::api::report::onsite_summary,
        crate::api::report::remote_report,

        crate::api::leave::create_leave,
        crate::api::leave::leave_list,
        crate::api::leave::approve_leave,
        crate::api::leave::reject_leave,
        crate::api::leave::create_early_leave,
        crate::api::leave::early_leave_list,
        crate::api::leave::approve_early_leave,
        crate::api::leave::decline_early_leave,

        crate::api::employee::create_employee,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,
        crate::api::employee::list_employees,
        crate::api::employee::add_shift_entry,
        crate::api::employee::list_shift_entries,
        crate::api::employee::create_remote_employee,
        crate::api::employee::get_remote_employee,
        crate::api::employee::update_remote_employee,
        crate::api::employee::list_remote_employees,

        crate::api::holiday::create_holiday,
        crate::api::holiday::list_holidays,
        crate::api::holiday::delete_holiday,

        crate::api::payroll::payroll_dashboard,
        crate::api::payroll::add_adjustment,
        crate::api::payroll::list_adjustments,
        crate::api::payroll::delete_adjustment
    ),
    components(
        schemas(
            Employee,
            RemoteEmployee,
            Department,
            Holiday,
            ShiftHistory,
            AttendanceRecord,
            RemoteCallRecord,
            LeaveRequest,
            LeaveType,
            EarlyLeaveRequest,
            MonthlySummary,
            RemoteMonthlySummary,
            PayrollAdjustment,
            AdjustmentType,
            DayStatus,
            RequestStatus,
            MonthlyAggregate,
            RemoteMonthlyAggregate,
            CreateEmployee,
            UpdateEmployee,
            EmployeeFilter,
            EmployeeListResponse,
            CreateRemoteEmployee,
            UpdateRemoteEmployee,
            RemoteEmployeeListResponse,
            CreateShiftEntry,
            CreateHoliday,
            PunchRow,
            IngestPunches,
            CallRow,
            IngestCalls,
            RowError,
            IngestResponse,
            UpdateAttendance,
            CreateLeave,
            LeaveFilter,
            LeaveListResponse,
            ApproveLeave,
            RejectLeave,
            CreateEarlyLeave,
            EarlyLeaveFilter,
            ApproveEarlyLeave,
            DeclineEarlyLeave,
            ReportQuery,
            HolidayInfo,
            DayCell,
            OnsiteReportRow,
            OnsiteReportResponse,
            RemoteDayCell,
            RemoteReportRow,
            RemoteReportResponse,
            PayrollQuery,
            PayrollLineResponse,
            PayrollDashboardResponse,
            CreateAdjustment,
            AdjustmentQuery
        )
    ),
    tags(
        (name = "Ingestion", description = "Normalized attendance signal ingestion"),
        (name = "Reports", description = "Monthly attendance reports"),
        (name = "Leave", description = "Leave and early-leave management"),
        (name = "Employees", description = "Employee and shift administration"),
        (name = "Holidays", description = "Holiday administration"),
        (name = "Payroll", description = "Payroll dashboard and adjustments"),
    )
)]
pub struct ApiDoc;
