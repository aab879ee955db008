use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::RwLock;

use chrono::{Datelike, NaiveDate, NaiveTime};

use crate::engine::aggregate::{
    CallSignal, MonthlyAggregate, RemoteMonthlyAggregate, build_onsite_month, build_remote_month,
};
use crate::engine::calendar::MonthCalendar;
use crate::engine::classify::{DayClass, PunchSignal, remote_call_status};
use crate::engine::leave::paid_leave_days;
use crate::engine::shift::{DefaultShift, ResolvedShift, resolve_shift};
use crate::error::AppError;
use crate::model::{
    attendance::AttendanceRecord,
    early_leave::EarlyLeaveRequest,
    employee::{Employee, RemoteEmployee},
    holiday::Holiday,
    leave_request::LeaveRequest,
    payroll::PayrollAdjustment,
    remote_call::RemoteCallRecord,
    shift::ShiftHistory,
    status::{DayStatus, RequestStatus},
    summary::{MonthlySummary, RemoteMonthlySummary},
};

/// Call counters as fed into the store by ingestion.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallStats {
    pub answered_calls: u32,
    pub no_answered: u32,
    pub busy: u32,
    pub failed: u32,
    pub voicemail: u32,
    pub total_ring_secs: i64,
    pub total_talk_secs: i64,
}

/// Fully recomputed month for one on-site employee.
#[derive(Debug, Clone)]
pub struct OnsiteMonthData {
    pub employee: Employee,
    pub calendar: MonthCalendar,
    pub shift: ResolvedShift,
    pub paid_leave: BTreeSet<u32>,
    pub signals: BTreeMap<u32, PunchSignal>,
    pub classes: BTreeMap<u32, DayClass>,
    pub aggregate: MonthlyAggregate,
}

/// Fully recomputed month for one remote employee.
#[derive(Debug, Clone)]
pub struct RemoteMonthData {
    pub employee: RemoteEmployee,
    pub calendar: MonthCalendar,
    pub signals: BTreeMap<u32, CallSignal>,
    pub classes: BTreeMap<u32, DayStatus>,
    pub aggregate: RemoteMonthlyAggregate,
}

#[derive(Default)]
struct Tables {
    next_id: u64,
    employees: HashMap<u64, Employee>,
    remote_employees: HashMap<u64, RemoteEmployee>,
    holidays: HashMap<u64, Holiday>,
    shift_history: HashMap<u64, ShiftHistory>,
    attendance: HashMap<u64, AttendanceRecord>,
    call_records: HashMap<u64, RemoteCallRecord>,
    leave_requests: HashMap<u64, LeaveRequest>,
    early_leave_requests: HashMap<u64, EarlyLeaveRequest>,
    monthly_summaries: HashMap<u64, MonthlySummary>,
    remote_monthly_summaries: HashMap<u64, RemoteMonthlySummary>,
    payroll_adjustments: HashMap<u64, PayrollAdjustment>,
}

impl Tables {
    fn alloc_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Shared application state. A relational store stands behind the same
/// operations in production; everything here is keyed the same way the
/// tables would be, with the uniqueness rules enforced on write.
#[derive(Default)]
pub struct AppStore {
    inner: RwLock<Tables>,
}

impl AppStore {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------
    // Employees
    // -------------------------

    pub fn create_employee(&self, mut employee: Employee) -> Result<Employee, AppError> {
        let mut t = self.inner.write().expect("store lock");
        if t.employees
            .values()
            .any(|e| e.person_id == employee.person_id && e.name == employee.name)
        {
            return Err(AppError::conflict("Employee with this person_id and name already exists"));
        }
        employee.id = t.alloc_id();
        t.employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    pub fn get_employee(&self, id: u64) -> Option<Employee> {
        self.inner.read().expect("store lock").employees.get(&id).cloned()
    }

    pub fn update_employee(
        &self,
        id: u64,
        apply: impl FnOnce(&mut Employee),
    ) -> Result<Employee, AppError> {
        let mut t = self.inner.write().expect("store lock");
        let employee = t
            .employees
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Employee not found"))?;
        apply(employee);
        Ok(employee.clone())
    }

    pub fn list_employees(&self, show_inactive: bool, search: Option<&str>) -> Vec<Employee> {
        let t = self.inner.read().expect("store lock");
        let needle = search.map(str::to_lowercase);
        let mut employees: Vec<_> = t
            .employees
            .values()
            .filter(|e| show_inactive || e.is_active)
            .filter(|e| {
                needle
                    .as_deref()
                    .is_none_or(|n| e.name.to_lowercase().contains(n))
            })
            .cloned()
            .collect();
        employees.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        employees
    }

    /// Ingestion identifies employees by the (person_id, name) pair coming
    /// off the attendance machine.
    pub fn find_or_create_employee(&self, person_id: &str, name: &str) -> Employee {
        let mut t = self.inner.write().expect("store lock");
        if let Some(found) = t
            .employees
            .values()
            .find(|e| e.person_id == person_id && e.name == name)
        {
            return found.clone();
        }
        let id = t.alloc_id();
        let employee = Employee {
            id,
            person_id: person_id.to_string(),
            name: name.to_string(),
            email: None,
            phone: None,
            department: None,
            location: None,
            team: None,
            is_active: true,
            joining_date: None,
            leaving_date: None,
            designation: None,
            salary: None,
            shift_start: None,
            shift_end: None,
        };
        t.employees.insert(id, employee.clone());
        employee
    }

    // -------------------------
    // Remote employees
    // -------------------------

    pub fn create_remote_employee(
        &self,
        mut employee: RemoteEmployee,
    ) -> Result<RemoteEmployee, AppError> {
        let mut t = self.inner.write().expect("store lock");
        if t.remote_employees
            .values()
            .any(|e| e.extension_id == employee.extension_id && e.name == employee.name)
        {
            return Err(AppError::conflict(
                "Remote employee with this extension_id and name already exists",
            ));
        }
        employee.id = t.alloc_id();
        t.remote_employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    pub fn get_remote_employee(&self, id: u64) -> Option<RemoteEmployee> {
        self.inner.read().expect("store lock").remote_employees.get(&id).cloned()
    }

    pub fn update_remote_employee(
        &self,
        id: u64,
        apply: impl FnOnce(&mut RemoteEmployee),
    ) -> Result<RemoteEmployee, AppError> {
        let mut t = self.inner.write().expect("store lock");
        let employee = t
            .remote_employees
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Remote employee not found"))?;
        apply(employee);
        Ok(employee.clone())
    }

    pub fn list_remote_employees(
        &self,
        show_inactive: bool,
        search: Option<&str>,
    ) -> Vec<RemoteEmployee> {
        let t = self.inner.read().expect("store lock");
        let needle = search.map(str::to_lowercase);
        let mut employees: Vec<_> = t
            .remote_employees
            .values()
            .filter(|e| show_inactive || e.is_active)
            .filter(|e| {
                needle
                    .as_deref()
                    .is_none_or(|n| e.name.to_lowercase().contains(n))
            })
            .cloned()
            .collect();
        employees.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        employees
    }

    pub fn find_or_create_remote_employee(&self, extension_id: &str, name: &str) -> RemoteEmployee {
        let mut t = self.inner.write().expect("store lock");
        if let Some(found) = t
            .remote_employees
            .values()
            .find(|e| e.extension_id == extension_id && e.name == name)
        {
            return found.clone();
        }
        let id = t.alloc_id();
        let employee = RemoteEmployee {
            id,
            extension_id: extension_id.to_string(),
            name: name.to_string(),
            email: None,
            phone: None,
            department: None,
            location: None,
            team: None,
            is_active: true,
            joining_date: None,
            leaving_date: None,
        };
        t.remote_employees.insert(id, employee.clone());
        employee
    }

    // -------------------------
    // Holidays
    // -------------------------

    pub fn create_holiday(&self, date: NaiveDate, name: &str) -> Result<Holiday, AppError> {
        let mut t = self.inner.write().expect("store lock");
        if t.holidays.values().any(|h| h.date == date) {
            return Err(AppError::conflict("A holiday already exists on this date"));
        }
        let id = t.alloc_id();
        let holiday = Holiday { id, date, name: name.trim().to_string() };
        t.holidays.insert(id, holiday.clone());
        Ok(holiday)
    }

    pub fn list_holidays(&self) -> Vec<Holiday> {
        let mut holidays: Vec<_> =
            self.inner.read().expect("store lock").holidays.values().cloned().collect();
        holidays.sort_by(|a, b| b.date.cmp(&a.date));
        holidays
    }

    pub fn holiday_dates(&self) -> Vec<NaiveDate> {
        self.inner.read().expect("store lock").holidays.values().map(|h| h.date).collect()
    }

    pub fn delete_holiday(&self, id: u64) -> Result<(), AppError> {
        let mut t = self.inner.write().expect("store lock");
        t.holidays
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Holiday not found"))
    }

    // -------------------------
    // Shift history
    // -------------------------

    pub fn add_shift_history(
        &self,
        employee_id: u64,
        shift_start: NaiveTime,
        shift_end: NaiveTime,
        effective_from: NaiveDate,
    ) -> Result<ShiftHistory, AppError> {
        let mut t = self.inner.write().expect("store lock");
        if !t.employees.contains_key(&employee_id) {
            return Err(AppError::not_found("Employee not found"));
        }
        // effective_from totally orders one employee's entries.
        if t.shift_history
            .values()
            .any(|h| h.employee_id == employee_id && h.effective_from == effective_from)
        {
            return Err(AppError::conflict(
                "A shift entry already exists for this employee and effective date",
            ));
        }
        let id = t.alloc_id();
        let entry = ShiftHistory { id, employee_id, shift_start, shift_end, effective_from };
        t.shift_history.insert(id, entry.clone());
        Ok(entry)
    }

    pub fn shift_history_for(&self, employee_id: u64) -> Vec<ShiftHistory> {
        let mut entries: Vec<_> = self
            .inner
            .read()
            .expect("store lock")
            .shift_history
            .values()
            .filter(|h| h.employee_id == employee_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.effective_from.cmp(&a.effective_from));
        entries
    }

    // -------------------------
    // Attendance records
    // -------------------------

    pub fn upsert_attendance(
        &self,
        employee_id: u64,
        date: NaiveDate,
        first_in: Option<NaiveTime>,
        last_out: Option<NaiveTime>,
    ) -> Result<AttendanceRecord, AppError> {
        let mut t = self.inner.write().expect("store lock");
        if !t.employees.contains_key(&employee_id) {
            return Err(AppError::not_found("Employee not found"));
        }
        let work_secs = AttendanceRecord::duration_secs(first_in, last_out);
        if let Some(existing) = t
            .attendance
            .values_mut()
            .find(|r| r.employee_id == employee_id && r.date == date)
        {
            existing.first_in = first_in;
            existing.last_out = last_out;
            existing.work_secs = work_secs;
            return Ok(existing.clone());
        }
        let id = t.alloc_id();
        let record = AttendanceRecord { id, employee_id, date, first_in, last_out, work_secs };
        t.attendance.insert(id, record.clone());
        Ok(record)
    }

    pub fn attendance_for(&self, employee_id: u64, date: NaiveDate) -> Option<AttendanceRecord> {
        self.inner
            .read()
            .expect("store lock")
            .attendance
            .values()
            .find(|r| r.employee_id == employee_id && r.date == date)
            .cloned()
    }

    // -------------------------
    // Remote call records
    // -------------------------

    pub fn upsert_call_record(
        &self,
        employee_id: u64,
        date: NaiveDate,
        stats: CallStats,
    ) -> Result<RemoteCallRecord, AppError> {
        let mut t = self.inner.write().expect("store lock");
        if !t.remote_employees.contains_key(&employee_id) {
            return Err(AppError::not_found("Remote employee not found"));
        }
        // Derived on every write; callers never set it.
        let attendance_status = remote_call_status(date, stats.total_talk_secs);
        if let Some(existing) = t
            .call_records
            .values_mut()
            .find(|r| r.employee_id == employee_id && r.date == date)
        {
            existing.answered_calls = stats.answered_calls;
            existing.no_answered = stats.no_answered;
            existing.busy = stats.busy;
            existing.failed = stats.failed;
            existing.voicemail = stats.voicemail;
            existing.total_ring_secs = stats.total_ring_secs;
            existing.total_talk_secs = stats.total_talk_secs;
            existing.attendance_status = attendance_status;
            return Ok(existing.clone());
        }
        let id = t.alloc_id();
        let record = RemoteCallRecord {
            id,
            employee_id,
            date,
            answered_calls: stats.answered_calls,
            no_answered: stats.no_answered,
            busy: stats.busy,
            failed: stats.failed,
            voicemail: stats.voicemail,
            total_ring_secs: stats.total_ring_secs,
            total_talk_secs: stats.total_talk_secs,
            attendance_status,
        };
        t.call_records.insert(id, record.clone());
        Ok(record)
    }

    // -------------------------
    // Leave requests
    // -------------------------

    pub fn create_leave(&self, mut request: LeaveRequest) -> Result<LeaveRequest, AppError> {
        let mut t = self.inner.write().expect("store lock");
        if !t.employees.contains_key(&request.employee_id) {
            return Err(AppError::not_found("Employee not found"));
        }
        request.id = t.alloc_id();
        t.leave_requests.insert(request.id, request.clone());
        Ok(request)
    }

    pub fn get_leave(&self, id: u64) -> Option<LeaveRequest> {
        self.inner.read().expect("store lock").leave_requests.get(&id).cloned()
    }

    pub fn update_leave(
        &self,
        id: u64,
        apply: impl FnOnce(&mut LeaveRequest),
    ) -> Result<LeaveRequest, AppError> {
        let mut t = self.inner.write().expect("store lock");
        let request = t
            .leave_requests
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Leave request not found"))?;
        apply(request);
        Ok(request.clone())
    }

    pub fn list_leaves(
        &self,
        status: Option<RequestStatus>,
        employee_id: Option<u64>,
    ) -> Vec<LeaveRequest> {
        let mut requests: Vec<_> = self
            .inner
            .read()
            .expect("store lock")
            .leave_requests
            .values()
            .filter(|r| status.is_none_or(|s| r.status == s))
            .filter(|r| employee_id.is_none_or(|e| r.employee_id == e))
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        requests
    }

    fn leave_snapshot(t: &Tables) -> Vec<LeaveRequest> {
        t.leave_requests.values().cloned().collect()
    }

    // -------------------------
    // Early leave requests
    // -------------------------

    pub fn create_early_leave(
        &self,
        mut request: EarlyLeaveRequest,
    ) -> Result<EarlyLeaveRequest, AppError> {
        let mut t = self.inner.write().expect("store lock");
        match (request.employee_id, request.remote_employee_id) {
            (Some(id), None) if t.employees.contains_key(&id) => {}
            (Some(_), None) => return Err(AppError::not_found("Employee not found")),
            (None, Some(id)) if t.remote_employees.contains_key(&id) => {}
            (None, Some(_)) => return Err(AppError::not_found("Remote employee not found")),
            _ => {
                return Err(AppError::validation(
                    "Exactly one of employee_id and remote_employee_id is required",
                ));
            }
        }
        request.id = t.alloc_id();
        t.early_leave_requests.insert(request.id, request.clone());
        Ok(request)
    }

    pub fn get_early_leave(&self, id: u64) -> Option<EarlyLeaveRequest> {
        self.inner.read().expect("store lock").early_leave_requests.get(&id).cloned()
    }

    pub fn update_early_leave(
        &self,
        id: u64,
        apply: impl FnOnce(&mut EarlyLeaveRequest),
    ) -> Result<EarlyLeaveRequest, AppError> {
        let mut t = self.inner.write().expect("store lock");
        let request = t
            .early_leave_requests
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Early leave request not found"))?;
        apply(request);
        Ok(request.clone())
    }

    pub fn list_early_leaves(&self, status: Option<RequestStatus>) -> Vec<EarlyLeaveRequest> {
        let mut requests: Vec<_> = self
            .inner
            .read()
            .expect("store lock")
            .early_leave_requests
            .values()
            .filter(|r| status.is_none_or(|s| r.status == s))
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        requests
    }

    // -------------------------
    // Payroll adjustments
    // -------------------------

    pub fn add_adjustment(
        &self,
        mut adjustment: PayrollAdjustment,
    ) -> Result<PayrollAdjustment, AppError> {
        let mut t = self.inner.write().expect("store lock");
        if !t.employees.contains_key(&adjustment.employee_id) {
            return Err(AppError::not_found("Employee not found"));
        }
        adjustment.id = t.alloc_id();
        t.payroll_adjustments.insert(adjustment.id, adjustment.clone());
        Ok(adjustment)
    }

    pub fn adjustments_for(&self, employee_id: u64, year: i32, month: u32) -> Vec<PayrollAdjustment> {
        let mut adjustments: Vec<_> = self
            .inner
            .read()
            .expect("store lock")
            .payroll_adjustments
            .values()
            .filter(|a| a.employee_id == employee_id && a.year == year && a.month == month)
            .cloned()
            .collect();
        adjustments.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        adjustments
    }

    pub fn delete_adjustment(&self, id: u64) -> Result<(), AppError> {
        let mut t = self.inner.write().expect("store lock");
        t.payroll_adjustments
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Adjustment not found"))
    }

    // -------------------------
    // Month recomputation
    // -------------------------

    /// Recomputes one on-site employee's month from raw signals, calendar,
    /// shift history and approved leave. Pure apart from the snapshot read.
    pub fn onsite_month(
        &self,
        employee_id: u64,
        year: i32,
        month: u32,
        today: NaiveDate,
        default_shift: DefaultShift,
    ) -> Result<OnsiteMonthData, AppError> {
        let (employee, history, holidays, leaves, signals) = {
            let t = self.inner.read().expect("store lock");
            let employee = t
                .employees
                .get(&employee_id)
                .cloned()
                .ok_or_else(|| AppError::not_found("Employee not found"))?;
            let history: Vec<_> = t
                .shift_history
                .values()
                .filter(|h| h.employee_id == employee_id)
                .cloned()
                .collect();
            let holidays: Vec<_> = t.holidays.values().map(|h| h.date).collect();
            let leaves = Self::leave_snapshot(&t);
            let signals: BTreeMap<u32, PunchSignal> = t
                .attendance
                .values()
                .filter(|r| {
                    r.employee_id == employee_id
                        && r.date.year() == year
                        && r.date.month() == month
                })
                .map(|r| {
                    (r.date.day(), PunchSignal {
                        first_in: r.first_in,
                        last_out: r.last_out,
                        work_secs: r.work_secs,
                    })
                })
                .collect();
            (employee, history, holidays, leaves, signals)
        };

        let calendar = MonthCalendar::build(year, month, &holidays, today)
            .ok_or_else(|| AppError::validation("month must be between 1 and 12"))?;
        let shift = resolve_shift(&employee, &history, calendar.date(1), default_shift);
        let paid_leave = paid_leave_days(&leaves, employee_id, &calendar);
        let (classes, aggregate) = build_onsite_month(&calendar, &shift, &paid_leave, &signals);

        Ok(OnsiteMonthData { employee, calendar, shift, paid_leave, signals, classes, aggregate })
    }

    /// Recomputes one remote employee's month.
    pub fn remote_month(
        &self,
        employee_id: u64,
        year: i32,
        month: u32,
        today: NaiveDate,
    ) -> Result<RemoteMonthData, AppError> {
        let (employee, holidays, signals) = {
            let t = self.inner.read().expect("store lock");
            let employee = t
                .remote_employees
                .get(&employee_id)
                .cloned()
                .ok_or_else(|| AppError::not_found("Remote employee not found"))?;
            let holidays: Vec<_> = t.holidays.values().map(|h| h.date).collect();
            let signals: BTreeMap<u32, CallSignal> = t
                .call_records
                .values()
                .filter(|r| {
                    r.employee_id == employee_id
                        && r.date.year() == year
                        && r.date.month() == month
                })
                .map(|r| {
                    (r.date.day(), CallSignal {
                        status: r.attendance_status,
                        answered_calls: r.answered_calls,
                        total_talk_secs: r.total_talk_secs,
                    })
                })
                .collect();
            (employee, holidays, signals)
        };

        let calendar = MonthCalendar::build(year, month, &holidays, today)
            .ok_or_else(|| AppError::validation("month must be between 1 and 12"))?;
        let (classes, aggregate) = build_remote_month(&calendar, &signals);

        Ok(RemoteMonthData { employee, calendar, signals, classes, aggregate })
    }

    // -------------------------
    // Monthly summaries (cache rows)
    // -------------------------

    pub fn upsert_monthly_summary(
        &self,
        employee_id: u64,
        year: i32,
        month: u32,
        agg: &MonthlyAggregate,
    ) -> MonthlySummary {
        let mut t = self.inner.write().expect("store lock");
        if let Some(existing) = t
            .monthly_summaries
            .values_mut()
            .find(|s| s.employee_id == employee_id && s.year == year && s.month == month)
        {
            existing.working_days = agg.working_days;
            existing.full_days = agg.full_days;
            existing.half_days = agg.half_days;
            existing.late_days = agg.late_days;
            existing.leave_days = agg.leave_days;
            existing.paid_leave_days = agg.paid_leave_days;
            existing.holidays = agg.holidays;
            existing.total_working_days = agg.total_working_days;
            return existing.clone();
        }
        let id = t.alloc_id();
        let summary = MonthlySummary {
            id,
            employee_id,
            year,
            month,
            working_days: agg.working_days,
            full_days: agg.full_days,
            half_days: agg.half_days,
            late_days: agg.late_days,
            leave_days: agg.leave_days,
            paid_leave_days: agg.paid_leave_days,
            holidays: agg.holidays,
            total_working_days: agg.total_working_days,
        };
        t.monthly_summaries.insert(id, summary.clone());
        summary
    }

    pub fn upsert_remote_monthly_summary(
        &self,
        employee_id: u64,
        year: i32,
        month: u32,
        agg: &RemoteMonthlyAggregate,
    ) -> RemoteMonthlySummary {
        let mut t = self.inner.write().expect("store lock");
        if let Some(existing) = t
            .remote_monthly_summaries
            .values_mut()
            .find(|s| s.employee_id == employee_id && s.year == year && s.month == month)
        {
            existing.present_days = agg.present_days;
            existing.half_days = agg.half_days;
            existing.absent_days = agg.absent_days;
            existing.holidays = agg.holidays;
            existing.total_calls = agg.total_calls;
            existing.total_talk_secs = agg.total_talk_secs;
            existing.total_working_days = agg.total_working_days;
            return existing.clone();
        }
        let id = t.alloc_id();
        let summary = RemoteMonthlySummary {
            id,
            employee_id,
            year,
            month,
            present_days: agg.present_days,
            half_days: agg.half_days,
            absent_days: agg.absent_days,
            holidays: agg.holidays,
            total_calls: agg.total_calls,
            total_talk_secs: agg.total_talk_secs,
            total_working_days: agg.total_working_days,
        };
        t.remote_monthly_summaries.insert(id, summary.clone());
        summary
    }

    pub fn get_monthly_summary(&self, employee_id: u64, year: i32, month: u32) -> Option<MonthlySummary> {
        self.inner
            .read()
            .expect("store lock")
            .monthly_summaries
            .values()
            .find(|s| s.employee_id == employee_id && s.year == year && s.month == month)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn find_or_create_reuses_matching_pair() {
        let store = AppStore::new();
        let a = store.find_or_create_employee("1024", "Ayesha Rahman");
        let b = store.find_or_create_employee("1024", "Ayesha Rahman");
        assert_eq!(a.id, b.id);
        // Same machine id with a different name is a different person.
        let c = store.find_or_create_employee("1024", "Another Person");
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn duplicate_holiday_date_is_rejected() {
        let store = AppStore::new();
        store.create_holiday(d(2026, 12, 25), "Christmas").unwrap();
        let err = store.create_holiday(d(2026, 12, 25), "Duplicate").unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
    }

    #[test]
    fn duplicate_shift_effective_date_is_rejected() {
        let store = AppStore::new();
        let emp = store.find_or_create_employee("1", "A");
        store.add_shift_history(emp.id, t(9, 0), t(18, 0), d(2026, 3, 1)).unwrap();
        let err = store
            .add_shift_history(emp.id, t(10, 0), t(19, 0), d(2026, 3, 1))
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
    }

    #[test]
    fn attendance_upsert_is_unique_per_employee_and_date() {
        let store = AppStore::new();
        let emp = store.find_or_create_employee("1", "A");
        let first = store
            .upsert_attendance(emp.id, d(2026, 6, 1), Some(t(10, 0)), Some(t(19, 0)))
            .unwrap();
        let second = store
            .upsert_attendance(emp.id, d(2026, 6, 1), Some(t(9, 30)), Some(t(18, 0)))
            .unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(second.first_in, Some(t(9, 30)));
        assert_eq!(second.work_secs, (t(18, 0) - t(9, 30)).num_seconds());
    }

    #[test]
    fn call_record_status_is_rederived_on_every_write() {
        let store = AppStore::new();
        let emp = store.find_or_create_remote_employee("3068", "Maria Santos");
        // Monday 2026-06-01 with 95 minutes of talk.
        let record = store
            .upsert_call_record(
                emp.id,
                d(2026, 6, 1),
                CallStats { total_talk_secs: 95 * 60, ..CallStats::default() },
            )
            .unwrap();
        assert_eq!(record.attendance_status, DayStatus::Present);

        let record = store
            .upsert_call_record(
                emp.id,
                d(2026, 6, 1),
                CallStats { total_talk_secs: 50 * 60, ..CallStats::default() },
            )
            .unwrap();
        assert_eq!(record.attendance_status, DayStatus::HalfDay);
    }

    #[test]
    fn summary_upsert_is_idempotent_and_unique() {
        let store = AppStore::new();
        let emp = store.find_or_create_employee("1", "A");
        let agg = MonthlyAggregate { full_days: 20, total_working_days: 24.5, ..Default::default() };

        let first = store.upsert_monthly_summary(emp.id, 2026, 6, &agg);
        let second = store.upsert_monthly_summary(emp.id, 2026, 6, &agg);
        assert_eq!(first.id, second.id);
        assert_eq!(second.total_working_days, 24.5);
    }
}
