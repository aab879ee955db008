use std::collections::BTreeSet;

use chrono::Datelike;

use crate::engine::calendar::MonthCalendar;
use crate::model::{leave_request::LeaveRequest, status::RequestStatus};

/// Expands approved leave requests into the set of day numbers of the month
/// credited as paid leave.
///
/// Sundays and declared holidays inside an approved range are excluded:
/// those days classify as Holiday and must not be double-counted.
pub fn paid_leave_days(
    leaves: &[LeaveRequest],
    employee_id: u64,
    cal: &MonthCalendar,
) -> BTreeSet<u32> {
    let month_start = cal.date(1);
    let month_end = cal.date(cal.days_in_month);

    let mut days = BTreeSet::new();
    for leave in leaves {
        if leave.employee_id != employee_id || leave.status != RequestStatus::Approved {
            continue;
        }
        if leave.start_date > month_end || leave.end_date < month_start {
            continue;
        }
        let from = leave.start_date.max(month_start);
        let to = leave.end_date.min(month_end);
        let mut current = from;
        while current <= to {
            let day = current.day();
            if !cal.is_non_working(day) {
                days.insert(day);
            }
            match current.succ_opt() {
                Some(next) => current = next,
                None => break,
            }
        }
    }
    days
}
