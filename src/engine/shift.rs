use chrono::{Duration, NaiveDate, NaiveTime};

use crate::model::{employee::Employee, shift::ShiftHistory};

/// Organization-wide fallback shift, supplied by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultShift {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Shift timings applicable to one employee for one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedShift {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl ResolvedShift {
    /// Expected departure time for a given day. Saturdays run a shortened
    /// shift ending four hours after the start; `end` is ignored there.
    pub fn end_for(&self, is_saturday: bool) -> NaiveTime {
        if is_saturday { saturday_end(self.start) } else { self.end }
    }
}

pub fn saturday_end(start: NaiveTime) -> NaiveTime {
    start + Duration::hours(4)
}

/// Resolves the shift for `employee` in the month starting `month_start`:
/// latest history entry effective on or before the month start, then the
/// employee's own shift fields, then the configured default.
pub fn resolve_shift(
    employee: &Employee,
    history: &[ShiftHistory],
    month_start: NaiveDate,
    default: DefaultShift,
) -> ResolvedShift {
    let applicable = history
        .iter()
        .filter(|h| h.employee_id == employee.id && h.effective_from <= month_start)
        .max_by_key(|h| h.effective_from);

    if let Some(entry) = applicable {
        return ResolvedShift { start: entry.shift_start, end: entry.shift_end };
    }

    if let (Some(start), Some(end)) = (employee.shift_start, employee.shift_end) {
        return ResolvedShift { start, end };
    }

    ResolvedShift { start: default.start, end: default.end }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn default_shift() -> DefaultShift {
        DefaultShift { start: t(10, 0), end: t(19, 0) }
    }

    fn employee(shift: Option<(NaiveTime, NaiveTime)>) -> Employee {
        Employee {
            id: 1,
            person_id: "1024".into(),
            name: "Ayesha Rahman".into(),
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
            shift_start: shift.map(|s| s.0),
            shift_end: shift.map(|s| s.1),
        }
    }

    fn entry(id: u64, start: NaiveTime, end: NaiveTime, from: NaiveDate) -> ShiftHistory {
        ShiftHistory { id, employee_id: 1, shift_start: start, shift_end: end, effective_from: from }
    }

    #[test]
    fn prefers_latest_history_entry_on_or_before_month_start() {
        let history = vec![
            entry(1, t(9, 0), t(18, 0), d(2026, 1, 1)),
            entry(2, t(9, 30), t(18, 30), d(2026, 3, 1)),
            entry(3, t(8, 0), t(17, 0), d(2026, 7, 1)),
        ];
        let shift = resolve_shift(&employee(None), &history, d(2026, 4, 1), default_shift());
        assert_eq!(shift, ResolvedShift { start: t(9, 30), end: t(18, 30) });
    }

    #[test]
    fn entry_effective_on_month_start_applies() {
        let history = vec![entry(1, t(9, 0), t(18, 0), d(2026, 4, 1))];
        let shift = resolve_shift(&employee(None), &history, d(2026, 4, 1), default_shift());
        assert_eq!(shift.start, t(9, 0));
    }

    #[test]
    fn falls_back_to_employee_shift_fields() {
        let history = vec![entry(1, t(9, 0), t(18, 0), d(2026, 7, 1))];
        let shift = resolve_shift(
            &employee(Some((t(11, 0), t(20, 0)))),
            &history,
            d(2026, 4, 1),
            default_shift(),
        );
        assert_eq!(shift, ResolvedShift { start: t(11, 0), end: t(20, 0) });
    }

    #[test]
    fn falls_back_to_configured_default() {
        let shift = resolve_shift(&employee(None), &[], d(2026, 4, 1), default_shift());
        assert_eq!(shift, ResolvedShift { start: t(10, 0), end: t(19, 0) });
    }

    #[test]
    fn other_employees_history_is_ignored() {
        let mut foreign = entry(1, t(7, 0), t(16, 0), d(2026, 1, 1));
        foreign.employee_id = 99;
        let shift = resolve_shift(&employee(None), &[foreign], d(2026, 4, 1), default_shift());
        assert_eq!(shift.start, t(10, 0));
    }

    #[test]
    fn saturday_end_is_start_plus_four_hours_ignoring_shift_end() {
        let shift = ResolvedShift { start: t(9, 30), end: t(18, 30) };
        assert_eq!(shift.end_for(true), t(13, 30));
        assert_eq!(shift.end_for(false), t(18, 30));
    }
}
