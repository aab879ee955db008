use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};

use crate::engine::calendar::MonthCalendar;
use crate::engine::shift::ResolvedShift;
use crate::model::status::DayStatus;

/// One day's raw punch signal for an on-site employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PunchSignal {
    pub first_in: Option<NaiveTime>,
    pub last_out: Option<NaiveTime>,
    pub work_secs: i64,
}

/// Classification of one day, with the independent lateness flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayClass {
    pub status: DayStatus,
    pub is_late: bool,
}

impl DayClass {
    fn plain(status: DayStatus) -> Self {
        DayClass { status, is_late: false }
    }
}

/// Classifies one on-site day. Precedence: paid leave, then holiday, then
/// the punch signal, then absence up to the evaluation cutoff. Days past
/// the cutoff with no signal stay unclassified.
pub fn classify_onsite_day(
    day: u32,
    cal: &MonthCalendar,
    shift: &ResolvedShift,
    paid_leave: &BTreeSet<u32>,
    signal: Option<&PunchSignal>,
) -> Option<DayClass> {
    if paid_leave.contains(&day) {
        return Some(DayClass::plain(DayStatus::PaidLeave));
    }
    if cal.is_non_working(day) {
        return Some(DayClass::plain(DayStatus::Holiday));
    }

    if let Some(signal) = signal {
        // A record whose punches net out to nothing is an absence, not a
        // presence.
        if signal.work_secs <= 0 {
            return Some(DayClass::plain(DayStatus::Absent));
        }

        let is_late = signal.first_in.is_some_and(|t| t > shift.start);
        let arrived_after_noon = signal.first_in.is_some_and(|t| t.hour() >= 12);
        let expected_end = shift.end_for(cal.is_saturday(day));
        let left_early = signal.last_out.is_some_and(|t| t < expected_end);

        let status = if arrived_after_noon || left_early {
            DayStatus::HalfDay
        } else if is_late {
            DayStatus::Late
        } else {
            DayStatus::Present
        };
        return Some(DayClass { status, is_late });
    }

    if day <= cal.cutoff_day {
        return Some(DayClass::plain(DayStatus::Absent));
    }
    None
}

/// Classifies one remote day from the record's derived status.
/// Sundays and declared holidays take precedence over any record.
pub fn classify_remote_day(
    day: u32,
    cal: &MonthCalendar,
    record_status: Option<DayStatus>,
) -> Option<DayStatus> {
    if cal.is_non_working(day) {
        return Some(DayStatus::Holiday);
    }
    if let Some(status) = record_status {
        return Some(status);
    }
    if day <= cal.cutoff_day {
        return Some(DayStatus::Absent);
    }
    None
}

/// Derives the attendance status stored on a remote call record.
///
/// Talk-duration thresholds by weekday:
/// Mon-Thu: <45 min absent, 45-89 half day, >=90 present.
/// Fri: <30 absent, 30-59 half day, >=60 present.
/// Sat: <21 absent, 21-44 half day, >=45 present.
/// Sun: non-working; the threshold table is never consulted.
pub fn remote_call_status(date: NaiveDate, total_talk_secs: i64) -> DayStatus {
    if date.weekday() == Weekday::Sun {
        return DayStatus::Holiday;
    }

    let talk_minutes = total_talk_secs / 60;
    let (present_min, half_min) = match date.weekday() {
        Weekday::Fri => (60, 30),
        Weekday::Sat => (45, 21),
        _ => (90, 45),
    };

    if talk_minutes >= present_min {
        DayStatus::Present
    } else if talk_minutes >= half_min {
        DayStatus::HalfDay
    } else {
        DayStatus::Absent
    }
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

    fn shift() -> ResolvedShift {
        ResolvedShift { start: t(10, 0), end: t(19, 0) }
    }

    fn punches(fi: (u32, u32), lo: (u32, u32)) -> PunchSignal {
        let first_in = t(fi.0, fi.1);
        let last_out = t(lo.0, lo.1);
        PunchSignal {
            first_in: Some(first_in),
            last_out: Some(last_out),
            work_secs: (last_out - first_in).num_seconds().max(0),
        }
    }

    /// June 2026, today 2026-06-17. Sundays: 7/14/21/28; Saturdays: 6/13/20/27.
    fn cal() -> MonthCalendar {
        MonthCalendar::build(2026, 6, &[d(2026, 6, 10)], d(2026, 6, 17)).unwrap()
    }

    fn classify(day: u32, signal: Option<&PunchSignal>) -> Option<DayClass> {
        classify_onsite_day(day, &cal(), &shift(), &BTreeSet::new(), signal)
    }

    #[test]
    fn on_time_full_day_is_present() {
        // Monday 2026-06-01, in 09:55 out 19:10.
        let class = classify(1, Some(&punches((9, 55), (19, 10)))).unwrap();
        assert_eq!(class.status, DayStatus::Present);
        assert!(!class.is_late);
    }

    #[test]
    fn late_arrival_is_late_but_a_full_day() {
        let class = classify(1, Some(&punches((10, 5), (19, 10)))).unwrap();
        assert_eq!(class.status, DayStatus::Late);
        assert!(class.is_late);
    }

    #[test]
    fn arrival_after_noon_is_half_day_and_independently_late() {
        let class = classify(1, Some(&punches((12, 30), (19, 10)))).unwrap();
        assert_eq!(class.status, DayStatus::HalfDay);
        // 12:30 is after the 10:00 shift start, so the late flag holds too.
        assert!(class.is_late);
    }

    #[test]
    fn noon_arrival_with_noon_shift_is_half_day_but_not_late() {
        let noon_shift = ResolvedShift { start: t(13, 0), end: t(21, 0) };
        let class = classify_onsite_day(
            1,
            &cal(),
            &noon_shift,
            &BTreeSet::new(),
            Some(&punches((12, 30), (21, 5))),
        )
        .unwrap();
        assert_eq!(class.status, DayStatus::HalfDay);
        assert!(!class.is_late);
    }

    #[test]
    fn early_departure_is_half_day() {
        let class = classify(1, Some(&punches((9, 50), (16, 0)))).unwrap();
        assert_eq!(class.status, DayStatus::HalfDay);
        assert!(!class.is_late);
    }

    #[test]
    fn zero_duration_record_is_absent() {
        let signal = PunchSignal { first_in: Some(t(10, 0)), last_out: None, work_secs: 0 };
        let class = classify(1, Some(&signal)).unwrap();
        assert_eq!(class.status, DayStatus::Absent);
    }

    #[test]
    fn saturday_uses_shortened_end() {
        // Saturday 2026-06-06, shift start 10:00 -> expected end 14:00.
        let class = classify(6, Some(&punches((9, 55), (14, 5)))).unwrap();
        assert_eq!(class.status, DayStatus::Present);

        let class = classify(6, Some(&punches((9, 55), (13, 30)))).unwrap();
        assert_eq!(class.status, DayStatus::HalfDay);
    }

    #[test]
    fn sunday_and_declared_holiday_win_over_punches() {
        let class = classify(7, Some(&punches((10, 0), (19, 0)))).unwrap();
        assert_eq!(class.status, DayStatus::Holiday);

        let class = classify(10, Some(&punches((10, 0), (19, 0)))).unwrap();
        assert_eq!(class.status, DayStatus::Holiday);
    }

    #[test]
    fn paid_leave_wins_over_absence() {
        let paid = BTreeSet::from([3]);
        let class = classify_onsite_day(3, &cal(), &shift(), &paid, None).unwrap();
        assert_eq!(class.status, DayStatus::PaidLeave);
    }

    #[test]
    fn missing_signal_is_absent_only_up_to_cutoff() {
        assert_eq!(classify(16, None).unwrap().status, DayStatus::Absent);
        assert_eq!(classify(17, None).unwrap().status, DayStatus::Absent);
        // Future days stay unclassified.
        assert_eq!(classify(18, None), None);
        assert_eq!(classify(30, None), None);
    }

    #[test]
    fn future_sunday_still_shows_as_holiday() {
        assert_eq!(classify(28, None).unwrap().status, DayStatus::Holiday);
    }

    #[test]
    fn remote_weekday_thresholds() {
        // Monday 2026-06-01.
        let monday = d(2026, 6, 1);
        assert_eq!(remote_call_status(monday, 44 * 60), DayStatus::Absent);
        assert_eq!(remote_call_status(monday, 45 * 60), DayStatus::HalfDay);
        assert_eq!(remote_call_status(monday, 89 * 60), DayStatus::HalfDay);
        assert_eq!(remote_call_status(monday, 90 * 60), DayStatus::Present);
    }

    #[test]
    fn remote_friday_thresholds() {
        // Friday 2026-06-05.
        let friday = d(2026, 6, 5);
        assert_eq!(remote_call_status(friday, 10 * 60), DayStatus::Absent);
        assert_eq!(remote_call_status(friday, 35 * 60), DayStatus::HalfDay);
        assert_eq!(remote_call_status(friday, 61 * 60), DayStatus::Present);
    }

    #[test]
    fn remote_saturday_thresholds() {
        // Saturday 2026-06-06.
        let saturday = d(2026, 6, 6);
        assert_eq!(remote_call_status(saturday, 20 * 60), DayStatus::Absent);
        assert_eq!(remote_call_status(saturday, 21 * 60), DayStatus::HalfDay);
        assert_eq!(remote_call_status(saturday, 45 * 60), DayStatus::Present);
    }

    #[test]
    fn remote_sunday_is_holiday_never_thresholded() {
        // Sunday 2026-06-07, even with hours of talk time.
        let sunday = d(2026, 6, 7);
        assert_eq!(remote_call_status(sunday, 5 * 3600), DayStatus::Holiday);
        assert_eq!(remote_call_status(sunday, 0), DayStatus::Holiday);
    }

    #[test]
    fn remote_day_classification_follows_calendar_first() {
        let cal = cal();
        // Record on a Sunday is reported as holiday.
        assert_eq!(
            classify_remote_day(7, &cal, Some(DayStatus::Present)),
            Some(DayStatus::Holiday)
        );
        // Declared holiday wins over a thresholded status.
        assert_eq!(
            classify_remote_day(10, &cal, Some(DayStatus::HalfDay)),
            Some(DayStatus::Holiday)
        );
        // No record: absent up to the cutoff, unclassified beyond.
        assert_eq!(classify_remote_day(15, &cal, None), Some(DayStatus::Absent));
        assert_eq!(classify_remote_day(25, &cal, None), None);
    }
}
