use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use utoipa::ToSchema;

use crate::engine::calendar::MonthCalendar;
use crate::engine::classify::{self, DayClass, PunchSignal};
use crate::engine::shift::ResolvedShift;
use crate::model::status::DayStatus;

/// Monthly roll-up of daily classifications for an on-site employee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct MonthlyAggregate {
    /// Days with a non-zero punch signal.
    pub working_days: u32,
    pub full_days: u32,
    pub half_days: u32,
    pub late_days: u32,
    /// Unpaid absences: expected working days without signal, minus paid
    /// leave, floored at zero.
    pub leave_days: u32,
    pub paid_leave_days: u32,
    pub holidays: u32,
    /// full + 0.5*half + holidays + paid leave.
    pub total_working_days: f64,
}

/// Monthly roll-up for a remote employee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct RemoteMonthlyAggregate {
    pub present_days: u32,
    pub half_days: u32,
    pub absent_days: u32,
    pub holidays: u32,
    pub total_calls: u32,
    pub total_talk_secs: i64,
    pub total_working_days: f64,
}

/// One day's call signal as fed to the remote aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSignal {
    pub status: DayStatus,
    pub answered_calls: u32,
    pub total_talk_secs: i64,
}

/// Classifies every day of the month and folds the results.
pub fn build_onsite_month(
    cal: &MonthCalendar,
    shift: &ResolvedShift,
    paid_leave: &BTreeSet<u32>,
    signals: &BTreeMap<u32, PunchSignal>,
) -> (BTreeMap<u32, DayClass>, MonthlyAggregate) {
    let mut classes = BTreeMap::new();
    for day in 1..=cal.days_in_month {
        if let Some(class) =
            classify::classify_onsite_day(day, cal, shift, paid_leave, signals.get(&day))
        {
            classes.insert(day, class);
        }
    }
    let aggregate = aggregate_onsite(cal, &classes);
    (classes, aggregate)
}

/// Folds pre-classified on-site days into the monthly aggregate.
pub fn aggregate_onsite(
    cal: &MonthCalendar,
    classes: &BTreeMap<u32, DayClass>,
) -> MonthlyAggregate {
    let mut agg = MonthlyAggregate::default();

    for (&day, class) in classes {
        match class.status {
            DayStatus::Present => {
                agg.working_days += 1;
                agg.full_days += 1;
            }
            DayStatus::Late => {
                agg.working_days += 1;
                agg.full_days += 1;
                agg.late_days += 1;
            }
            DayStatus::HalfDay => {
                agg.working_days += 1;
                agg.half_days += 1;
                if class.is_late {
                    agg.late_days += 1;
                }
            }
            DayStatus::Absent => {}
            DayStatus::Holiday => {
                if day <= cal.cutoff_day {
                    agg.holidays += 1;
                }
            }
            DayStatus::PaidLeave => agg.paid_leave_days += 1,
        }
    }

    agg.leave_days = cal
        .expected_working_days()
        .saturating_sub(agg.working_days)
        .saturating_sub(agg.paid_leave_days);

    agg.total_working_days = f64::from(agg.full_days)
        + 0.5 * f64::from(agg.half_days)
        + f64::from(agg.holidays)
        + f64::from(agg.paid_leave_days);

    agg
}

/// Classifies every remote day of the month and folds the results.
pub fn build_remote_month(
    cal: &MonthCalendar,
    signals: &BTreeMap<u32, CallSignal>,
) -> (BTreeMap<u32, DayStatus>, RemoteMonthlyAggregate) {
    let mut classes = BTreeMap::new();
    for day in 1..=cal.days_in_month {
        let record_status = signals.get(&day).map(|s| s.status);
        if let Some(status) = classify::classify_remote_day(day, cal, record_status) {
            classes.insert(day, status);
        }
    }

    let mut agg = RemoteMonthlyAggregate::default();
    for (&day, status) in &classes {
        match status {
            DayStatus::Present => agg.present_days += 1,
            DayStatus::HalfDay => agg.half_days += 1,
            DayStatus::Absent => agg.absent_days += 1,
            DayStatus::Holiday => {
                if day <= cal.cutoff_day {
                    agg.holidays += 1;
                }
            }
            _ => {}
        }
    }

    // Call totals exclude records landing on non-working days.
    for (&day, signal) in signals {
        if !cal.is_non_working(day) {
            agg.total_calls += signal.answered_calls;
            agg.total_talk_secs += signal.total_talk_secs;
        }
    }

    agg.total_working_days = f64::from(agg.present_days)
        + 0.5 * f64::from(agg.half_days)
        + f64::from(agg.holidays);

    (classes, agg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
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

    /// Past month June 2026 evaluated from mid-July: cutoff covers the
    /// whole month. Sundays 7/14/21/28, declared holiday on the 10th.
    fn june() -> MonthCalendar {
        MonthCalendar::build(2026, 6, &[d(2026, 6, 10)], d(2026, 7, 15)).unwrap()
    }

    #[test]
    fn aggregates_mixed_month() {
        let cal = june();
        let mut signals = BTreeMap::new();
        signals.insert(1, punches((9, 55), (19, 10))); // present
        signals.insert(2, punches((10, 5), (19, 10))); // late, full day
        signals.insert(3, punches((12, 30), (19, 10))); // half day, also late
        signals.insert(4, punches((9, 50), (16, 0))); // half day, on time
        signals.insert(5, PunchSignal { first_in: Some(t(10, 0)), last_out: None, work_secs: 0 });
        let paid = BTreeSet::from([11, 12]);

        let (classes, agg) = build_onsite_month(&cal, &shift(), &paid, &signals);

        assert_eq!(agg.working_days, 4);
        assert_eq!(agg.full_days, 2);
        assert_eq!(agg.half_days, 2);
        assert_eq!(agg.late_days, 2);
        assert_eq!(agg.paid_leave_days, 2);
        // 4 Sundays + 1 declared holiday.
        assert_eq!(agg.holidays, 5);
        // 25 expected - 4 with signal - 2 paid leave.
        assert_eq!(agg.leave_days, 19);
        assert_eq!(agg.total_working_days, 2.0 + 1.0 + 5.0 + 2.0);

        assert_eq!(classes.get(&5).unwrap().status, DayStatus::Absent);
        assert_eq!(classes.get(&11).unwrap().status, DayStatus::PaidLeave);
    }

    #[test]
    fn paid_leave_excluded_from_leave_and_holiday_buckets() {
        let cal = june();
        // Leave covering 11th and 12th, no punches at all.
        let paid = BTreeSet::from([11, 12]);
        let (classes, agg) = build_onsite_month(&cal, &shift(), &paid, &BTreeMap::new());

        assert_eq!(agg.paid_leave_days, 2);
        assert_eq!(agg.holidays, 5);
        assert_eq!(agg.leave_days, 25 - 2);
        // Buckets are mutually exclusive per day.
        assert_eq!(classes.get(&11).unwrap().status, DayStatus::PaidLeave);
        assert!(classes.values().filter(|c| c.status == DayStatus::PaidLeave).count() == 2);
    }

    #[test]
    fn aggregate_is_idempotent() {
        let cal = june();
        let mut signals = BTreeMap::new();
        signals.insert(1, punches((9, 55), (19, 10)));
        signals.insert(2, punches((12, 30), (18, 0)));
        let paid = BTreeSet::from([3]);

        let (_, first) = build_onsite_month(&cal, &shift(), &paid, &signals);
        let (_, second) = build_onsite_month(&cal, &shift(), &paid, &signals);
        assert_eq!(first, second);
    }

    #[test]
    fn total_working_days_monotone_in_each_bucket() {
        let base = MonthlyAggregate {
            working_days: 10,
            full_days: 8,
            half_days: 2,
            late_days: 1,
            leave_days: 3,
            paid_leave_days: 1,
            holidays: 4,
            total_working_days: 0.0,
        };
        let total = |a: &MonthlyAggregate| {
            f64::from(a.full_days)
                + 0.5 * f64::from(a.half_days)
                + f64::from(a.holidays)
                + f64::from(a.paid_leave_days)
        };

        let reference = total(&base);
        for bump in [
            MonthlyAggregate { full_days: base.full_days + 1, ..base },
            MonthlyAggregate { half_days: base.half_days + 1, ..base },
            MonthlyAggregate { holidays: base.holidays + 1, ..base },
            MonthlyAggregate { paid_leave_days: base.paid_leave_days + 1, ..base },
        ] {
            assert!(total(&bump) > reference);
        }
    }

    #[test]
    fn future_month_counts_nothing() {
        let cal = MonthCalendar::build(2026, 9, &[], d(2026, 6, 17)).unwrap();
        let (classes, agg) = build_onsite_month(&cal, &shift(), &BTreeSet::new(), &BTreeMap::new());

        assert_eq!(agg, MonthlyAggregate::default());
        // Sundays still render as holidays, but count for nothing.
        assert!(classes.values().all(|c| c.status == DayStatus::Holiday));
    }

    #[test]
    fn remote_month_folds_statuses_and_totals() {
        let cal = june();
        let mut signals = BTreeMap::new();
        signals.insert(1, CallSignal { status: DayStatus::Present, answered_calls: 30, total_talk_secs: 95 * 60 });
        signals.insert(2, CallSignal { status: DayStatus::HalfDay, answered_calls: 12, total_talk_secs: 50 * 60 });
        signals.insert(3, CallSignal { status: DayStatus::Absent, answered_calls: 2, total_talk_secs: 10 * 60 });
        // Sunday record: classified holiday, excluded from totals.
        signals.insert(7, CallSignal { status: DayStatus::Holiday, answered_calls: 9, total_talk_secs: 3600 });

        let (classes, agg) = build_remote_month(&cal, &signals);

        assert_eq!(agg.present_days, 1);
        assert_eq!(agg.half_days, 1);
        assert_eq!(classes.get(&7), Some(&DayStatus::Holiday));
        // Absent: one thresholded record + 21 signal-less working days.
        assert_eq!(agg.absent_days, 1 + (25 - 3));
        assert_eq!(agg.holidays, 5);
        assert_eq!(agg.total_calls, 44);
        assert_eq!(agg.total_talk_secs, (95 + 50 + 10) * 60);
        assert_eq!(agg.total_working_days, 1.0 + 0.5 + 5.0);
    }
}
