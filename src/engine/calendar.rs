use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};

/// Calendar context for one month: Sundays, declared holidays and the
/// evaluation cutoff that separates classifiable days from future ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    pub days_in_month: u32,
    /// Last day eligible for classification: today's day-of-month for the
    /// current month, the full month for past months, 0 for future months.
    pub cutoff_day: u32,
    holiday_days: BTreeSet<u32>,
}

impl MonthCalendar {
    /// Builds the calendar for `year`/`month`. Returns `None` for an
    /// invalid month number.
    pub fn build(
        year: i32,
        month: u32,
        holidays: &[NaiveDate],
        today: NaiveDate,
    ) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let days_in_month = days_in_month(year, month)?;

        let cutoff_day = if (year, month) == (today.year(), today.month()) {
            today.day()
        } else if first < today {
            days_in_month
        } else {
            0
        };

        let holiday_days = holidays
            .iter()
            .filter(|d| d.year() == year && d.month() == month)
            .map(|d| d.day())
            .collect();

        Some(MonthCalendar {
            year,
            month,
            days_in_month,
            cutoff_day,
            holiday_days,
        })
    }

    pub fn date(&self, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, day).expect("day within month")
    }

    pub fn is_sunday(&self, day: u32) -> bool {
        self.date(day).weekday() == Weekday::Sun
    }

    pub fn is_saturday(&self, day: u32) -> bool {
        self.date(day).weekday() == Weekday::Sat
    }

    pub fn is_declared_holiday(&self, day: u32) -> bool {
        self.holiday_days.contains(&day)
    }

    /// Sunday or declared holiday.
    pub fn is_non_working(&self, day: u32) -> bool {
        self.is_sunday(day) || self.is_declared_holiday(day)
    }

    /// Sundays plus declared holidays from day 1 through the cutoff.
    pub fn holidays_until_cutoff(&self) -> u32 {
        (1..=self.cutoff_day).filter(|&d| self.is_non_working(d)).count() as u32
    }

    /// Days through the cutoff that are neither Sunday nor holiday.
    pub fn expected_working_days(&self) -> u32 {
        self.cutoff_day - self.holidays_until_cutoff()
    }
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_y, next_m) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    Some(NaiveDate::from_ymd_opt(next_y, next_m, 1)?.pred_opt()?.day())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn rejects_invalid_month() {
        assert!(MonthCalendar::build(2026, 13, &[], d(2026, 6, 1)).is_none());
        assert!(MonthCalendar::build(2026, 0, &[], d(2026, 6, 1)).is_none());
    }

    #[test]
    fn cutoff_is_today_for_current_month() {
        let cal = MonthCalendar::build(2026, 6, &[], d(2026, 6, 17)).unwrap();
        assert_eq!(cal.cutoff_day, 17);
    }

    #[test]
    fn cutoff_is_month_end_for_past_month() {
        let cal = MonthCalendar::build(2026, 4, &[], d(2026, 6, 17)).unwrap();
        assert_eq!(cal.cutoff_day, 30);
        assert_eq!(cal.days_in_month, 30);
    }

    #[test]
    fn cutoff_is_zero_for_future_month() {
        let cal = MonthCalendar::build(2026, 9, &[], d(2026, 6, 17)).unwrap();
        assert_eq!(cal.cutoff_day, 0);
        assert_eq!(cal.expected_working_days(), 0);
    }

    #[test]
    fn leap_february_has_29_days() {
        let cal = MonthCalendar::build(2024, 2, &[], d(2026, 1, 1)).unwrap();
        assert_eq!(cal.days_in_month, 29);
    }

    #[test]
    fn non_working_merges_sundays_and_declared_holidays() {
        // June 2026: Sundays fall on 7, 14, 21, 28.
        let holidays = [d(2026, 6, 10), d(2026, 7, 1)];
        let cal = MonthCalendar::build(2026, 6, &holidays, d(2026, 7, 5)).unwrap();

        assert!(cal.is_sunday(7));
        assert!(cal.is_non_working(7));
        assert!(cal.is_declared_holiday(10));
        assert!(cal.is_non_working(10));
        assert!(!cal.is_non_working(11));
        // Holiday in another month is ignored.
        assert_eq!(cal.holidays_until_cutoff(), 5);
        assert_eq!(cal.expected_working_days(), 30 - 5);
    }

    #[test]
    fn holiday_counts_stop_at_cutoff() {
        // Current month June 2026, today the 8th: only Sunday the 7th counts.
        let holidays = [d(2026, 6, 10)];
        let cal = MonthCalendar::build(2026, 6, &holidays, d(2026, 6, 8)).unwrap();
        assert_eq!(cal.holidays_until_cutoff(), 1);
        assert_eq!(cal.expected_working_days(), 7);
    }

    #[test]
    fn holiday_on_sunday_is_not_double_counted() {
        // 2026-06-07 is a Sunday; declaring it a holiday must not count twice.
        let holidays = [d(2026, 6, 7)];
        let cal = MonthCalendar::build(2026, 6, &holidays, d(2026, 6, 8)).unwrap();
        assert_eq!(cal.holidays_until_cutoff(), 1);
    }
}
