use serde::Serialize;
use utoipa::ToSchema;

use crate::engine::aggregate::MonthlyAggregate;
use crate::model::payroll::{AdjustmentType, PayrollAdjustment};

/// Salary is prorated over a fixed 30-day month.
pub const PAYROLL_MONTH_DAYS: f64 = 30.0;

/// Computed payroll for one employee and month. Amounts are unrounded;
/// rounding to two decimals happens only when shaping the response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, ToSchema)]
pub struct PayrollLine {
    pub salary: f64,
    pub daily_rate: f64,
    pub total_working_days: f64,
    pub base_payroll: f64,
    pub incentives: f64,
    pub reductions: f64,
    pub net_payroll: f64,
}

/// Applies the daily-rate formula to a monthly aggregate plus manual
/// adjustments. Paid leave is already credited inside the aggregate's
/// `total_working_days`, so it is not added again here.
pub fn compute_payroll(
    salary: Option<f64>,
    aggregate: &MonthlyAggregate,
    adjustments: &[PayrollAdjustment],
) -> PayrollLine {
    let salary = salary.unwrap_or(0.0);
    let daily_rate = if salary > 0.0 { salary / PAYROLL_MONTH_DAYS } else { 0.0 };
    let base_payroll = daily_rate * aggregate.total_working_days;

    let mut incentives = 0.0;
    let mut reductions = 0.0;
    for adj in adjustments {
        match adj.adjustment_type {
            AdjustmentType::Incentive => incentives += adj.amount,
            AdjustmentType::Reduction => reductions += adj.amount,
        }
    }

    PayrollLine {
        salary,
        daily_rate,
        total_working_days: aggregate.total_working_days,
        base_payroll,
        incentives,
        reductions,
        net_payroll: base_payroll + incentives - reductions,
    }
}

/// Two-decimal rounding for response shaping.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn aggregate(total_working_days: f64) -> MonthlyAggregate {
        MonthlyAggregate { total_working_days, ..MonthlyAggregate::default() }
    }

    fn adjustment(kind: AdjustmentType, amount: f64) -> PayrollAdjustment {
        PayrollAdjustment {
            id: 1,
            employee_id: 1,
            year: 2026,
            month: 6,
            adjustment_type: kind,
            amount,
            reason: "adjustment".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn base_is_daily_rate_times_total_working_days() {
        let line = compute_payroll(Some(45000.0), &aggregate(26.5), &[]);
        assert_eq!(line.daily_rate, 1500.0);
        assert_eq!(line.base_payroll, 1500.0 * 26.5);
        assert_eq!(line.net_payroll, line.base_payroll);
    }

    #[test]
    fn adjustments_apply_after_base() {
        let adjustments = [
            adjustment(AdjustmentType::Incentive, 800.0),
            adjustment(AdjustmentType::Incentive, 200.0),
            adjustment(AdjustmentType::Reduction, 150.0),
        ];
        let line = compute_payroll(Some(30000.0), &aggregate(30.0), &adjustments);
        assert_eq!(line.incentives, 1000.0);
        assert_eq!(line.reductions, 150.0);
        assert_eq!(line.net_payroll, 30000.0 + 1000.0 - 150.0);
    }

    #[test]
    fn missing_salary_yields_zero_base() {
        let line = compute_payroll(None, &aggregate(26.0), &[]);
        assert_eq!(line.daily_rate, 0.0);
        assert_eq!(line.base_payroll, 0.0);
    }

    #[test]
    fn rounding_only_at_presentation() {
        // 1000/30 is periodic; the raw line keeps full precision.
        let line = compute_payroll(Some(1000.0), &aggregate(1.0), &[]);
        assert!(line.base_payroll != round2(line.base_payroll));
        assert_eq!(round2(line.base_payroll), 33.33);
    }
}
