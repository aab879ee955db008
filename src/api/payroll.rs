use actix_web::{HttpResponse, web};
use chrono::{Datelike, Local, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::config::Config;
use crate::engine::calendar::MonthCalendar;
use crate::engine::payroll::{compute_payroll, round2};
use crate::error::AppError;
use crate::model::employee::Department;
use crate::model::payroll::{AdjustmentType, PayrollAdjustment};
use crate::store::AppStore;
use crate::utils::summary_cache::ONSITE_SUMMARY_CACHE;

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct PayrollQuery {
    /// Defaults to the current year
    #[schema(example = 2026)]
    pub year: Option<i32>,

    /// Defaults to the current month
    #[schema(example = 6)]
    pub month: Option<u32>,
}

/// One employee's computed payroll, rounded for presentation.
#[derive(Serialize, ToSchema)]
pub struct PayrollLineResponse {
    pub employee_id: u64,
    pub name: String,
    pub salary: f64,
    pub daily_rate: f64,
    pub total_working_days: f64,
    pub base_payroll: f64,
    pub incentives: f64,
    pub reductions: f64,
    pub net_payroll: f64,
    pub full_days: u32,
    pub half_days: u32,
    pub holidays: u32,
    pub paid_leave_days: u32,
}

#[derive(Serialize, ToSchema)]
pub struct PayrollDashboardResponse {
    pub year: i32,
    pub month: u32,
    pub lines: Vec<PayrollLineResponse>,
    pub total_net_payroll: f64,
    pub total_incentives: f64,
    pub total_reductions: f64,
    pub total_holidays: u32,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateAdjustment {
    #[schema(example = 1)]
    pub employee_id: u64,

    #[schema(example = 2026)]
    pub year: i32,

    #[schema(example = 6, minimum = 1, maximum = 12)]
    pub month: u32,

    #[schema(example = "incentive")]
    pub adjustment_type: AdjustmentType,

    #[schema(example = 500.0)]
    pub amount: f64,

    #[schema(example = "Quarterly sales incentive")]
    #[serde(default)]
    pub reason: String,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct AdjustmentQuery {
    #[schema(example = 1)]
    pub employee_id: u64,

    /// Defaults to the current year
    pub year: Option<i32>,

    /// Defaults to the current month
    pub month: Option<u32>,
}

/* =========================
Payroll dashboard
========================= */

/// Computed payroll applies to the Admin department; other departments are
/// settled outside this system.
#[utoipa::path(
    get,
    path = "/api/payroll",
    params(PayrollQuery),
    responses(
        (status = 200, body = PayrollDashboardResponse),
        (status = 400, description = "Invalid month")
    ),
    tag = "Payroll"
)]
pub async fn payroll_dashboard(
    store: web::Data<AppStore>,
    config: web::Data<Config>,
    query: web::Query<PayrollQuery>,
) -> Result<HttpResponse, AppError> {
    let today = Local::now().date_naive();
    let year = query.year.unwrap_or_else(|| today.year());
    let month = query.month.unwrap_or_else(|| today.month());

    let calendar = MonthCalendar::build(year, month, &store.holiday_dates(), today)
        .ok_or_else(|| AppError::validation("month must be between 1 and 12"))?;

    let admins: Vec<_> = store
        .list_employees(false, None)
        .into_iter()
        .filter(|e| e.department == Some(Department::Admin))
        .collect();

    let mut lines = Vec::with_capacity(admins.len());
    let mut total_net = 0.0;
    let mut total_incentives = 0.0;
    let mut total_reductions = 0.0;

    for employee in admins {
        let key = (employee.id, year, month);
        let aggregate = ONSITE_SUMMARY_CACHE
            .try_get_with(key, async {
                store
                    .onsite_month(employee.id, year, month, today, config.default_shift())
                    .map(|data| data.aggregate)
            })
            .await
            .map_err(|e| {
                tracing::error!(error = %e, employee_id = employee.id, "Payroll aggregate failed");
                AppError::Internal
            })?;

        let adjustments = store.adjustments_for(employee.id, year, month);
        let line = compute_payroll(employee.salary, &aggregate, &adjustments);

        total_net += line.net_payroll;
        total_incentives += line.incentives;
        total_reductions += line.reductions;

        lines.push(PayrollLineResponse {
            employee_id: employee.id,
            name: employee.name,
            salary: line.salary,
            daily_rate: round2(line.daily_rate),
            total_working_days: line.total_working_days,
            base_payroll: round2(line.base_payroll),
            incentives: round2(line.incentives),
            reductions: round2(line.reductions),
            net_payroll: round2(line.net_payroll),
            full_days: aggregate.full_days,
            half_days: aggregate.half_days,
            holidays: aggregate.holidays,
            paid_leave_days: aggregate.paid_leave_days,
        });
    }

    Ok(HttpResponse::Ok().json(PayrollDashboardResponse {
        year,
        month,
        lines,
        total_net_payroll: round2(total_net),
        total_incentives: round2(total_incentives),
        total_reductions: round2(total_reductions),
        total_holidays: calendar.holidays_until_cutoff(),
    }))
}

/* =========================
Adjustments
========================= */

#[utoipa::path(
    post,
    path = "/api/payroll/adjustments",
    request_body = CreateAdjustment,
    responses(
        (status = 201, description = "Adjustment added", body = PayrollAdjustment),
        (status = 400, description = "Bad request"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Payroll"
)]
pub async fn add_adjustment(
    store: web::Data<AppStore>,
    payload: web::Json<CreateAdjustment>,
) -> Result<HttpResponse, AppError> {
    let payload = payload.into_inner();

    if !(1..=12).contains(&payload.month) {
        return Err(AppError::validation("month must be between 1 and 12"));
    }
    if payload.amount <= 0.0 {
        return Err(AppError::validation("amount must be positive"));
    }

    let adjustment = store.add_adjustment(PayrollAdjustment {
        id: 0,
        employee_id: payload.employee_id,
        year: payload.year,
        month: payload.month,
        adjustment_type: payload.adjustment_type,
        amount: payload.amount,
        reason: payload.reason.trim().to_string(),
        created_at: Utc::now(),
    })?;

    Ok(HttpResponse::Created().json(adjustment))
}

#[utoipa::path(
    get,
    path = "/api/payroll/adjustments",
    params(AdjustmentQuery),
    responses(
        (status = 200, body = Vec<PayrollAdjustment>),
        (status = 404, description = "Employee not found")
    ),
    tag = "Payroll"
)]
pub async fn list_adjustments(
    store: web::Data<AppStore>,
    query: web::Query<AdjustmentQuery>,
) -> Result<HttpResponse, AppError> {
    let today = Local::now().date_naive();
    let year = query.year.unwrap_or_else(|| today.year());
    let month = query.month.unwrap_or_else(|| today.month());

    if store.get_employee(query.employee_id).is_none() {
        return Err(AppError::not_found("Employee not found"));
    }

    Ok(HttpResponse::Ok().json(store.adjustments_for(query.employee_id, year, month)))
}

#[utoipa::path(
    delete,
    path = "/api/payroll/adjustments/{id}",
    params(("id" = u64, Path, description = "Adjustment ID")),
    responses(
        (status = 200, description = "Adjustment deleted"),
        (status = 404, description = "Adjustment not found")
    ),
    tag = "Payroll"
)]
pub async fn delete_adjustment(
    store: web::Data<AppStore>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    store.delete_adjustment(path.into_inner())?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Adjustment deleted"
    })))
}
