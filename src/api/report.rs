use std::collections::BTreeMap;

use actix_web::{HttpResponse, web};
use chrono::{Datelike, Local, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::config::Config;
use crate::engine::aggregate::{MonthlyAggregate, RemoteMonthlyAggregate};
use crate::engine::calendar::MonthCalendar;
use crate::error::AppError;
use crate::model::status::DayStatus;
use crate::model::summary::MonthlySummary;
use crate::store::{AppStore, OnsiteMonthData, RemoteMonthData};
use crate::utils::summary_cache::{ONSITE_SUMMARY_CACHE, REMOTE_SUMMARY_CACHE};

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct ReportQuery {
    /// Defaults to the current year
    #[schema(example = 2026)]
    pub year: Option<i32>,

    /// Defaults to the current month
    #[schema(example = 6)]
    pub month: Option<u32>,

    /// Case-insensitive name substring
    pub search: Option<String>,

    /// Include soft-deleted employees
    pub show_inactive: Option<bool>,
}

#[derive(Serialize, ToSchema)]
pub struct HolidayInfo {
    pub day: u32,
    pub name: String,
}

/// One calendar cell of the on-site report.
#[derive(Serialize, ToSchema)]
pub struct DayCell {
    /// Unset for days past the evaluation cutoff.
    #[schema(nullable = true)]
    pub status: Option<DayStatus>,
    pub is_late: bool,
    pub is_sunday: bool,
    pub is_saturday: bool,
    pub is_holiday: bool,
    pub is_paid_leave: bool,

    #[schema(value_type = String, nullable = true)]
    pub first_in: Option<NaiveTime>,

    #[schema(value_type = String, nullable = true)]
    pub last_out: Option<NaiveTime>,

    #[schema(nullable = true)]
    pub work_secs: Option<i64>,
}

#[derive(Serialize, ToSchema)]
pub struct OnsiteReportRow {
    pub employee_id: u64,
    pub person_id: String,
    pub name: String,
    pub days: BTreeMap<u32, DayCell>,
    pub summary: MonthlyAggregate,
}

#[derive(Serialize, ToSchema)]
pub struct OnsiteReportResponse {
    pub year: i32,
    pub month: u32,
    pub days_in_month: u32,
    pub cutoff_day: u32,
    pub holidays: Vec<HolidayInfo>,
    pub employees: Vec<OnsiteReportRow>,
}

/// One calendar cell of the remote report.
#[derive(Serialize, ToSchema)]
pub struct RemoteDayCell {
    #[schema(nullable = true)]
    pub status: Option<DayStatus>,
    pub is_sunday: bool,
    pub is_saturday: bool,
    pub is_holiday: bool,

    #[schema(nullable = true)]
    pub talk_minutes: Option<i64>,

    #[schema(nullable = true)]
    pub answered_calls: Option<u32>,
}

#[derive(Serialize, ToSchema)]
pub struct RemoteReportRow {
    pub employee_id: u64,
    pub extension_id: String,
    pub name: String,
    pub days: BTreeMap<u32, RemoteDayCell>,
    pub summary: RemoteMonthlyAggregate,
}

#[derive(Serialize, ToSchema)]
pub struct RemoteReportResponse {
    pub year: i32,
    pub month: u32,
    pub days_in_month: u32,
    pub cutoff_day: u32,
    pub holidays: Vec<HolidayInfo>,
    pub employees: Vec<RemoteReportRow>,
}

fn onsite_cells(data: &OnsiteMonthData) -> BTreeMap<u32, DayCell> {
    let cal = &data.calendar;
    let mut days = BTreeMap::new();
    for day in 1..=cal.days_in_month {
        let class = data.classes.get(&day);
        let signal = data.signals.get(&day);
        days.insert(day, DayCell {
            status: class.map(|c| c.status),
            is_late: class.is_some_and(|c| c.is_late),
            is_sunday: cal.is_sunday(day),
            is_saturday: cal.is_saturday(day),
            is_holiday: cal.is_declared_holiday(day),
            is_paid_leave: data.paid_leave.contains(&day),
            first_in: signal.and_then(|s| s.first_in),
            last_out: signal.and_then(|s| s.last_out),
            work_secs: signal.map(|s| s.work_secs),
        });
    }
    days
}

fn remote_cells(data: &RemoteMonthData) -> BTreeMap<u32, RemoteDayCell> {
    let cal = &data.calendar;
    let mut days = BTreeMap::new();
    for day in 1..=cal.days_in_month {
        let signal = data.signals.get(&day);
        days.insert(day, RemoteDayCell {
            status: data.classes.get(&day).copied(),
            is_sunday: cal.is_sunday(day),
            is_saturday: cal.is_saturday(day),
            is_holiday: cal.is_declared_holiday(day),
            talk_minutes: signal.map(|s| s.total_talk_secs / 60),
            answered_calls: signal.map(|s| s.answered_calls),
        });
    }
    days
}

fn holiday_infos(store: &AppStore, year: i32, month: u32) -> Vec<HolidayInfo> {
    let mut infos: Vec<_> = store
        .list_holidays()
        .into_iter()
        .filter(|h| h.date.year() == year && h.date.month() == month)
        .map(|h| HolidayInfo { day: h.date.day(), name: h.name })
        .collect();
    infos.sort_by_key(|h| h.day);
    infos
}

/* =========================
Monthly reports
========================= */

/// Recomputes every listed employee's month from raw signals and refreshes
/// the persisted summary rows; the response is the freshly computed data.
#[utoipa::path(
    get,
    path = "/api/report/onsite",
    params(ReportQuery),
    responses(
        (status = 200, body = OnsiteReportResponse),
        (status = 400, description = "Invalid month")
    ),
    tag = "Reports"
)]
pub async fn onsite_report(
    store: web::Data<AppStore>,
    config: web::Data<Config>,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, AppError> {
    let today = Local::now().date_naive();
    let year = query.year.unwrap_or_else(|| today.year());
    let month = query.month.unwrap_or_else(|| today.month());

    let calendar = MonthCalendar::build(year, month, &store.holiday_dates(), today)
        .ok_or_else(|| AppError::validation("month must be between 1 and 12"))?;

    let employees = store.list_employees(
        query.show_inactive.unwrap_or(false),
        query.search.as_deref(),
    );

    let mut rows = Vec::with_capacity(employees.len());
    for employee in employees {
        let data = store.onsite_month(employee.id, year, month, today, config.default_shift())?;
        store.upsert_monthly_summary(employee.id, year, month, &data.aggregate);
        ONSITE_SUMMARY_CACHE.insert((employee.id, year, month), data.aggregate).await;

        rows.push(OnsiteReportRow {
            employee_id: employee.id,
            person_id: employee.person_id,
            name: employee.name,
            days: onsite_cells(&data),
            summary: data.aggregate,
        });
    }

    Ok(HttpResponse::Ok().json(OnsiteReportResponse {
        year,
        month,
        days_in_month: calendar.days_in_month,
        cutoff_day: calendar.cutoff_day,
        holidays: holiday_infos(&store, year, month),
        employees: rows,
    }))
}

/// Reads the persisted summary row as last written by a report run or a
/// record edit, without recomputing.
#[utoipa::path(
    get,
    path = "/api/report/onsite/{employee_id}/summary",
    params(
        ("employee_id" = u64, Path, description = "Employee ID"),
        ReportQuery
    ),
    responses(
        (status = 200, body = MonthlySummary),
        (status = 404, description = "No summary stored for this month")
    ),
    tag = "Reports"
)]
pub async fn onsite_summary(
    store: web::Data<AppStore>,
    path: web::Path<u64>,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, AppError> {
    let today = Local::now().date_naive();
    let year = query.year.unwrap_or_else(|| today.year());
    let month = query.month.unwrap_or_else(|| today.month());
    let employee_id = path.into_inner();

    if store.get_employee(employee_id).is_none() {
        return Err(AppError::not_found("Employee not found"));
    }
    let summary = store
        .get_monthly_summary(employee_id, year, month)
        .ok_or_else(|| AppError::not_found("No summary stored for this month"))?;

    Ok(HttpResponse::Ok().json(summary))
}

#[utoipa::path(
    get,
    path = "/api/report/remote",
    params(ReportQuery),
    responses(
        (status = 200, body = RemoteReportResponse),
        (status = 400, description = "Invalid month")
    ),
    tag = "Reports"
)]
pub async fn remote_report(
    store: web::Data<AppStore>,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, AppError> {
    let today = Local::now().date_naive();
    let year = query.year.unwrap_or_else(|| today.year());
    let month = query.month.unwrap_or_else(|| today.month());

    let calendar = MonthCalendar::build(year, month, &store.holiday_dates(), today)
        .ok_or_else(|| AppError::validation("month must be between 1 and 12"))?;

    let employees = store.list_remote_employees(
        query.show_inactive.unwrap_or(false),
        query.search.as_deref(),
    );

    let mut rows = Vec::with_capacity(employees.len());
    for employee in employees {
        let data = store.remote_month(employee.id, year, month, today)?;
        store.upsert_remote_monthly_summary(employee.id, year, month, &data.aggregate);
        REMOTE_SUMMARY_CACHE.insert((employee.id, year, month), data.aggregate).await;

        rows.push(RemoteReportRow {
            employee_id: employee.id,
            extension_id: employee.extension_id,
            name: employee.name,
            days: remote_cells(&data),
            summary: data.aggregate,
        });
    }

    Ok(HttpResponse::Ok().json(RemoteReportResponse {
        year,
        month,
        days_in_month: calendar.days_in_month,
        cutoff_day: calendar.cutoff_day,
        holidays: holiday_infos(&store, year, month),
        employees: rows,
    }))
}
