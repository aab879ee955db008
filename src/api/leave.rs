use actix_web::{HttpResponse, web};
use chrono::{Datelike, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::config::Config;
use crate::error::AppError;
use crate::model::early_leave::EarlyLeaveRequest;
use crate::model::leave_request::{LeaveRequest, LeaveType};
use crate::model::status::RequestStatus;
use crate::store::AppStore;
use crate::utils::summary_cache;

#[derive(Deserialize, ToSchema)]
pub struct CreateLeave {
    #[schema(example = 1)]
    pub employee_id: u64,

    #[schema(example = "annual")]
    pub leave_type: LeaveType,

    #[schema(example = "2026-04-06", value_type = String, format = "date")]
    pub start_date: NaiveDate,

    #[schema(example = "2026-04-10", value_type = String, format = "date")]
    pub end_date: NaiveDate,

    #[schema(example = "Family travel")]
    pub reason: String,

    /// Must be true for sick and medical leave.
    #[serde(default)]
    pub has_document: bool,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct LeaveFilter {
    /// Filter by employee ID
    #[schema(example = 1)]
    pub employee_id: Option<u64>,

    /// Filter by leave status
    #[schema(example = "pending")]
    pub status: Option<String>,

    /// Pagination page number (start with 1)
    #[schema(example = 1)]
    pub page: Option<u64>,

    /// Pagination per page number
    #[schema(example = 10)]
    pub per_page: Option<u64>,
}

#[derive(Serialize, ToSchema)]
pub struct LeaveListResponse {
    pub data: Vec<LeaveRequest>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

#[derive(Deserialize, ToSchema)]
pub struct ApproveLeave {
    /// Days to approve; defaults to the requested span, capped to it.
    #[schema(example = 2)]
    pub approved_days: Option<u32>,

    /// Optional replacement range; applied only when both dates are given
    /// and ordered.
    #[schema(value_type = String, format = "date", nullable = true)]
    pub start_date: Option<NaiveDate>,

    #[schema(value_type = String, format = "date", nullable = true)]
    pub end_date: Option<NaiveDate>,

    pub admin_notes: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct RejectLeave {
    #[schema(example = "No cover available that week")]
    pub admin_notes: String,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateEarlyLeave {
    #[schema(nullable = true)]
    pub employee_id: Option<u64>,

    #[schema(nullable = true)]
    pub remote_employee_id: Option<u64>,

    /// Defaults to today.
    #[schema(value_type = String, format = "date", nullable = true)]
    pub request_date: Option<NaiveDate>,

    #[schema(example = "15:30")]
    pub leaving_time: String,

    #[schema(example = "17:30", nullable = true)]
    pub return_time: Option<String>,

    #[schema(example = "Client office, Deira")]
    pub destination: String,

    #[schema(example = "Al Noor Trading")]
    pub customer_name: String,

    #[serde(default)]
    pub reason: String,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct EarlyLeaveFilter {
    #[schema(example = "pending")]
    pub status: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct ApproveEarlyLeave {
    /// Corrected punch-in, for on-site employees.
    #[schema(example = "10:02", nullable = true)]
    pub new_first_in: Option<String>,

    /// Corrected punch-out, typically the leaving time.
    #[schema(example = "15:30", nullable = true)]
    pub new_last_out: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct DeclineEarlyLeave {
    #[serde(default)]
    pub admin_notes: String,
}

fn parse_status(raw: Option<&str>) -> Result<Option<RequestStatus>, AppError> {
    match raw {
        None => Ok(None),
        Some(value) => value
            .parse::<RequestStatus>()
            .map(Some)
            .map_err(|_| AppError::validation("status must be pending, approved or rejected")),
    }
}

fn parse_clock(raw: &str) -> Result<chrono::NaiveTime, AppError> {
    chrono::NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| chrono::NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| AppError::validation(format!("Invalid time format: {raw}")))
}

/* =========================
Leave requests
========================= */

#[utoipa::path(
    post,
    path = "/api/leave",
    request_body = CreateLeave,
    responses(
        (status = 200, description = "Leave request submitted", body = Object, example = json!({
            "message": "Leave request submitted",
            "status": "pending"
        })),
        (status = 400, description = "Bad request"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Leave"
)]
pub async fn create_leave(
    store: web::Data<AppStore>,
    payload: web::Json<CreateLeave>,
) -> Result<HttpResponse, AppError> {
    let payload = payload.into_inner();

    if payload.start_date > payload.end_date {
        return Err(AppError::validation("start_date cannot be after end_date"));
    }
    if payload.reason.trim().is_empty() {
        return Err(AppError::validation("Please provide a reason for the leave request"));
    }
    if payload.leave_type.requires_document() && !payload.has_document {
        return Err(AppError::validation(format!(
            "{} leave requires a supporting document",
            payload.leave_type
        )));
    }

    let requested_days = LeaveRequest::span_between(payload.start_date, payload.end_date);
    let request = store.create_leave(LeaveRequest {
        id: 0,
        employee_id: payload.employee_id,
        leave_type: payload.leave_type,
        start_date: payload.start_date,
        end_date: payload.end_date,
        reason: payload.reason.trim().to_string(),
        has_document: payload.has_document,
        requested_days,
        approved_days: None,
        status: RequestStatus::Pending,
        admin_notes: None,
        created_at: Utc::now(),
        reviewed_at: None,
    })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Leave request submitted",
        "status": "pending",
        "id": request.id
    })))
}

#[utoipa::path(
    get,
    path = "/api/leave",
    params(LeaveFilter),
    responses((status = 200, description = "Paginated leave list", body = LeaveListResponse)),
    tag = "Leave"
)]
pub async fn leave_list(
    store: web::Data<AppStore>,
    query: web::Query<LeaveFilter>,
) -> Result<HttpResponse, AppError> {
    let status = parse_status(query.status.as_deref())?;
    let per_page = query.per_page.unwrap_or(10).clamp(1, 100);
    let page = query.page.unwrap_or(1).max(1);

    let requests = store.list_leaves(status, query.employee_id);
    let total = requests.len() as u64;
    let data: Vec<_> = requests
        .into_iter()
        .skip(((page - 1) * per_page) as usize)
        .take(per_page as usize)
        .collect();

    Ok(HttpResponse::Ok().json(LeaveListResponse { data, page, per_page, total }))
}

#[utoipa::path(
    put,
    path = "/api/leave/{id}/approve",
    request_body = ApproveLeave,
    params(("id" = u64, Path, description = "Leave request ID")),
    responses(
        (status = 200, description = "Leave approved", body = Object, example = json!({
            "message": "Leave approved for 2 day(s)"
        })),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Request already processed")
    ),
    tag = "Leave"
)]
pub async fn approve_leave(
    store: web::Data<AppStore>,
    path: web::Path<u64>,
    body: web::Json<ApproveLeave>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();

    let request = store
        .get_leave(id)
        .ok_or_else(|| AppError::not_found("Leave request not found"))?;
    if request.status != RequestStatus::Pending {
        return Err(AppError::conflict("This request has already been processed"));
    }

    // Apply a replacement range only when it is well-formed; a bad range
    // keeps the submitted dates.
    let (start_date, end_date) = match (body.start_date, body.end_date) {
        (Some(start), Some(end)) if start <= end => (start, end),
        _ => (request.start_date, request.end_date),
    };
    let span = LeaveRequest::span_between(start_date, end_date);
    let approved_days = body.approved_days.unwrap_or(request.requested_days).clamp(1, span);

    let updated = store.update_leave(id, |r| {
        r.start_date = start_date;
        r.end_date = end_date;
        r.status = RequestStatus::Approved;
        r.approved_days = Some(approved_days);
        r.admin_notes = body.admin_notes.clone();
        r.reviewed_at = Some(Utc::now());
    })?;

    // Newly paid days change classifications in every covered month.
    summary_cache::invalidate_all();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Leave approved for {} day(s)", updated.get_effective_days())
    })))
}

#[utoipa::path(
    put,
    path = "/api/leave/{id}/reject",
    request_body = RejectLeave,
    params(("id" = u64, Path, description = "Leave request ID")),
    responses(
        (status = 200, description = "Leave rejected", body = Object, example = json!({
            "message": "Leave request rejected"
        })),
        (status = 400, description = "Missing rejection reason"),
        (status = 404, description = "Leave request not found"),
        (status = 409, description = "Request already processed")
    ),
    tag = "Leave"
)]
pub async fn reject_leave(
    store: web::Data<AppStore>,
    path: web::Path<u64>,
    body: web::Json<RejectLeave>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    if body.admin_notes.trim().is_empty() {
        return Err(AppError::validation("Please provide a reason for rejection"));
    }

    let request = store
        .get_leave(id)
        .ok_or_else(|| AppError::not_found("Leave request not found"))?;
    if request.status != RequestStatus::Pending {
        return Err(AppError::conflict("This request has already been processed"));
    }

    store.update_leave(id, |r| {
        r.status = RequestStatus::Rejected;
        r.admin_notes = Some(body.admin_notes.trim().to_string());
        r.reviewed_at = Some(Utc::now());
    })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Leave request rejected"
    })))
}

/* =========================
Early leave requests
========================= */

#[utoipa::path(
    post,
    path = "/api/early-leave",
    request_body = CreateEarlyLeave,
    responses(
        (status = 200, description = "Request submitted", body = Object, example = json!({
            "message": "Request submitted successfully"
        })),
        (status = 400, description = "Bad request"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Leave"
)]
pub async fn create_early_leave(
    store: web::Data<AppStore>,
    payload: web::Json<CreateEarlyLeave>,
) -> Result<HttpResponse, AppError> {
    let payload = payload.into_inner();

    if payload.destination.trim().is_empty() || payload.customer_name.trim().is_empty() {
        return Err(AppError::validation("Please fill in all required fields"));
    }
    let leaving_time = parse_clock(payload.leaving_time.trim())?;
    let return_time = match payload.return_time.as_deref() {
        Some(raw) if !raw.trim().is_empty() => Some(parse_clock(raw.trim())?),
        _ => None,
    };

    let request = store.create_early_leave(EarlyLeaveRequest {
        id: 0,
        employee_id: payload.employee_id,
        remote_employee_id: payload.remote_employee_id,
        request_date: payload.request_date.unwrap_or_else(|| Local::now().date_naive()),
        leaving_time,
        return_time,
        destination: payload.destination.trim().to_string(),
        customer_name: payload.customer_name.trim().to_string(),
        reason: payload.reason.trim().to_string(),
        status: RequestStatus::Pending,
        admin_notes: None,
        created_at: Utc::now(),
        reviewed_at: None,
    })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Request submitted successfully",
        "id": request.id
    })))
}

#[utoipa::path(
    get,
    path = "/api/early-leave",
    params(EarlyLeaveFilter),
    responses((status = 200, body = Vec<EarlyLeaveRequest>)),
    tag = "Leave"
)]
pub async fn early_leave_list(
    store: web::Data<AppStore>,
    query: web::Query<EarlyLeaveFilter>,
) -> Result<HttpResponse, AppError> {
    let status = parse_status(query.status.as_deref())?;
    Ok(HttpResponse::Ok().json(store.list_early_leaves(status)))
}

#[utoipa::path(
    put,
    path = "/api/early-leave/{id}/approve",
    request_body = ApproveEarlyLeave,
    params(("id" = u64, Path, description = "Early leave request ID")),
    responses(
        (status = 200, description = "Request approved", body = Object, example = json!({
            "message": "Request approved successfully"
        })),
        (status = 400, description = "No punch data for the request date"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request already processed")
    ),
    tag = "Leave"
)]
pub async fn approve_early_leave(
    store: web::Data<AppStore>,
    config: web::Data<Config>,
    path: web::Path<u64>,
    body: web::Json<ApproveEarlyLeave>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();

    let request = store
        .get_early_leave(id)
        .ok_or_else(|| AppError::not_found("Early leave request not found"))?;
    if request.status != RequestStatus::Pending {
        return Err(AppError::conflict("Request already processed"));
    }

    // On-site approval rewrites that day's punches, then reclassifies the
    // month. Remote approval is a status change only.
    if let Some(employee_id) = request.employee_id {
        let record = store
            .attendance_for(employee_id, request.request_date)
            .ok_or_else(|| {
                AppError::validation("No biometric data found for this date. Cannot approve yet.")
            })?;

        let first_in = match body.new_first_in.as_deref() {
            Some(raw) if !raw.trim().is_empty() => Some(parse_clock(raw.trim())?),
            _ => record.first_in,
        };
        let last_out = match body.new_last_out.as_deref() {
            Some(raw) if !raw.trim().is_empty() => Some(parse_clock(raw.trim())?),
            _ => record.last_out,
        };

        store.upsert_attendance(employee_id, request.request_date, first_in, last_out)?;

        let today = Local::now().date_naive();
        let (year, month) = (request.request_date.year(), request.request_date.month());
        let data = store.onsite_month(employee_id, year, month, today, config.default_shift())?;
        store.upsert_monthly_summary(employee_id, year, month, &data.aggregate);
        summary_cache::invalidate_onsite(employee_id, year, month).await;
    }

    store.update_early_leave(id, |r| {
        r.status = RequestStatus::Approved;
        r.reviewed_at = Some(Utc::now());
    })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Request approved successfully"
    })))
}

#[utoipa::path(
    put,
    path = "/api/early-leave/{id}/decline",
    request_body = DeclineEarlyLeave,
    params(("id" = u64, Path, description = "Early leave request ID")),
    responses(
        (status = 200, description = "Request declined", body = Object, example = json!({
            "message": "Request declined"
        })),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request already processed")
    ),
    tag = "Leave"
)]
pub async fn decline_early_leave(
    store: web::Data<AppStore>,
    path: web::Path<u64>,
    body: web::Json<DeclineEarlyLeave>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let request = store
        .get_early_leave(id)
        .ok_or_else(|| AppError::not_found("Early leave request not found"))?;
    if request.status != RequestStatus::Pending {
        return Err(AppError::conflict("Request already processed"));
    }

    store.update_early_leave(id, |r| {
        r.status = RequestStatus::Rejected;
        r.admin_notes = Some(body.admin_notes.trim().to_string());
        r.reviewed_at = Some(Utc::now());
    })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Request declined"
    })))
}
