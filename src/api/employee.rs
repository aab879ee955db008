use actix_web::{HttpResponse, web};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::AppError;
use crate::model::employee::{Department, Employee, RemoteEmployee};
use crate::model::shift::ShiftHistory;
use crate::store::AppStore;
use crate::utils::summary_cache;

#[derive(Deserialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "1024")]
    pub person_id: String,

    #[schema(example = "Ayesha Rahman")]
    pub name: String,

    #[schema(example = "ayesha@company.com")]
    pub email: Option<String>,

    #[schema(example = "+971501234567")]
    pub phone: Option<String>,

    pub department: Option<Department>,

    #[schema(example = "Dubai HQ")]
    pub location: Option<String>,

    #[schema(example = "Support")]
    pub team: Option<String>,

    #[schema(example = "2024-02-01", value_type = String, format = "date")]
    pub joining_date: Option<NaiveDate>,

    #[schema(example = "Accountant")]
    pub designation: Option<String>,

    #[schema(example = 45000.0)]
    pub salary: Option<f64>,

    #[schema(example = "10:00:00", value_type = String)]
    pub shift_start: Option<NaiveTime>,

    #[schema(example = "19:00:00", value_type = String)]
    pub shift_end: Option<NaiveTime>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateEmployee {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<Department>,
    pub location: Option<String>,
    pub team: Option<String>,

    /// Set false when the employee leaves; history is retained.
    pub is_active: Option<bool>,

    #[schema(value_type = String, format = "date")]
    pub joining_date: Option<NaiveDate>,

    #[schema(value_type = String, format = "date")]
    pub leaving_date: Option<NaiveDate>,

    pub designation: Option<String>,
    pub salary: Option<f64>,

    #[schema(value_type = String)]
    pub shift_start: Option<NaiveTime>,

    #[schema(value_type = String)]
    pub shift_end: Option<NaiveTime>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct EmployeeFilter {
    /// Case-insensitive name substring
    #[schema(example = "rahman")]
    pub search: Option<String>,

    /// Include soft-deleted employees
    pub show_inactive: Option<bool>,

    #[schema(example = 1)]
    pub page: Option<u64>,

    #[schema(example = 10)]
    pub per_page: Option<u64>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub data: Vec<Employee>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

#[derive(Serialize, ToSchema)]
pub struct RemoteEmployeeListResponse {
    pub data: Vec<RemoteEmployee>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateRemoteEmployee {
    #[schema(example = "3068")]
    pub extension_id: String,

    #[schema(example = "Maria Santos")]
    pub name: String,

    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<Department>,
    pub location: Option<String>,
    pub team: Option<String>,

    #[schema(value_type = String, format = "date")]
    pub joining_date: Option<NaiveDate>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateRemoteEmployee {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<Department>,
    pub location: Option<String>,
    pub team: Option<String>,
    pub is_active: Option<bool>,

    #[schema(value_type = String, format = "date")]
    pub joining_date: Option<NaiveDate>,

    #[schema(value_type = String, format = "date")]
    pub leaving_date: Option<NaiveDate>,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateShiftEntry {
    #[schema(example = "09:30:00", value_type = String)]
    pub shift_start: NaiveTime,

    #[schema(example = "18:30:00", value_type = String)]
    pub shift_end: NaiveTime,

    #[schema(example = "2026-03-01", value_type = String, format = "date")]
    pub effective_from: NaiveDate,
}

fn paginate<T>(items: Vec<T>, page: u64, per_page: u64) -> (Vec<T>, u64) {
    let total = items.len() as u64;
    let start = ((page - 1) * per_page) as usize;
    let data = items.into_iter().skip(start).take(per_page as usize).collect();
    (data, total)
}

/* =========================
Employees
========================= */

#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Missing person_id or name"),
        (status = 409, description = "Duplicate person_id + name")
    ),
    tag = "Employees"
)]
pub async fn create_employee(
    store: web::Data<AppStore>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, AppError> {
    let payload = payload.into_inner();
    if payload.person_id.trim().is_empty() || payload.name.trim().is_empty() {
        return Err(AppError::validation("person_id and name are required"));
    }

    let employee = store.create_employee(Employee {
        id: 0,
        person_id: payload.person_id.trim().to_string(),
        name: payload.name.trim().to_string(),
        email: payload.email,
        phone: payload.phone,
        department: payload.department,
        location: payload.location,
        team: payload.team,
        is_active: true,
        joining_date: payload.joining_date,
        leaving_date: None,
        designation: payload.designation,
        salary: payload.salary,
        shift_start: payload.shift_start,
        shift_end: payload.shift_end,
    })?;

    tracing::info!(employee_id = employee.id, "Employee created");
    Ok(HttpResponse::Created().json(employee))
}

#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(("id" = u64, Path, description = "Employee ID")),
    responses(
        (status = 200, body = Employee),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employees"
)]
pub async fn get_employee(
    store: web::Data<AppStore>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    let employee = store
        .get_employee(path.into_inner())
        .ok_or_else(|| AppError::not_found("Employee not found"))?;
    Ok(HttpResponse::Ok().json(employee))
}

#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    request_body = UpdateEmployee,
    params(("id" = u64, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employees"
)]
pub async fn update_employee(
    store: web::Data<AppStore>,
    path: web::Path<u64>,
    body: web::Json<UpdateEmployee>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();

    let employee = store.update_employee(id, |e| {
        if let Some(name) = body.name {
            e.name = name;
        }
        if let Some(email) = body.email {
            e.email = Some(email);
        }
        if let Some(phone) = body.phone {
            e.phone = Some(phone);
        }
        if let Some(department) = body.department {
            e.department = Some(department);
        }
        if let Some(location) = body.location {
            e.location = Some(location);
        }
        if let Some(team) = body.team {
            e.team = Some(team);
        }
        if let Some(is_active) = body.is_active {
            e.is_active = is_active;
        }
        if let Some(joining_date) = body.joining_date {
            e.joining_date = Some(joining_date);
        }
        if let Some(leaving_date) = body.leaving_date {
            e.leaving_date = Some(leaving_date);
        }
        if let Some(designation) = body.designation {
            e.designation = Some(designation);
        }
        if let Some(salary) = body.salary {
            e.salary = Some(salary);
        }
        if let Some(shift_start) = body.shift_start {
            e.shift_start = Some(shift_start);
        }
        if let Some(shift_end) = body.shift_end {
            e.shift_end = Some(shift_end);
        }
    })?;

    // Shift or salary edits can move any cached month.
    summary_cache::invalidate_all();

    Ok(HttpResponse::Ok().json(employee))
}

#[utoipa::path(
    get,
    path = "/api/employees",
    params(EmployeeFilter),
    responses((status = 200, body = EmployeeListResponse)),
    tag = "Employees"
)]
pub async fn list_employees(
    store: web::Data<AppStore>,
    query: web::Query<EmployeeFilter>,
) -> Result<HttpResponse, AppError> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(10).clamp(1, 100);

    let employees = store.list_employees(
        query.show_inactive.unwrap_or(false),
        query.search.as_deref(),
    );
    let (data, total) = paginate(employees, page, per_page);

    Ok(HttpResponse::Ok().json(EmployeeListResponse { data, page, per_page, total }))
}

/* =========================
Shift history
========================= */

#[utoipa::path(
    post,
    path = "/api/employees/{id}/shift-history",
    request_body = CreateShiftEntry,
    params(("id" = u64, Path, description = "Employee ID")),
    responses(
        (status = 201, description = "Shift entry recorded", body = ShiftHistory),
        (status = 400, description = "shift_start must be before shift_end"),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Duplicate effective_from for this employee")
    ),
    tag = "Employees"
)]
pub async fn add_shift_entry(
    store: web::Data<AppStore>,
    path: web::Path<u64>,
    body: web::Json<CreateShiftEntry>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    if body.shift_start >= body.shift_end {
        return Err(AppError::validation("shift_start must be before shift_end"));
    }

    let entry =
        store.add_shift_history(id, body.shift_start, body.shift_end, body.effective_from)?;
    summary_cache::invalidate_all();

    Ok(HttpResponse::Created().json(entry))
}

#[utoipa::path(
    get,
    path = "/api/employees/{id}/shift-history",
    params(("id" = u64, Path, description = "Employee ID")),
    responses(
        (status = 200, body = Vec<ShiftHistory>),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employees"
)]
pub async fn list_shift_entries(
    store: web::Data<AppStore>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    if store.get_employee(id).is_none() {
        return Err(AppError::not_found("Employee not found"));
    }
    Ok(HttpResponse::Ok().json(store.shift_history_for(id)))
}

/* =========================
Remote employees
========================= */

#[utoipa::path(
    post,
    path = "/api/remote-employees",
    request_body = CreateRemoteEmployee,
    responses(
        (status = 201, description = "Remote employee created", body = RemoteEmployee),
        (status = 400, description = "Missing extension_id or name"),
        (status = 409, description = "Duplicate extension_id + name")
    ),
    tag = "Employees"
)]
pub async fn create_remote_employee(
    store: web::Data<AppStore>,
    payload: web::Json<CreateRemoteEmployee>,
) -> Result<HttpResponse, AppError> {
    let payload = payload.into_inner();
    if payload.extension_id.trim().is_empty() || payload.name.trim().is_empty() {
        return Err(AppError::validation("extension_id and name are required"));
    }

    let employee = store.create_remote_employee(RemoteEmployee {
        id: 0,
        extension_id: payload.extension_id.trim().to_string(),
        name: payload.name.trim().to_string(),
        email: payload.email,
        phone: payload.phone,
        department: payload.department,
        location: payload.location,
        team: payload.team,
        is_active: true,
        joining_date: payload.joining_date,
        leaving_date: None,
    })?;

    tracing::info!(employee_id = employee.id, "Remote employee created");
    Ok(HttpResponse::Created().json(employee))
}

#[utoipa::path(
    get,
    path = "/api/remote-employees/{id}",
    params(("id" = u64, Path, description = "Remote employee ID")),
    responses(
        (status = 200, body = RemoteEmployee),
        (status = 404, description = "Remote employee not found")
    ),
    tag = "Employees"
)]
pub async fn get_remote_employee(
    store: web::Data<AppStore>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    let employee = store
        .get_remote_employee(path.into_inner())
        .ok_or_else(|| AppError::not_found("Remote employee not found"))?;
    Ok(HttpResponse::Ok().json(employee))
}

#[utoipa::path(
    put,
    path = "/api/remote-employees/{id}",
    request_body = UpdateRemoteEmployee,
    params(("id" = u64, Path, description = "Remote employee ID")),
    responses(
        (status = 200, description = "Remote employee updated", body = RemoteEmployee),
        (status = 404, description = "Remote employee not found")
    ),
    tag = "Employees"
)]
pub async fn update_remote_employee(
    store: web::Data<AppStore>,
    path: web::Path<u64>,
    body: web::Json<UpdateRemoteEmployee>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();

    let employee = store.update_remote_employee(id, |e| {
        if let Some(name) = body.name {
            e.name = name;
        }
        if let Some(email) = body.email {
            e.email = Some(email);
        }
        if let Some(phone) = body.phone {
            e.phone = Some(phone);
        }
        if let Some(department) = body.department {
            e.department = Some(department);
        }
        if let Some(location) = body.location {
            e.location = Some(location);
        }
        if let Some(team) = body.team {
            e.team = Some(team);
        }
        if let Some(is_active) = body.is_active {
            e.is_active = is_active;
        }
        if let Some(joining_date) = body.joining_date {
            e.joining_date = Some(joining_date);
        }
        if let Some(leaving_date) = body.leaving_date {
            e.leaving_date = Some(leaving_date);
        }
    })?;

    Ok(HttpResponse::Ok().json(employee))
}

#[utoipa::path(
    get,
    path = "/api/remote-employees",
    params(EmployeeFilter),
    responses((status = 200, body = RemoteEmployeeListResponse)),
    tag = "Employees"
)]
pub async fn list_remote_employees(
    store: web::Data<AppStore>,
    query: web::Query<EmployeeFilter>,
) -> Result<HttpResponse, AppError> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(10).clamp(1, 100);

    let employees = store.list_remote_employees(
        query.show_inactive.unwrap_or(false),
        query.search.as_deref(),
    );
    let (data, total) = paginate(employees, page, per_page);

    Ok(HttpResponse::Ok().json(RemoteEmployeeListResponse { data, page, per_page, total }))
}
