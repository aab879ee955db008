use actix_web::{HttpResponse, web};
use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::Config;
use crate::error::AppError;
use crate::store::{AppStore, CallStats};
use crate::utils::summary_cache;

/// Normalized punch row for one employee on the batch date. Employee
/// lookup-or-create runs on the (person_id, name) pair.
#[derive(Deserialize, ToSchema)]
pub struct PunchRow {
    #[schema(example = "1024")]
    pub person_id: String,

    #[schema(example = "Ayesha Rahman")]
    pub name: String,

    #[schema(example = "10:02", nullable = true)]
    pub first_in: Option<String>,

    #[schema(example = "19:11", nullable = true)]
    pub last_out: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct IngestPunches {
    #[schema(example = "2026-06-01", value_type = String, format = "date")]
    pub date: NaiveDate,

    pub rows: Vec<PunchRow>,
}

/// Normalized call-statistics row for one extension on the batch date.
#[derive(Deserialize, ToSchema)]
pub struct CallRow {
    #[schema(example = "3068")]
    pub extension_id: String,

    #[schema(example = "Maria Santos")]
    pub name: String,

    #[serde(default)]
    pub answered_calls: u32,
    #[serde(default)]
    pub no_answered: u32,
    #[serde(default)]
    pub busy: u32,
    #[serde(default)]
    pub failed: u32,
    #[serde(default)]
    pub voicemail: u32,

    #[serde(default)]
    pub total_ring_secs: i64,

    #[serde(default)]
    #[schema(example = 5700)]
    pub total_talk_secs: i64,
}

#[derive(Deserialize, ToSchema)]
pub struct IngestCalls {
    #[schema(example = "2026-06-01", value_type = String, format = "date")]
    pub date: NaiveDate,

    pub rows: Vec<CallRow>,
}

#[derive(Serialize, ToSchema)]
pub struct RowError {
    pub row: usize,
    pub key: String,
    pub error: String,
}

/// One malformed row never aborts the batch; it is reported here instead.
#[derive(Serialize, ToSchema)]
pub struct IngestResponse {
    pub processed: usize,
    pub failed: usize,
    pub errors: Vec<RowError>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateAttendance {
    pub employee_id: u64,

    #[schema(example = "2026-06-01", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "10:02", nullable = true)]
    pub first_in: Option<String>,

    #[schema(example = "17:45", nullable = true)]
    pub last_out: Option<String>,
}

fn parse_time(raw: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|_| AppError::validation(format!("Invalid time format: {raw}")))
}

fn parse_optional_time(raw: Option<&str>) -> Result<Option<NaiveTime>, AppError> {
    match raw {
        Some(value) if !value.trim().is_empty() => Ok(Some(parse_time(value.trim())?)),
        _ => Ok(None),
    }
}

/* =========================
Bulk ingestion
========================= */

#[utoipa::path(
    post,
    path = "/api/ingest/punches",
    request_body = IngestPunches,
    responses(
        (status = 200, description = "Batch processed", body = IngestResponse)
    ),
    tag = "Ingestion"
)]
pub async fn ingest_punches(
    store: web::Data<AppStore>,
    payload: web::Json<IngestPunches>,
) -> Result<HttpResponse, AppError> {
    let payload = payload.into_inner();
    let mut processed = 0usize;
    let mut errors = Vec::new();
    let mut touched = Vec::new();

    for (index, row) in payload.rows.iter().enumerate() {
        let result = (|| -> Result<u64, AppError> {
            if row.person_id.trim().is_empty() || row.name.trim().is_empty() {
                return Err(AppError::validation("person_id and name are required"));
            }
            let first_in = parse_optional_time(row.first_in.as_deref())?;
            let last_out = parse_optional_time(row.last_out.as_deref())?;

            let employee = store.find_or_create_employee(row.person_id.trim(), row.name.trim());
            store.upsert_attendance(employee.id, payload.date, first_in, last_out)?;
            Ok(employee.id)
        })();

        match result {
            Ok(employee_id) => {
                processed += 1;
                touched.push(employee_id);
            }
            Err(e) => errors.push(RowError {
                row: index,
                key: row.person_id.clone(),
                error: e.to_string(),
            }),
        }
    }

    for employee_id in touched {
        summary_cache::invalidate_onsite(employee_id, payload.date.year(), payload.date.month())
            .await;
    }

    tracing::info!(
        date = %payload.date,
        processed,
        failed = errors.len(),
        "Punch batch ingested"
    );

    Ok(HttpResponse::Ok().json(IngestResponse { processed, failed: errors.len(), errors }))
}

#[utoipa::path(
    post,
    path = "/api/ingest/calls",
    request_body = IngestCalls,
    responses(
        (status = 200, description = "Batch processed", body = IngestResponse)
    ),
    tag = "Ingestion"
)]
pub async fn ingest_calls(
    store: web::Data<AppStore>,
    payload: web::Json<IngestCalls>,
) -> Result<HttpResponse, AppError> {
    let payload = payload.into_inner();
    let mut processed = 0usize;
    let mut errors = Vec::new();
    let mut touched = Vec::new();

    for (index, row) in payload.rows.iter().enumerate() {
        let result = (|| -> Result<u64, AppError> {
            if row.extension_id.trim().is_empty() || row.name.trim().is_empty() {
                return Err(AppError::validation("extension_id and name are required"));
            }
            if row.total_talk_secs < 0 || row.total_ring_secs < 0 {
                return Err(AppError::validation("durations must not be negative"));
            }

            let employee =
                store.find_or_create_remote_employee(row.extension_id.trim(), row.name.trim());
            store.upsert_call_record(employee.id, payload.date, CallStats {
                answered_calls: row.answered_calls,
                no_answered: row.no_answered,
                busy: row.busy,
                failed: row.failed,
                voicemail: row.voicemail,
                total_ring_secs: row.total_ring_secs,
                total_talk_secs: row.total_talk_secs,
            })?;
            Ok(employee.id)
        })();

        match result {
            Ok(employee_id) => {
                processed += 1;
                touched.push(employee_id);
            }
            Err(e) => errors.push(RowError {
                row: index,
                key: row.extension_id.clone(),
                error: e.to_string(),
            }),
        }
    }

    for employee_id in touched {
        summary_cache::invalidate_remote(employee_id, payload.date.year(), payload.date.month())
            .await;
    }

    tracing::info!(
        date = %payload.date,
        processed,
        failed = errors.len(),
        "Call batch ingested"
    );

    Ok(HttpResponse::Ok().json(IngestResponse { processed, failed: errors.len(), errors }))
}

/* =========================
Manual attendance correction
========================= */

#[utoipa::path(
    put,
    path = "/api/attendance",
    request_body = UpdateAttendance,
    responses(
        (status = 200, description = "Attendance updated"),
        (status = 400, description = "Invalid time format"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Ingestion"
)]
pub async fn update_attendance(
    store: web::Data<AppStore>,
    config: web::Data<Config>,
    payload: web::Json<UpdateAttendance>,
) -> Result<HttpResponse, AppError> {
    let payload = payload.into_inner();
    let first_in = parse_optional_time(payload.first_in.as_deref())?;
    let last_out = parse_optional_time(payload.last_out.as_deref())?;

    let record = store.upsert_attendance(payload.employee_id, payload.date, first_in, last_out)?;

    // Reclassify the edited month and refresh the cached summary row.
    let today = chrono::Local::now().date_naive();
    let data = store.onsite_month(
        payload.employee_id,
        payload.date.year(),
        payload.date.month(),
        today,
        config.default_shift(),
    )?;
    store.upsert_monthly_summary(
        payload.employee_id,
        payload.date.year(),
        payload.date.month(),
        &data.aggregate,
    );
    summary_cache::invalidate_onsite(payload.employee_id, payload.date.year(), payload.date.month())
        .await;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Attendance updated successfully",
        "data": record
    })))
}
