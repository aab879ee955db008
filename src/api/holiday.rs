use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::model::holiday::Holiday;
use crate::store::AppStore;
use crate::utils::summary_cache;

#[derive(Deserialize, ToSchema)]
pub struct CreateHoliday {
    #[schema(example = "2026-12-25", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "Christmas")]
    pub name: String,
}

#[utoipa::path(
    post,
    path = "/api/holidays",
    request_body = CreateHoliday,
    responses(
        (status = 201, description = "Holiday created", body = Holiday),
        (status = 400, description = "Missing name"),
        (status = 409, description = "A holiday already exists on this date")
    ),
    tag = "Holidays"
)]
pub async fn create_holiday(
    store: web::Data<AppStore>,
    payload: web::Json<CreateHoliday>,
) -> Result<HttpResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::validation("Holiday name is required"));
    }

    let holiday = store.create_holiday(payload.date, &payload.name)?;
    // A new non-working day reshapes every aggregate in its month.
    summary_cache::invalidate_all();

    Ok(HttpResponse::Created().json(holiday))
}

#[utoipa::path(
    get,
    path = "/api/holidays",
    responses((status = 200, body = Vec<Holiday>)),
    tag = "Holidays"
)]
pub async fn list_holidays(store: web::Data<AppStore>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(store.list_holidays()))
}

#[utoipa::path(
    delete,
    path = "/api/holidays/{id}",
    params(("id" = u64, Path, description = "Holiday ID")),
    responses(
        (status = 200, description = "Holiday deleted"),
        (status = 404, description = "Holiday not found")
    ),
    tag = "Holidays"
)]
pub async fn delete_holiday(
    store: web::Data<AppStore>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    store.delete_holiday(path.into_inner())?;
    summary_cache::invalidate_all();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Holiday deleted"
    })))
}
