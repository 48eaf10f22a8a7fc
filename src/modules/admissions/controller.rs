use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;
use utoipa::IntoParams;
use validator::Validate;

use crate::modules::admissions::model::{
    AdmissionApplication, DecideApplicationDto, SubmitApplicationDto,
};
use crate::modules::admissions::service::AdmissionService;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ApplicationFilterParams {
    /// One of pending, approved, rejected
    pub status: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/admissions",
    request_body = SubmitApplicationDto,
    responses((status = 201, description = "Application submitted", body = AdmissionApplication)),
    tag = "Admissions"
)]
#[instrument(skip(state))]
pub async fn submit_application(
    State(state): State<AppState>,
    Json(dto): Json<SubmitApplicationDto>,
) -> Result<(StatusCode, Json<AdmissionApplication>), AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;
    let application = AdmissionService::submit(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

#[utoipa::path(
    get,
    path = "/api/admissions",
    params(ApplicationFilterParams),
    responses(
        (status = 200, description = "Applications", body = [AdmissionApplication]),
        (status = 422, description = "Unknown status filter")
    ),
    tag = "Admissions"
)]
#[instrument(skip(state))]
pub async fn get_applications(
    State(state): State<AppState>,
    Query(params): Query<ApplicationFilterParams>,
) -> Result<Json<Vec<AdmissionApplication>>, AppError> {
    let applications = AdmissionService::get_applications(&state.db, params.status).await?;
    Ok(Json(applications))
}

#[utoipa::path(
    get,
    path = "/api/admissions/{id}",
    params(("id" = i64, Path, description = "Application id")),
    responses(
        (status = 200, description = "Application", body = AdmissionApplication),
        (status = 404, description = "Application not found")
    ),
    tag = "Admissions"
)]
#[instrument(skip(state))]
pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AdmissionApplication>, AppError> {
    let application = AdmissionService::get_application(&state.db, id).await?;
    Ok(Json(application))
}

#[utoipa::path(
    post,
    path = "/api/admissions/{id}/approve",
    params(("id" = i64, Path, description = "Application id")),
    request_body = DecideApplicationDto,
    responses(
        (status = 200, description = "Application approved", body = AdmissionApplication),
        (status = 404, description = "Application or admin not found"),
        (status = 412, description = "Application already decided")
    ),
    tag = "Admissions"
)]
#[instrument(skip(state))]
pub async fn approve_application(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<DecideApplicationDto>,
) -> Result<Json<AdmissionApplication>, AppError> {
    let application = AdmissionService::approve(&state.db, id, dto).await?;
    Ok(Json(application))
}

#[utoipa::path(
    post,
    path = "/api/admissions/{id}/reject",
    params(("id" = i64, Path, description = "Application id")),
    request_body = DecideApplicationDto,
    responses(
        (status = 200, description = "Application rejected", body = AdmissionApplication),
        (status = 404, description = "Application or admin not found"),
        (status = 412, description = "Application already decided"),
        (status = 422, description = "Missing rejection reason")
    ),
    tag = "Admissions"
)]
#[instrument(skip(state))]
pub async fn reject_application(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<DecideApplicationDto>,
) -> Result<Json<AdmissionApplication>, AppError> {
    let application = AdmissionService::reject(&state.db, id, dto).await?;
    Ok(Json(application))
}
