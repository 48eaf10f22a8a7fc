use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;
use tracing::instrument;
use validator::Validate;

use crate::modules::semesters::model::{CreateSemesterDto, Semester, UpdateSemesterDto};
use crate::modules::semesters::service::SemesterService;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[utoipa::path(
    post,
    path = "/api/semesters",
    request_body = CreateSemesterDto,
    responses(
        (status = 200, description = "Semester created", body = Semester),
        (status = 422, description = "Invalid dates")
    ),
    tag = "Semesters"
)]
#[instrument(skip(state, dto))]
pub async fn create_semester(
    State(state): State<AppState>,
    Json(dto): Json<CreateSemesterDto>,
) -> Result<Json<Semester>, AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;

    let semester = SemesterService::create_semester(&state.db, dto).await?;
    Ok(Json(semester))
}

#[utoipa::path(
    get,
    path = "/api/semesters",
    responses((status = 200, description = "All semesters", body = [Semester])),
    tag = "Semesters"
)]
#[instrument(skip(state))]
pub async fn get_semesters(State(state): State<AppState>) -> Result<Json<Vec<Semester>>, AppError> {
    let semesters = SemesterService::get_semesters(&state.db).await?;
    Ok(Json(semesters))
}

#[utoipa::path(
    get,
    path = "/api/semesters/active",
    responses(
        (status = 200, description = "The active semester", body = Semester),
        (status = 404, description = "No active semester")
    ),
    tag = "Semesters"
)]
#[instrument(skip(state))]
pub async fn get_active_semester(
    State(state): State<AppState>,
) -> Result<Json<Semester>, AppError> {
    let semester = SemesterService::get_active_semester(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("No active semester")))?;
    Ok(Json(semester))
}

#[utoipa::path(
    get,
    path = "/api/semesters/{id}",
    params(("id" = i64, Path, description = "Semester ID")),
    responses(
        (status = 200, description = "Semester details", body = Semester),
        (status = 404, description = "Semester not found")
    ),
    tag = "Semesters"
)]
#[instrument(skip(state))]
pub async fn get_semester(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Semester>, AppError> {
    let semester = SemesterService::get_semester(&state.db, id).await?;
    Ok(Json(semester))
}

#[utoipa::path(
    put,
    path = "/api/semesters/{id}",
    params(("id" = i64, Path, description = "Semester ID")),
    request_body = UpdateSemesterDto,
    responses(
        (status = 200, description = "Semester updated", body = Semester),
        (status = 404, description = "Semester not found")
    ),
    tag = "Semesters"
)]
#[instrument(skip(state, dto))]
pub async fn update_semester(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<UpdateSemesterDto>,
) -> Result<Json<Semester>, AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;

    let semester = SemesterService::update_semester(&state.db, id, dto).await?;
    Ok(Json(semester))
}

#[utoipa::path(
    put,
    path = "/api/semesters/{id}/activate",
    params(("id" = i64, Path, description = "Semester ID")),
    responses(
        (status = 200, description = "Semester activated", body = Semester),
        (status = 404, description = "Semester not found")
    ),
    tag = "Semesters"
)]
#[instrument(skip(state))]
pub async fn activate_semester(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Semester>, AppError> {
    let semester = SemesterService::activate_semester(&state.db, id).await?;
    Ok(Json(semester))
}

#[utoipa::path(
    delete,
    path = "/api/semesters/{id}",
    params(("id" = i64, Path, description = "Semester ID")),
    responses(
        (status = 200, description = "Semester deleted"),
        (status = 404, description = "Semester not found"),
        (status = 412, description = "Semester still has courses")
    ),
    tag = "Semesters"
)]
#[instrument(skip(state))]
pub async fn delete_semester(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    SemesterService::delete_semester(&state.db, id).await?;
    Ok(Json(json!({"message": "Semester deleted successfully"})))
}
