use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;
use utoipa::IntoParams;
use validator::Validate;

use crate::modules::assignments::model::{Assignment, CreateAssignmentDto, SubmitAssignmentDto};
use crate::modules::assignments::service::AssignmentService;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[derive(Debug, Deserialize, IntoParams)]
pub struct AssignmentFilterParams {
    pub lecturer_id: Option<i64>,
}

#[utoipa::path(
    post,
    path = "/api/assignments",
    request_body = CreateAssignmentDto,
    responses(
        (status = 201, description = "Assignment created", body = Assignment),
        (status = 404, description = "Lecturer not found")
    ),
    tag = "Assignments"
)]
#[instrument(skip(state))]
pub async fn create_assignment(
    State(state): State<AppState>,
    Json(dto): Json<CreateAssignmentDto>,
) -> Result<(StatusCode, Json<Assignment>), AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;
    let assignment = AssignmentService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

#[utoipa::path(
    get,
    path = "/api/assignments",
    params(AssignmentFilterParams),
    responses((status = 200, description = "Assignments by due date", body = [Assignment])),
    tag = "Assignments"
)]
#[instrument(skip(state))]
pub async fn get_assignments(
    State(state): State<AppState>,
    Query(params): Query<AssignmentFilterParams>,
) -> Result<Json<Vec<Assignment>>, AppError> {
    let assignments = AssignmentService::get_assignments(&state.db, params.lecturer_id).await?;
    Ok(Json(assignments))
}

#[utoipa::path(
    get,
    path = "/api/assignments/{id}",
    params(("id" = i64, Path, description = "Assignment id")),
    responses(
        (status = 200, description = "Assignment", body = Assignment),
        (status = 404, description = "Assignment not found")
    ),
    tag = "Assignments"
)]
#[instrument(skip(state))]
pub async fn get_assignment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Assignment>, AppError> {
    let assignment = AssignmentService::get_assignment(&state.db, id).await?;
    Ok(Json(assignment))
}

#[utoipa::path(
    post,
    path = "/api/assignments/{id}/submit",
    params(("id" = i64, Path, description = "Assignment id")),
    request_body = SubmitAssignmentDto,
    responses(
        (status = 200, description = "Submission recorded", body = Assignment),
        (status = 404, description = "Assignment or student not found")
    ),
    tag = "Assignments"
)]
#[instrument(skip(state))]
pub async fn submit_assignment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<SubmitAssignmentDto>,
) -> Result<Json<Assignment>, AppError> {
    let assignment = AssignmentService::submit(&state.db, id, dto).await?;
    Ok(Json(assignment))
}

#[utoipa::path(
    delete,
    path = "/api/assignments/{id}",
    params(("id" = i64, Path, description = "Assignment id")),
    responses(
        (status = 204, description = "Assignment deleted"),
        (status = 404, description = "Assignment not found")
    ),
    tag = "Assignments"
)]
#[instrument(skip(state))]
pub async fn delete_assignment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    AssignmentService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
