use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::instrument;
use utoipa::IntoParams;

use crate::modules::grades::model::{CreateGradeDto, Grade, GradeListing};
use crate::modules::grades::service::GradeService;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[derive(Debug, Deserialize, IntoParams)]
pub struct GradeFilterParams {
    pub student_id: Option<i64>,
    pub semester_id: Option<i64>,
}

#[utoipa::path(
    post,
    path = "/api/grades",
    request_body = CreateGradeDto,
    responses(
        (status = 200, description = "Grade recorded", body = Grade),
        (status = 404, description = "Student or course not found"),
        (status = 409, description = "Grade already recorded for this triple"),
        (status = 422, description = "Grade not on the letter scale")
    ),
    tag = "Grades"
)]
#[instrument(skip(state))]
pub async fn create_grade(
    State(state): State<AppState>,
    Json(dto): Json<CreateGradeDto>,
) -> Result<Json<Grade>, AppError> {
    let grade = GradeService::record_grade(&state.db, dto).await?;
    Ok(Json(grade))
}

#[utoipa::path(
    get,
    path = "/api/grades",
    params(GradeFilterParams),
    responses((status = 200, description = "Grades", body = [GradeListing])),
    tag = "Grades"
)]
#[instrument(skip(state))]
pub async fn get_grades(
    State(state): State<AppState>,
    Query(params): Query<GradeFilterParams>,
) -> Result<Json<Vec<GradeListing>>, AppError> {
    let grades = GradeService::get_grades(&state.db, params.student_id, params.semester_id).await?;
    Ok(Json(grades))
}
