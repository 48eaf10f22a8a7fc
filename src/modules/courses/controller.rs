use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;
use utoipa::IntoParams;
use validator::Validate;

use crate::modules::courses::model::{
    AssignLecturerDto, Course, CourseWithPrerequisites, CreateCourseDto, UpdateCourseDto,
};
use crate::modules::courses::service::CourseService;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[derive(Debug, Deserialize, IntoParams)]
pub struct CourseFilterParams {
    pub program: Option<String>,
    pub semester_id: Option<i64>,
}

#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 200, description = "Course created", body = CourseWithPrerequisites),
        (status = 404, description = "Semester or prerequisite course not found")
    ),
    tag = "Courses"
)]
#[instrument(skip(state, dto))]
pub async fn create_course(
    State(state): State<AppState>,
    Json(dto): Json<CreateCourseDto>,
) -> Result<Json<CourseWithPrerequisites>, AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;

    let course = CourseService::create_course(&state.db, dto).await?;
    Ok(Json(course))
}

#[utoipa::path(
    get,
    path = "/api/courses",
    params(CourseFilterParams),
    responses((status = 200, description = "Courses", body = [CourseWithPrerequisites])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_courses(
    State(state): State<AppState>,
    Query(params): Query<CourseFilterParams>,
) -> Result<Json<Vec<CourseWithPrerequisites>>, AppError> {
    let courses = CourseService::get_courses(&state.db, params.program, params.semester_id).await?;
    Ok(Json(courses))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = i64, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course details", body = CourseWithPrerequisites),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CourseWithPrerequisites>, AppError> {
    let course = CourseService::get_course(&state.db, id).await?;
    Ok(Json(course))
}

#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(("id" = i64, Path, description = "Course ID")),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated", body = CourseWithPrerequisites),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses"
)]
#[instrument(skip(state, dto))]
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<UpdateCourseDto>,
) -> Result<Json<CourseWithPrerequisites>, AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;

    let course = CourseService::update_course(&state.db, id, dto).await?;
    Ok(Json(course))
}

#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(("id" = i64, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course deleted"),
        (status = 404, description = "Course not found"),
        (status = 412, description = "Course still has registrations")
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    CourseService::delete_course(&state.db, id).await?;
    Ok(Json(json!({"message": "Course deleted successfully"})))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}/dependents",
    params(("id" = i64, Path, description = "Course ID")),
    responses((status = 200, description = "Courses that list this one as a prerequisite", body = [Course])),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_dependent_courses(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Course>>, AppError> {
    let courses = CourseService::dependent_courses(&state.db, id).await?;
    Ok(Json(courses))
}

#[utoipa::path(
    post,
    path = "/api/courses/{id}/prerequisites/{prereq_id}",
    params(
        ("id" = i64, Path, description = "Course ID"),
        ("prereq_id" = i64, Path, description = "Prerequisite course ID")
    ),
    responses(
        (status = 200, description = "Edge added", body = CourseWithPrerequisites),
        (status = 404, description = "Course not found"),
        (status = 422, description = "Self-referential edge")
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn add_prerequisite(
    State(state): State<AppState>,
    Path((id, prereq_id)): Path<(i64, i64)>,
) -> Result<Json<CourseWithPrerequisites>, AppError> {
    let course = CourseService::add_prerequisite(&state.db, id, prereq_id).await?;
    Ok(Json(course))
}

#[utoipa::path(
    delete,
    path = "/api/courses/{id}/prerequisites/{prereq_id}",
    params(
        ("id" = i64, Path, description = "Course ID"),
        ("prereq_id" = i64, Path, description = "Prerequisite course ID")
    ),
    responses(
        (status = 200, description = "Edge removed", body = CourseWithPrerequisites),
        (status = 404, description = "Edge not found")
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn remove_prerequisite(
    State(state): State<AppState>,
    Path((id, prereq_id)): Path<(i64, i64)>,
) -> Result<Json<CourseWithPrerequisites>, AppError> {
    let course = CourseService::remove_prerequisite(&state.db, id, prereq_id).await?;
    Ok(Json(course))
}

#[utoipa::path(
    put,
    path = "/api/courses/{id}/lecturer",
    params(("id" = i64, Path, description = "Course ID")),
    request_body = AssignLecturerDto,
    responses(
        (status = 200, description = "Lecturer assigned", body = CourseWithPrerequisites),
        (status = 404, description = "Course or lecturer not found")
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn assign_lecturer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<AssignLecturerDto>,
) -> Result<Json<CourseWithPrerequisites>, AppError> {
    let course = CourseService::assign_lecturer(&state.db, id, dto.lecturer_id).await?;
    Ok(Json(course))
}
