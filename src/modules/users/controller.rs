use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;
use utoipa::IntoParams;
use validator::Validate;

use crate::modules::users::model::{
    LecturerListing, PaginatedUsersResponse, UpdateUserDto, UserWithProfile,
};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationParams;

#[derive(Debug, Deserialize, IntoParams)]
pub struct UserFilterParams {
    /// Filter by role (admin, student, lecturer)
    pub role: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/users",
    params(UserFilterParams, PaginationParams),
    responses(
        (status = 200, description = "Paginated users with profiles", body = PaginatedUsersResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_users(
    State(state): State<AppState>,
    Query(params): Query<UserFilterParams>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedUsersResponse>, AppError> {
    let (data, meta) = UserService::get_users(&state.db, params.role, pagination).await?;
    Ok(Json(PaginatedUsersResponse { data, meta }))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = UserWithProfile),
        (status = 404, description = "User not found")
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserWithProfile>, AppError> {
    let user = UserService::get_user(&state.db, id).await?;
    Ok(Json(user))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = UserWithProfile),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already in use")
    ),
    tag = "Users"
)]
#[instrument(skip(state, dto))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<UpdateUserDto>,
) -> Result<Json<UserWithProfile>, AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;

    let user = UserService::update_user(&state.db, id, dto).await?;
    Ok(Json(user))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found")
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    UserService::delete_user(&state.db, id).await?;
    Ok(Json(json!({"message": "User deleted successfully"})))
}

#[utoipa::path(
    get,
    path = "/api/users/lecturers",
    responses(
        (status = 200, description = "List of lecturers", body = [LecturerListing])
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_lecturers(
    State(state): State<AppState>,
) -> Result<Json<Vec<LecturerListing>>, AppError> {
    let lecturers = UserService::get_lecturers(&state.db).await?;
    Ok(Json(lecturers))
}

#[utoipa::path(
    get,
    path = "/api/users/programs",
    responses(
        (status = 200, description = "Distinct program names", body = [String])
    ),
    tag = "Users"
)]
#[instrument(skip(state))]
pub async fn get_programs(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let programs = UserService::get_programs(&state.db).await?;
    Ok(Json(programs))
}
