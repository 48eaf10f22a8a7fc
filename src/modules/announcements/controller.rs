use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;
use validator::Validate;

use crate::modules::announcements::model::{
    Announcement, CreateAnnouncementDto, UpdateAnnouncementDto,
};
use crate::modules::announcements::service::AnnouncementService;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[utoipa::path(
    post,
    path = "/api/announcements",
    request_body = CreateAnnouncementDto,
    responses(
        (status = 201, description = "Announcement posted", body = Announcement),
        (status = 404, description = "Posting user not found")
    ),
    tag = "Announcements"
)]
#[instrument(skip(state))]
pub async fn create_announcement(
    State(state): State<AppState>,
    Json(dto): Json<CreateAnnouncementDto>,
) -> Result<(StatusCode, Json<Announcement>), AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;
    let announcement = AnnouncementService::create(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(announcement)))
}

#[utoipa::path(
    get,
    path = "/api/announcements",
    responses((status = 200, description = "Announcements, newest first", body = [Announcement])),
    tag = "Announcements"
)]
#[instrument(skip(state))]
pub async fn get_announcements(
    State(state): State<AppState>,
) -> Result<Json<Vec<Announcement>>, AppError> {
    let announcements = AnnouncementService::get_announcements(&state.db).await?;
    Ok(Json(announcements))
}

#[utoipa::path(
    get,
    path = "/api/announcements/{id}",
    params(("id" = i64, Path, description = "Announcement id")),
    responses(
        (status = 200, description = "Announcement", body = Announcement),
        (status = 404, description = "Announcement not found")
    ),
    tag = "Announcements"
)]
#[instrument(skip(state))]
pub async fn get_announcement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Announcement>, AppError> {
    let announcement = AnnouncementService::get_announcement(&state.db, id).await?;
    Ok(Json(announcement))
}

#[utoipa::path(
    patch,
    path = "/api/announcements/{id}",
    params(("id" = i64, Path, description = "Announcement id")),
    request_body = UpdateAnnouncementDto,
    responses(
        (status = 200, description = "Announcement updated", body = Announcement),
        (status = 404, description = "Announcement not found")
    ),
    tag = "Announcements"
)]
#[instrument(skip(state))]
pub async fn update_announcement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<UpdateAnnouncementDto>,
) -> Result<Json<Announcement>, AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;
    let announcement = AnnouncementService::update(&state.db, id, dto).await?;
    Ok(Json(announcement))
}

#[utoipa::path(
    delete,
    path = "/api/announcements/{id}",
    params(("id" = i64, Path, description = "Announcement id")),
    responses(
        (status = 204, description = "Announcement deleted"),
        (status = 404, description = "Announcement not found")
    ),
    tag = "Announcements"
)]
#[instrument(skip(state))]
pub async fn delete_announcement(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    AnnouncementService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
