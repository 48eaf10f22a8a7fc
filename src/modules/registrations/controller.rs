use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;
use utoipa::IntoParams;

use crate::modules::registrations::model::{
    CreateRegistrationDto, RegistrationListing, UnitRegistration,
};
use crate::modules::registrations::service::RegistrationService;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[derive(Debug, Deserialize, IntoParams)]
pub struct RegistrationFilterParams {
    pub student_id: Option<i64>,
    pub semester_id: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct UnregisterParams {
    pub student_id: i64,
}

#[utoipa::path(
    post,
    path = "/api/registrations",
    request_body = CreateRegistrationDto,
    responses(
        (status = 200, description = "Registration created", body = UnitRegistration),
        (status = 404, description = "Student, course or semester not found"),
        (status = 409, description = "Duplicate registration"),
        (status = 412, description = "Prerequisites not met")
    ),
    tag = "Registrations"
)]
#[instrument(skip(state))]
pub async fn create_registration(
    State(state): State<AppState>,
    Json(dto): Json<CreateRegistrationDto>,
) -> Result<Json<UnitRegistration>, AppError> {
    let registration = RegistrationService::register(&state.db, dto).await?;
    Ok(Json(registration))
}

#[utoipa::path(
    get,
    path = "/api/registrations",
    params(RegistrationFilterParams),
    responses((status = 200, description = "Registrations", body = [RegistrationListing])),
    tag = "Registrations"
)]
#[instrument(skip(state))]
pub async fn get_registrations(
    State(state): State<AppState>,
    Query(params): Query<RegistrationFilterParams>,
) -> Result<Json<Vec<RegistrationListing>>, AppError> {
    let registrations =
        RegistrationService::get_registrations(&state.db, params.student_id, params.semester_id)
            .await?;
    Ok(Json(registrations))
}

#[utoipa::path(
    delete,
    path = "/api/registrations/{id}",
    params(
        ("id" = i64, Path, description = "Registration ID"),
        UnregisterParams
    ),
    responses(
        (status = 200, description = "Registration removed"),
        (status = 404, description = "Registration not found for this student")
    ),
    tag = "Registrations"
)]
#[instrument(skip(state))]
pub async fn delete_registration(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<UnregisterParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    RegistrationService::unregister(&state.db, id, params.student_id).await?;
    Ok(Json(json!({"message": "Registration removed successfully"})))
}
