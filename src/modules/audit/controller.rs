use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;
use utoipa::IntoParams;
use validator::Validate;

use crate::modules::audit::model::{AuditLog, CreateAuditLogDto};
use crate::modules::audit::service::AuditService;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[derive(Debug, Deserialize, IntoParams)]
pub struct AuditFilterParams {
    pub user_id: Option<i64>,
}

#[utoipa::path(
    post,
    path = "/api/audit-logs",
    request_body = CreateAuditLogDto,
    responses(
        (status = 201, description = "Audit log recorded", body = AuditLog),
        (status = 404, description = "User not found")
    ),
    tag = "Audit"
)]
#[instrument(skip(state))]
pub async fn create_audit_log(
    State(state): State<AppState>,
    Json(dto): Json<CreateAuditLogDto>,
) -> Result<(StatusCode, Json<AuditLog>), AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;
    let log = AuditService::record(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

#[utoipa::path(
    get,
    path = "/api/audit-logs",
    params(AuditFilterParams),
    responses((status = 200, description = "Audit trail, newest first", body = [AuditLog])),
    tag = "Audit"
)]
#[instrument(skip(state))]
pub async fn get_audit_logs(
    State(state): State<AppState>,
    Query(params): Query<AuditFilterParams>,
) -> Result<Json<Vec<AuditLog>>, AppError> {
    let logs = AuditService::get_logs(&state.db, params.user_id).await?;
    Ok(Json(logs))
}
