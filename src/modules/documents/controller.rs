use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;
use utoipa::IntoParams;
use validator::Validate;

use crate::modules::documents::model::{
    CreateDocumentRequestDto, DocumentRequest, UpdateDocumentRequestDto,
};
use crate::modules::documents::service::DocumentService;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[derive(Debug, Deserialize, IntoParams)]
pub struct DocumentFilterParams {
    pub student_id: Option<i64>,
}

#[utoipa::path(
    post,
    path = "/api/documents",
    request_body = CreateDocumentRequestDto,
    responses(
        (status = 201, description = "Document request filed", body = DocumentRequest),
        (status = 404, description = "Student not found")
    ),
    tag = "Documents"
)]
#[instrument(skip(state))]
pub async fn create_document_request(
    State(state): State<AppState>,
    Json(dto): Json<CreateDocumentRequestDto>,
) -> Result<(StatusCode, Json<DocumentRequest>), AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;
    let request = DocumentService::create_request(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

#[utoipa::path(
    get,
    path = "/api/documents",
    params(DocumentFilterParams),
    responses((status = 200, description = "Document requests", body = [DocumentRequest])),
    tag = "Documents"
)]
#[instrument(skip(state))]
pub async fn get_document_requests(
    State(state): State<AppState>,
    Query(params): Query<DocumentFilterParams>,
) -> Result<Json<Vec<DocumentRequest>>, AppError> {
    let requests = DocumentService::get_requests(&state.db, params.student_id).await?;
    Ok(Json(requests))
}

#[utoipa::path(
    patch,
    path = "/api/documents/{id}",
    params(("id" = i64, Path, description = "Document request id")),
    request_body = UpdateDocumentRequestDto,
    responses(
        (status = 200, description = "Request status updated", body = DocumentRequest),
        (status = 404, description = "Document request not found")
    ),
    tag = "Documents"
)]
#[instrument(skip(state))]
pub async fn update_document_request(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<UpdateDocumentRequestDto>,
) -> Result<Json<DocumentRequest>, AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;
    let request = DocumentService::update_status(&state.db, id, dto).await?;
    Ok(Json(request))
}

#[utoipa::path(
    delete,
    path = "/api/documents/{id}",
    params(("id" = i64, Path, description = "Document request id")),
    responses(
        (status = 204, description = "Document request deleted"),
        (status = 404, description = "Document request not found")
    ),
    tag = "Documents"
)]
#[instrument(skip(state))]
pub async fn delete_document_request(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    DocumentService::delete_request(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
