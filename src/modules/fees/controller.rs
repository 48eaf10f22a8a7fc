use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;
use utoipa::IntoParams;
use validator::Validate;

use crate::modules::fees::model::{
    ClearanceStats, CreateFeeStructureDto, CreatePaymentDto, FeeClearance, FeeStructure, Payment,
    UpdateFeeStructureDto, UpsertClearanceDto,
};
use crate::modules::fees::service::FeeService;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[derive(Debug, Deserialize, IntoParams)]
pub struct FeeFilterParams {
    pub semester_id: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PaymentFilterParams {
    pub student_id: Option<i64>,
}

#[utoipa::path(
    post,
    path = "/api/fees",
    request_body = CreateFeeStructureDto,
    responses(
        (status = 201, description = "Fee structure created", body = FeeStructure),
        (status = 404, description = "Course, hostel or semester not found"),
        (status = 409, description = "Fee structure already exists for this combination")
    ),
    tag = "Fees"
)]
#[instrument(skip(state))]
pub async fn create_fee_structure(
    State(state): State<AppState>,
    Json(dto): Json<CreateFeeStructureDto>,
) -> Result<(StatusCode, Json<FeeStructure>), AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;
    let fee = FeeService::create_fee_structure(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(fee)))
}

#[utoipa::path(
    get,
    path = "/api/fees",
    params(FeeFilterParams),
    responses((status = 200, description = "Fee structures", body = [FeeStructure])),
    tag = "Fees"
)]
#[instrument(skip(state))]
pub async fn get_fee_structures(
    State(state): State<AppState>,
    Query(params): Query<FeeFilterParams>,
) -> Result<Json<Vec<FeeStructure>>, AppError> {
    let fees = FeeService::get_fee_structures(&state.db, params.semester_id).await?;
    Ok(Json(fees))
}

#[utoipa::path(
    get,
    path = "/api/fees/{id}",
    params(("id" = i64, Path, description = "Fee structure id")),
    responses(
        (status = 200, description = "Fee structure", body = FeeStructure),
        (status = 404, description = "Fee structure not found")
    ),
    tag = "Fees"
)]
#[instrument(skip(state))]
pub async fn get_fee_structure(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<FeeStructure>, AppError> {
    let fee = FeeService::get_fee_structure(&state.db, id).await?;
    Ok(Json(fee))
}

#[utoipa::path(
    put,
    path = "/api/fees/{id}",
    params(("id" = i64, Path, description = "Fee structure id")),
    request_body = UpdateFeeStructureDto,
    responses(
        (status = 200, description = "Fee structure updated", body = FeeStructure),
        (status = 404, description = "Fee structure, course, hostel or semester not found"),
        (status = 409, description = "Fee structure already exists for this combination")
    ),
    tag = "Fees"
)]
#[instrument(skip(state))]
pub async fn update_fee_structure(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<UpdateFeeStructureDto>,
) -> Result<Json<FeeStructure>, AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;
    let fee = FeeService::update_fee_structure(&state.db, id, dto).await?;
    Ok(Json(fee))
}

#[utoipa::path(
    delete,
    path = "/api/fees/{id}",
    params(("id" = i64, Path, description = "Fee structure id")),
    responses(
        (status = 204, description = "Fee structure deleted"),
        (status = 404, description = "Fee structure not found"),
        (status = 412, description = "Payments reference this fee structure")
    ),
    tag = "Fees"
)]
#[instrument(skip(state))]
pub async fn delete_fee_structure(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    FeeService::delete_fee_structure(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/payments",
    request_body = CreatePaymentDto,
    responses(
        (status = 201, description = "Payment recorded", body = Payment),
        (status = 404, description = "Student or fee structure not found")
    ),
    tag = "Fees"
)]
#[instrument(skip(state))]
pub async fn create_payment(
    State(state): State<AppState>,
    Json(dto): Json<CreatePaymentDto>,
) -> Result<(StatusCode, Json<Payment>), AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;
    let payment = FeeService::record_payment(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

#[utoipa::path(
    get,
    path = "/api/payments",
    params(PaymentFilterParams),
    responses((status = 200, description = "Payments", body = [Payment])),
    tag = "Fees"
)]
#[instrument(skip(state))]
pub async fn get_payments(
    State(state): State<AppState>,
    Query(params): Query<PaymentFilterParams>,
) -> Result<Json<Vec<Payment>>, AppError> {
    let payments = FeeService::get_payments(&state.db, params.student_id).await?;
    Ok(Json(payments))
}

#[utoipa::path(
    put,
    path = "/api/clearances",
    request_body = UpsertClearanceDto,
    responses(
        (status = 200, description = "Clearance upserted", body = FeeClearance),
        (status = 404, description = "Student not found"),
        (status = 422, description = "Unknown clearance status")
    ),
    tag = "Fees"
)]
#[instrument(skip(state))]
pub async fn upsert_clearance(
    State(state): State<AppState>,
    Json(dto): Json<UpsertClearanceDto>,
) -> Result<Json<FeeClearance>, AppError> {
    let clearance = FeeService::upsert_clearance(&state.db, dto).await?;
    Ok(Json(clearance))
}

#[utoipa::path(
    get,
    path = "/api/clearances",
    responses((status = 200, description = "All clearances", body = [FeeClearance])),
    tag = "Fees"
)]
#[instrument(skip(state))]
pub async fn get_clearances(
    State(state): State<AppState>,
) -> Result<Json<Vec<FeeClearance>>, AppError> {
    let clearances = FeeService::get_clearances(&state.db).await?;
    Ok(Json(clearances))
}

#[utoipa::path(
    get,
    path = "/api/clearances/stats",
    responses((status = 200, description = "Clearance counts by status", body = ClearanceStats)),
    tag = "Fees"
)]
#[instrument(skip(state))]
pub async fn get_clearance_stats(
    State(state): State<AppState>,
) -> Result<Json<ClearanceStats>, AppError> {
    let stats = FeeService::clearance_stats(&state.db).await?;
    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/api/clearances/{student_id}",
    params(("student_id" = i64, Path, description = "Student profile id")),
    responses(
        (status = 200, description = "Clearance", body = FeeClearance),
        (status = 404, description = "No clearance record for this student")
    ),
    tag = "Fees"
)]
#[instrument(skip(state))]
pub async fn get_clearance(
    State(state): State<AppState>,
    Path(student_id): Path<i64>,
) -> Result<Json<FeeClearance>, AppError> {
    let clearance = FeeService::get_clearance(&state.db, student_id).await?;
    Ok(Json(clearance))
}
