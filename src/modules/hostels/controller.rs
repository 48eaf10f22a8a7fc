use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;
use utoipa::IntoParams;
use validator::Validate;

use crate::modules::hostels::model::{
    CreateBookingDto, CreateHostelDto, CreateRoomDto, Hostel, Room, StudentRoomBooking,
    UpdateHostelDto, UpdateRoomDto,
};
use crate::modules::hostels::service::HostelService;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[derive(Debug, Deserialize, IntoParams)]
pub struct RoomFilterParams {
    pub hostel_id: Option<i64>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct BookingFilterParams {
    pub student_id: Option<i64>,
}

#[utoipa::path(
    post,
    path = "/api/hostels",
    request_body = CreateHostelDto,
    responses((status = 201, description = "Hostel created", body = Hostel)),
    tag = "Hostels"
)]
#[instrument(skip(state))]
pub async fn create_hostel(
    State(state): State<AppState>,
    Json(dto): Json<CreateHostelDto>,
) -> Result<(StatusCode, Json<Hostel>), AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;
    let hostel = HostelService::create_hostel(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(hostel)))
}

#[utoipa::path(
    get,
    path = "/api/hostels",
    responses((status = 200, description = "All hostels", body = [Hostel])),
    tag = "Hostels"
)]
#[instrument(skip(state))]
pub async fn get_hostels(State(state): State<AppState>) -> Result<Json<Vec<Hostel>>, AppError> {
    let hostels = HostelService::get_hostels(&state.db).await?;
    Ok(Json(hostels))
}

#[utoipa::path(
    get,
    path = "/api/hostels/{id}",
    params(("id" = i64, Path, description = "Hostel id")),
    responses(
        (status = 200, description = "Hostel", body = Hostel),
        (status = 404, description = "Hostel not found")
    ),
    tag = "Hostels"
)]
#[instrument(skip(state))]
pub async fn get_hostel(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Hostel>, AppError> {
    let hostel = HostelService::get_hostel(&state.db, id).await?;
    Ok(Json(hostel))
}

#[utoipa::path(
    patch,
    path = "/api/hostels/{id}",
    params(("id" = i64, Path, description = "Hostel id")),
    request_body = UpdateHostelDto,
    responses(
        (status = 200, description = "Hostel updated", body = Hostel),
        (status = 404, description = "Hostel not found")
    ),
    tag = "Hostels"
)]
#[instrument(skip(state))]
pub async fn update_hostel(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<UpdateHostelDto>,
) -> Result<Json<Hostel>, AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;
    let hostel = HostelService::update_hostel(&state.db, id, dto).await?;
    Ok(Json(hostel))
}

#[utoipa::path(
    delete,
    path = "/api/hostels/{id}",
    params(("id" = i64, Path, description = "Hostel id")),
    responses(
        (status = 204, description = "Hostel deleted"),
        (status = 404, description = "Hostel not found"),
        (status = 412, description = "Hostel still has rooms")
    ),
    tag = "Hostels"
)]
#[instrument(skip(state))]
pub async fn delete_hostel(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    HostelService::delete_hostel(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/rooms",
    request_body = CreateRoomDto,
    responses(
        (status = 201, description = "Room created", body = Room),
        (status = 404, description = "Hostel not found"),
        (status = 409, description = "Room number taken in this hostel")
    ),
    tag = "Hostels"
)]
#[instrument(skip(state))]
pub async fn create_room(
    State(state): State<AppState>,
    Json(dto): Json<CreateRoomDto>,
) -> Result<(StatusCode, Json<Room>), AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;
    let room = HostelService::create_room(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(room)))
}

#[utoipa::path(
    get,
    path = "/api/rooms",
    params(RoomFilterParams),
    responses((status = 200, description = "Rooms", body = [Room])),
    tag = "Hostels"
)]
#[instrument(skip(state))]
pub async fn get_rooms(
    State(state): State<AppState>,
    Query(params): Query<RoomFilterParams>,
) -> Result<Json<Vec<Room>>, AppError> {
    let rooms = HostelService::get_rooms(&state.db, params.hostel_id).await?;
    Ok(Json(rooms))
}

#[utoipa::path(
    get,
    path = "/api/rooms/{id}",
    params(("id" = i64, Path, description = "Room id")),
    responses(
        (status = 200, description = "Room", body = Room),
        (status = 404, description = "Room not found")
    ),
    tag = "Hostels"
)]
#[instrument(skip(state))]
pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Room>, AppError> {
    let room = HostelService::get_room(&state.db, id).await?;
    Ok(Json(room))
}

#[utoipa::path(
    patch,
    path = "/api/rooms/{id}",
    params(("id" = i64, Path, description = "Room id")),
    request_body = UpdateRoomDto,
    responses(
        (status = 200, description = "Room updated", body = Room),
        (status = 404, description = "Room not found"),
        (status = 422, description = "Capacity below current occupancy")
    ),
    tag = "Hostels"
)]
#[instrument(skip(state))]
pub async fn update_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(dto): Json<UpdateRoomDto>,
) -> Result<Json<Room>, AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;
    let room = HostelService::update_room(&state.db, id, dto).await?;
    Ok(Json(room))
}

#[utoipa::path(
    delete,
    path = "/api/rooms/{id}",
    params(("id" = i64, Path, description = "Room id")),
    responses(
        (status = 204, description = "Room deleted"),
        (status = 404, description = "Room not found"),
        (status = 412, description = "Room has bookings")
    ),
    tag = "Hostels"
)]
#[instrument(skip(state))]
pub async fn delete_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    HostelService::delete_room(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/bookings",
    request_body = CreateBookingDto,
    responses(
        (status = 201, description = "Bed booked", body = StudentRoomBooking),
        (status = 404, description = "Student or room not found"),
        (status = 412, description = "Room unavailable or at capacity"),
        (status = 422, description = "Invalid date range")
    ),
    tag = "Hostels"
)]
#[instrument(skip(state))]
pub async fn create_booking(
    State(state): State<AppState>,
    Json(dto): Json<CreateBookingDto>,
) -> Result<(StatusCode, Json<StudentRoomBooking>), AppError> {
    let booking = HostelService::book(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

#[utoipa::path(
    get,
    path = "/api/bookings",
    params(BookingFilterParams),
    responses((status = 200, description = "Bookings", body = [StudentRoomBooking])),
    tag = "Hostels"
)]
#[instrument(skip(state))]
pub async fn get_bookings(
    State(state): State<AppState>,
    Query(params): Query<BookingFilterParams>,
) -> Result<Json<Vec<StudentRoomBooking>>, AppError> {
    let bookings = HostelService::get_bookings(&state.db, params.student_id).await?;
    Ok(Json(bookings))
}

#[utoipa::path(
    delete,
    path = "/api/bookings/{id}",
    params(("id" = i64, Path, description = "Booking id")),
    responses(
        (status = 204, description = "Booking released"),
        (status = 404, description = "Booking not found")
    ),
    tag = "Hostels"
)]
#[instrument(skip(state))]
pub async fn release_booking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    HostelService::release(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
