use sqlx::PgPool;
use tracing::instrument;

use crate::modules::hostels::model::{
    CreateBookingDto, CreateHostelDto, CreateRoomDto, Hostel, Room, RoomStatus,
    StudentRoomBooking, UpdateHostelDto, UpdateRoomDto, occupancy_after_booking,
    occupancy_after_release, room_can_accept,
};
use crate::utils::errors::{AppError, map_unique_violation};

const HOSTEL_COLUMNS: &str = "id, name, location, capacity, status, created_at";
const ROOM_COLUMNS: &str =
    "id, hostel_id, room_number, bed_count, capacity, price_per_bed, current_occupants, status, created_at";
const BOOKING_COLUMNS: &str = "id, student_id, room_id, start_date, end_date, booked_on";

pub struct HostelService;

impl HostelService {
    #[instrument(skip(db, dto))]
    pub async fn create_hostel(db: &PgPool, dto: CreateHostelDto) -> Result<Hostel, AppError> {
        let hostel = sqlx::query_as::<_, Hostel>(&format!(
            "INSERT INTO hostels (name, location, capacity)
             VALUES ($1, $2, $3)
             RETURNING {HOSTEL_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(&dto.location)
        .bind(dto.capacity)
        .fetch_one(db)
        .await?;

        Ok(hostel)
    }

    #[instrument(skip(db))]
    pub async fn get_hostels(db: &PgPool) -> Result<Vec<Hostel>, AppError> {
        let hostels = sqlx::query_as::<_, Hostel>(&format!(
            "SELECT {HOSTEL_COLUMNS} FROM hostels ORDER BY name"
        ))
        .fetch_all(db)
        .await?;

        Ok(hostels)
    }

    #[instrument(skip(db))]
    pub async fn get_hostel(db: &PgPool, id: i64) -> Result<Hostel, AppError> {
        let hostel = sqlx::query_as::<_, Hostel>(&format!(
            "SELECT {HOSTEL_COLUMNS} FROM hostels WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Hostel not found")))?;

        Ok(hostel)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_hostel(
        db: &PgPool,
        id: i64,
        dto: UpdateHostelDto,
    ) -> Result<Hostel, AppError> {
        let existing = Self::get_hostel(db, id).await?;

        let name = dto.name.unwrap_or(existing.name);
        let location = dto.location.unwrap_or(existing.location);
        let capacity = dto.capacity.unwrap_or(existing.capacity);
        let status = dto.status.unwrap_or(existing.status);

        let hostel = sqlx::query_as::<_, Hostel>(&format!(
            "UPDATE hostels SET name = $1, location = $2, capacity = $3, status = $4
             WHERE id = $5
             RETURNING {HOSTEL_COLUMNS}"
        ))
        .bind(&name)
        .bind(&location)
        .bind(capacity)
        .bind(&status)
        .bind(id)
        .fetch_one(db)
        .await?;

        Ok(hostel)
    }

    /// Delete a hostel. Guarded while it still owns rooms.
    #[instrument(skip(db))]
    pub async fn delete_hostel(db: &PgPool, id: i64) -> Result<(), AppError> {
        let room_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM rooms WHERE hostel_id = $1")
                .bind(id)
                .fetch_one(db)
                .await?;

        if room_count > 0 {
            return Err(AppError::precondition_failed(anyhow::anyhow!(
                "Cannot delete hostel: it still has {} room(s)",
                room_count
            )));
        }

        let result = sqlx::query("DELETE FROM hostels WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Hostel not found")));
        }

        Ok(())
    }

    #[instrument(skip(db, dto))]
    pub async fn create_room(db: &PgPool, dto: CreateRoomDto) -> Result<Room, AppError> {
        Self::get_hostel(db, dto.hostel_id).await?;

        let capacity = dto.capacity.unwrap_or(dto.bed_count);
        if capacity < 1 {
            return Err(AppError::unprocessable(anyhow::anyhow!(
                "Room capacity must be at least 1"
            )));
        }

        let room = sqlx::query_as::<_, Room>(&format!(
            "INSERT INTO rooms (hostel_id, room_number, bed_count, capacity, price_per_bed)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {ROOM_COLUMNS}"
        ))
        .bind(dto.hostel_id)
        .bind(&dto.room_number)
        .bind(dto.bed_count)
        .bind(capacity)
        .bind(dto.price_per_bed)
        .fetch_one(db)
        .await
        .map_err(|e| map_unique_violation(e, "This hostel already has a room with that number"))?;

        Ok(room)
    }

    #[instrument(skip(db))]
    pub async fn get_rooms(db: &PgPool, hostel_id: Option<i64>) -> Result<Vec<Room>, AppError> {
        let rooms = match hostel_id {
            Some(hostel_id) => {
                sqlx::query_as::<_, Room>(&format!(
                    "SELECT {ROOM_COLUMNS} FROM rooms WHERE hostel_id = $1 ORDER BY room_number"
                ))
                .bind(hostel_id)
                .fetch_all(db)
                .await?
            }
            None => {
                sqlx::query_as::<_, Room>(&format!(
                    "SELECT {ROOM_COLUMNS} FROM rooms ORDER BY hostel_id, room_number"
                ))
                .fetch_all(db)
                .await?
            }
        };

        Ok(rooms)
    }

    #[instrument(skip(db))]
    pub async fn get_room(db: &PgPool, id: i64) -> Result<Room, AppError> {
        let room = sqlx::query_as::<_, Room>(&format!(
            "SELECT {ROOM_COLUMNS} FROM rooms WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Room not found")))?;

        Ok(room)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_room(db: &PgPool, id: i64, dto: UpdateRoomDto) -> Result<Room, AppError> {
        let existing = Self::get_room(db, id).await?;

        let room_number = dto.room_number.unwrap_or(existing.room_number);
        let bed_count = dto.bed_count.unwrap_or(existing.bed_count);
        let capacity = dto.capacity.unwrap_or(existing.capacity);
        let price_per_bed = dto.price_per_bed.unwrap_or(existing.price_per_bed);

        if capacity < existing.current_occupants {
            return Err(AppError::unprocessable(anyhow::anyhow!(
                "Room capacity cannot drop below current occupancy ({})",
                existing.current_occupants
            )));
        }

        let room = sqlx::query_as::<_, Room>(&format!(
            "UPDATE rooms SET room_number = $1, bed_count = $2, capacity = $3, price_per_bed = $4
             WHERE id = $5
             RETURNING {ROOM_COLUMNS}"
        ))
        .bind(&room_number)
        .bind(bed_count)
        .bind(capacity)
        .bind(price_per_bed)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| map_unique_violation(e, "This hostel already has a room with that number"))?;

        Ok(room)
    }

    /// Delete a room. Guarded while bookings reference it.
    #[instrument(skip(db))]
    pub async fn delete_room(db: &PgPool, id: i64) -> Result<(), AppError> {
        let booking_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM student_room_bookings WHERE room_id = $1",
        )
        .bind(id)
        .fetch_one(db)
        .await?;

        if booking_count > 0 {
            return Err(AppError::precondition_failed(anyhow::anyhow!(
                "Cannot delete room: it has {} booking(s)",
                booking_count
            )));
        }

        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Room not found")));
        }

        Ok(())
    }

    /// Book a bed in a room for a student.
    ///
    /// The room row is locked (`FOR UPDATE`) so the availability check, the
    /// booking insert and the occupancy update are atomic against a
    /// concurrent booking for the last open bed. Fails with 412 when the
    /// room is not available or already at capacity. Date ranges are not
    /// checked for overlap against existing bookings.
    #[instrument(skip(db))]
    pub async fn book(db: &PgPool, dto: CreateBookingDto) -> Result<StudentRoomBooking, AppError> {
        if dto.start_date >= dto.end_date {
            return Err(AppError::unprocessable(anyhow::anyhow!(
                "Start date must be before end date"
            )));
        }

        let student_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM student_profiles WHERE id = $1)",
        )
        .bind(dto.student_id)
        .fetch_one(db)
        .await?;

        if !student_exists {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        let mut tx = db.begin().await?;

        let room = sqlx::query_as::<_, Room>(&format!(
            "SELECT {ROOM_COLUMNS} FROM rooms WHERE id = $1 FOR UPDATE"
        ))
        .bind(dto.room_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Room not found")))?;

        let status: RoomStatus = room
            .status
            .parse()
            .map_err(|e: String| AppError::internal(anyhow::anyhow!(e)))?;

        if !room_can_accept(status, room.current_occupants, room.capacity) {
            return Err(AppError::precondition_failed(anyhow::anyhow!(
                "Room is not available or already at capacity"
            )));
        }

        let booking = sqlx::query_as::<_, StudentRoomBooking>(&format!(
            "INSERT INTO student_room_bookings (student_id, room_id, start_date, end_date)
             VALUES ($1, $2, $3, $4)
             RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(dto.student_id)
        .bind(dto.room_id)
        .bind(dto.start_date)
        .bind(dto.end_date)
        .fetch_one(&mut *tx)
        .await?;

        let (occupants, new_status) = occupancy_after_booking(room.current_occupants, room.capacity);

        sqlx::query("UPDATE rooms SET current_occupants = $1, status = $2 WHERE id = $3")
            .bind(occupants)
            .bind(new_status.as_str())
            .bind(dto.room_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(booking)
    }

    /// Release a booking: delete it, decrement the room's occupancy and
    /// reopen availability when occupancy drops below capacity.
    #[instrument(skip(db))]
    pub async fn release(db: &PgPool, booking_id: i64) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        // Delete first: a concurrent release of the same booking blocks on
        // the row lock, then removes nothing and must not touch the room.
        let room_id = sqlx::query_scalar::<_, i64>(
            "DELETE FROM student_room_bookings WHERE id = $1 RETURNING room_id",
        )
        .bind(booking_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Booking not found")))?;

        let room = sqlx::query_as::<_, Room>(&format!(
            "SELECT {ROOM_COLUMNS} FROM rooms WHERE id = $1 FOR UPDATE"
        ))
        .bind(room_id)
        .fetch_one(&mut *tx)
        .await?;

        let (occupants, status) = occupancy_after_release(room.current_occupants, room.capacity);

        sqlx::query("UPDATE rooms SET current_occupants = $1, status = $2 WHERE id = $3")
            .bind(occupants)
            .bind(status.as_str())
            .bind(room.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn get_bookings(
        db: &PgPool,
        student_id: Option<i64>,
    ) -> Result<Vec<StudentRoomBooking>, AppError> {
        let bookings = match student_id {
            Some(student_id) => {
                sqlx::query_as::<_, StudentRoomBooking>(&format!(
                    "SELECT {BOOKING_COLUMNS} FROM student_room_bookings
                     WHERE student_id = $1 ORDER BY booked_on DESC"
                ))
                .bind(student_id)
                .fetch_all(db)
                .await?
            }
            None => {
                sqlx::query_as::<_, StudentRoomBooking>(&format!(
                    "SELECT {BOOKING_COLUMNS} FROM student_room_bookings ORDER BY booked_on DESC"
                ))
                .fetch_all(db)
                .await?
            }
        };

        Ok(bookings)
    }
}
