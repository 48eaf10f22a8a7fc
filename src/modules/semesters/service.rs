use sqlx::PgPool;
use tracing::instrument;

use crate::modules::semesters::model::{CreateSemesterDto, Semester, UpdateSemesterDto};
use crate::utils::errors::AppError;

const SEMESTER_COLUMNS: &str = "id, name, start_date, end_date, active";

pub struct SemesterService;

impl SemesterService {
    #[instrument(skip(db, dto))]
    pub async fn create_semester(db: &PgPool, dto: CreateSemesterDto) -> Result<Semester, AppError> {
        if dto.start_date >= dto.end_date {
            return Err(AppError::unprocessable(anyhow::anyhow!(
                "Start date must be before end date"
            )));
        }

        let semester = sqlx::query_as::<_, Semester>(&format!(
            "INSERT INTO semesters (name, start_date, end_date)
             VALUES ($1, $2, $3)
             RETURNING {SEMESTER_COLUMNS}"
        ))
        .bind(&dto.name)
        .bind(dto.start_date)
        .bind(dto.end_date)
        .fetch_one(db)
        .await?;

        Ok(semester)
    }

    #[instrument(skip(db))]
    pub async fn get_semesters(db: &PgPool) -> Result<Vec<Semester>, AppError> {
        let semesters = sqlx::query_as::<_, Semester>(&format!(
            "SELECT {SEMESTER_COLUMNS} FROM semesters ORDER BY start_date DESC"
        ))
        .fetch_all(db)
        .await?;

        Ok(semesters)
    }

    #[instrument(skip(db))]
    pub async fn get_semester(db: &PgPool, id: i64) -> Result<Semester, AppError> {
        let semester = sqlx::query_as::<_, Semester>(&format!(
            "SELECT {SEMESTER_COLUMNS} FROM semesters WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Semester not found")))?;

        Ok(semester)
    }

    #[instrument(skip(db))]
    pub async fn get_active_semester(db: &PgPool) -> Result<Option<Semester>, AppError> {
        let semester = sqlx::query_as::<_, Semester>(&format!(
            "SELECT {SEMESTER_COLUMNS} FROM semesters WHERE active = TRUE"
        ))
        .fetch_optional(db)
        .await?;

        Ok(semester)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_semester(
        db: &PgPool,
        id: i64,
        dto: UpdateSemesterDto,
    ) -> Result<Semester, AppError> {
        let existing = Self::get_semester(db, id).await?;

        let name = dto.name.unwrap_or(existing.name);
        let start_date = dto.start_date.unwrap_or(existing.start_date);
        let end_date = dto.end_date.unwrap_or(existing.end_date);

        if start_date >= end_date {
            return Err(AppError::unprocessable(anyhow::anyhow!(
                "Start date must be before end date"
            )));
        }

        let semester = sqlx::query_as::<_, Semester>(&format!(
            "UPDATE semesters SET name = $1, start_date = $2, end_date = $3
             WHERE id = $4
             RETURNING {SEMESTER_COLUMNS}"
        ))
        .bind(&name)
        .bind(start_date)
        .bind(end_date)
        .bind(id)
        .fetch_one(db)
        .await?;

        Ok(semester)
    }

    /// Activate a semester, deactivating every other one first so the
    /// single-active invariant holds at write time.
    #[instrument(skip(db))]
    pub async fn activate_semester(db: &PgPool, id: i64) -> Result<Semester, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM semesters WHERE id = $1)")
                .bind(id)
                .fetch_one(db)
                .await?;

        if !exists {
            return Err(AppError::not_found(anyhow::anyhow!("Semester not found")));
        }

        let mut tx = db.begin().await?;

        sqlx::query("UPDATE semesters SET active = FALSE WHERE active = TRUE")
            .execute(&mut *tx)
            .await?;

        let semester = sqlx::query_as::<_, Semester>(&format!(
            "UPDATE semesters SET active = TRUE WHERE id = $1 RETURNING {SEMESTER_COLUMNS}"
        ))
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(semester)
    }

    /// Delete a semester. Guarded while courses still reference it.
    #[instrument(skip(db))]
    pub async fn delete_semester(db: &PgPool, id: i64) -> Result<(), AppError> {
        let course_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses WHERE semester_id = $1")
                .bind(id)
                .fetch_one(db)
                .await?;

        if course_count > 0 {
            return Err(AppError::precondition_failed(anyhow::anyhow!(
                "Cannot delete semester: {} course(s) are attached to it",
                course_count
            )));
        }

        let result = sqlx::query("DELETE FROM semesters WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Semester not found")));
        }

        Ok(())
    }
}
