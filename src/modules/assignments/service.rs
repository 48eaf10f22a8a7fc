use sqlx::PgPool;
use tracing::instrument;

use crate::modules::assignments::model::{Assignment, CreateAssignmentDto, SubmitAssignmentDto};
use crate::utils::errors::AppError;

const ASSIGNMENT_COLUMNS: &str =
    "id, title, description, due_date, lecturer_id, submitted_by_id, created_at";

pub struct AssignmentService;

impl AssignmentService {
    #[instrument(skip(db, dto))]
    pub async fn create(db: &PgPool, dto: CreateAssignmentDto) -> Result<Assignment, AppError> {
        let lecturer_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE id = $1 AND role = 'lecturer')",
        )
        .bind(dto.lecturer_id)
        .fetch_one(db)
        .await?;

        if !lecturer_exists {
            return Err(AppError::not_found(anyhow::anyhow!("Lecturer not found")));
        }

        let assignment = sqlx::query_as::<_, Assignment>(&format!(
            "INSERT INTO assignments (title, description, due_date, lecturer_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {ASSIGNMENT_COLUMNS}"
        ))
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(dto.due_date)
        .bind(dto.lecturer_id)
        .fetch_one(db)
        .await?;

        Ok(assignment)
    }

    #[instrument(skip(db))]
    pub async fn get_assignments(
        db: &PgPool,
        lecturer_id: Option<i64>,
    ) -> Result<Vec<Assignment>, AppError> {
        let assignments = match lecturer_id {
            Some(lecturer_id) => {
                sqlx::query_as::<_, Assignment>(&format!(
                    "SELECT {ASSIGNMENT_COLUMNS} FROM assignments
                     WHERE lecturer_id = $1 ORDER BY due_date"
                ))
                .bind(lecturer_id)
                .fetch_all(db)
                .await?
            }
            None => {
                sqlx::query_as::<_, Assignment>(&format!(
                    "SELECT {ASSIGNMENT_COLUMNS} FROM assignments ORDER BY due_date"
                ))
                .fetch_all(db)
                .await?
            }
        };

        Ok(assignments)
    }

    #[instrument(skip(db))]
    pub async fn get_assignment(db: &PgPool, id: i64) -> Result<Assignment, AppError> {
        let assignment = sqlx::query_as::<_, Assignment>(&format!(
            "SELECT {ASSIGNMENT_COLUMNS} FROM assignments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Assignment not found")))?;

        Ok(assignment)
    }

    #[instrument(skip(db, dto))]
    pub async fn submit(
        db: &PgPool,
        id: i64,
        dto: SubmitAssignmentDto,
    ) -> Result<Assignment, AppError> {
        let student_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE id = $1 AND role = 'student')",
        )
        .bind(dto.student_id)
        .fetch_one(db)
        .await?;

        if !student_exists {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        let assignment = sqlx::query_as::<_, Assignment>(&format!(
            "UPDATE assignments SET submitted_by_id = $1
             WHERE id = $2
             RETURNING {ASSIGNMENT_COLUMNS}"
        ))
        .bind(dto.student_id)
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Assignment not found")))?;

        Ok(assignment)
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM assignments WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Assignment not found")));
        }

        Ok(())
    }
}
