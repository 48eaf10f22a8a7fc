use sqlx::PgPool;
use tracing::instrument;

use crate::modules::documents::model::{
    CreateDocumentRequestDto, DocumentRequest, UpdateDocumentRequestDto,
};
use crate::utils::errors::AppError;

const DOCUMENT_COLUMNS: &str =
    "id, student_id, document_type, status, requested_on, processed_on";

pub struct DocumentService;

impl DocumentService {
    #[instrument(skip(db, dto))]
    pub async fn create_request(
        db: &PgPool,
        dto: CreateDocumentRequestDto,
    ) -> Result<DocumentRequest, AppError> {
        let student_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE id = $1 AND role = 'student')",
        )
        .bind(dto.student_id)
        .fetch_one(db)
        .await?;

        if !student_exists {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        let request = sqlx::query_as::<_, DocumentRequest>(&format!(
            "INSERT INTO document_requests (student_id, document_type)
             VALUES ($1, $2)
             RETURNING {DOCUMENT_COLUMNS}"
        ))
        .bind(dto.student_id)
        .bind(&dto.document_type)
        .fetch_one(db)
        .await?;

        Ok(request)
    }

    #[instrument(skip(db))]
    pub async fn get_requests(
        db: &PgPool,
        student_id: Option<i64>,
    ) -> Result<Vec<DocumentRequest>, AppError> {
        let requests = match student_id {
            Some(student_id) => {
                sqlx::query_as::<_, DocumentRequest>(&format!(
                    "SELECT {DOCUMENT_COLUMNS} FROM document_requests
                     WHERE student_id = $1 ORDER BY requested_on DESC"
                ))
                .bind(student_id)
                .fetch_all(db)
                .await?
            }
            None => {
                sqlx::query_as::<_, DocumentRequest>(&format!(
                    "SELECT {DOCUMENT_COLUMNS} FROM document_requests ORDER BY requested_on DESC"
                ))
                .fetch_all(db)
                .await?
            }
        };

        Ok(requests)
    }

    /// Update the request status. Any move off `pending` stamps
    /// `processed_on`; moving back to `pending` clears it.
    #[instrument(skip(db, dto))]
    pub async fn update_status(
        db: &PgPool,
        id: i64,
        dto: UpdateDocumentRequestDto,
    ) -> Result<DocumentRequest, AppError> {
        let request = sqlx::query_as::<_, DocumentRequest>(&format!(
            "UPDATE document_requests
             SET status = $1,
                 processed_on = CASE WHEN $1 = 'pending' THEN NULL ELSE NOW() END
             WHERE id = $2
             RETURNING {DOCUMENT_COLUMNS}"
        ))
        .bind(&dto.status)
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Document request not found")))?;

        Ok(request)
    }

    #[instrument(skip(db))]
    pub async fn delete_request(db: &PgPool, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM document_requests WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Document request not found"
            )));
        }

        Ok(())
    }
}
