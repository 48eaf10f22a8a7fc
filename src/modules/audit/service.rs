use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use crate::modules::audit::model::{AuditLog, CreateAuditLogDto};
use crate::utils::errors::AppError;

const AUDIT_COLUMNS: &str = "id, action, details, user_id, created_at";

pub struct AuditService;

impl AuditService {
    #[instrument(skip(db, dto))]
    pub async fn record(db: &PgPool, dto: CreateAuditLogDto) -> Result<AuditLog, AppError> {
        let user_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                .bind(dto.user_id)
                .fetch_one(db)
                .await?;

        if !user_exists {
            return Err(AppError::not_found(anyhow::anyhow!("User not found")));
        }

        let log = sqlx::query_as::<_, AuditLog>(&format!(
            "INSERT INTO audit_logs (action, details, user_id)
             VALUES ($1, $2, $3)
             RETURNING {AUDIT_COLUMNS}"
        ))
        .bind(&dto.action)
        .bind(&dto.details)
        .bind(dto.user_id)
        .fetch_one(db)
        .await?;

        Ok(log)
    }

    /// Append an audit row inside an already-open transaction so the audit
    /// trail commits or rolls back together with the action it describes.
    pub async fn record_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        action: &str,
        details: Option<&str>,
        user_id: i64,
    ) -> Result<(), AppError> {
        sqlx::query("INSERT INTO audit_logs (action, details, user_id) VALUES ($1, $2, $3)")
            .bind(action)
            .bind(details)
            .bind(user_id)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn get_logs(db: &PgPool, user_id: Option<i64>) -> Result<Vec<AuditLog>, AppError> {
        let logs = match user_id {
            Some(user_id) => {
                sqlx::query_as::<_, AuditLog>(&format!(
                    "SELECT {AUDIT_COLUMNS} FROM audit_logs
                     WHERE user_id = $1 ORDER BY created_at DESC"
                ))
                .bind(user_id)
                .fetch_all(db)
                .await?
            }
            None => {
                sqlx::query_as::<_, AuditLog>(&format!(
                    "SELECT {AUDIT_COLUMNS} FROM audit_logs ORDER BY created_at DESC"
                ))
                .fetch_all(db)
                .await?
            }
        };

        Ok(logs)
    }
}
