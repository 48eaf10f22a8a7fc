use sqlx::PgPool;
use tracing::instrument;

use crate::modules::admissions::model::{
    AdmissionApplication, ApplicationStatus, DecideApplicationDto, SubmitApplicationDto,
};
use crate::modules::audit::service::AuditService;
use crate::utils::errors::AppError;

const APPLICATION_COLUMNS: &str = "id, student_name, student_email, reg_no, program_name, \
                                   department, batch_year, status, rejection_reason, submitted_at";

pub struct AdmissionService;

impl AdmissionService {
    #[instrument(skip(db, dto))]
    pub async fn submit(
        db: &PgPool,
        dto: SubmitApplicationDto,
    ) -> Result<AdmissionApplication, AppError> {
        let application = sqlx::query_as::<_, AdmissionApplication>(&format!(
            "INSERT INTO admission_applications
                 (student_name, student_email, reg_no, program_name, department, batch_year)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {APPLICATION_COLUMNS}"
        ))
        .bind(&dto.student_name)
        .bind(&dto.student_email)
        .bind(&dto.reg_no)
        .bind(&dto.program_name)
        .bind(&dto.department)
        .bind(&dto.batch_year)
        .fetch_one(db)
        .await?;

        Ok(application)
    }

    #[instrument(skip(db))]
    pub async fn get_applications(
        db: &PgPool,
        status: Option<String>,
    ) -> Result<Vec<AdmissionApplication>, AppError> {
        let applications = match status {
            Some(status) => {
                status
                    .parse::<ApplicationStatus>()
                    .map_err(|e| AppError::unprocessable(anyhow::anyhow!(e)))?;

                sqlx::query_as::<_, AdmissionApplication>(&format!(
                    "SELECT {APPLICATION_COLUMNS} FROM admission_applications
                     WHERE status = $1 ORDER BY submitted_at"
                ))
                .bind(&status)
                .fetch_all(db)
                .await?
            }
            None => {
                sqlx::query_as::<_, AdmissionApplication>(&format!(
                    "SELECT {APPLICATION_COLUMNS} FROM admission_applications
                     ORDER BY submitted_at"
                ))
                .fetch_all(db)
                .await?
            }
        };

        Ok(applications)
    }

    #[instrument(skip(db))]
    pub async fn get_application(db: &PgPool, id: i64) -> Result<AdmissionApplication, AppError> {
        let application = sqlx::query_as::<_, AdmissionApplication>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM admission_applications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Application not found")))?;

        Ok(application)
    }

    #[instrument(skip(db, dto))]
    pub async fn approve(
        db: &PgPool,
        id: i64,
        dto: DecideApplicationDto,
    ) -> Result<AdmissionApplication, AppError> {
        Self::decide(db, id, ApplicationStatus::Approved, dto).await
    }

    #[instrument(skip(db, dto))]
    pub async fn reject(
        db: &PgPool,
        id: i64,
        dto: DecideApplicationDto,
    ) -> Result<AdmissionApplication, AppError> {
        if dto.reason.as_deref().is_none_or(str::is_empty) {
            return Err(AppError::unprocessable(anyhow::anyhow!(
                "A rejection reason is required"
            )));
        }
        Self::decide(db, id, ApplicationStatus::Rejected, dto).await
    }

    /// Move a pending application to its final state. The row is locked so a
    /// concurrent decision on the same application fails the pending check,
    /// and the audit row commits with the decision.
    async fn decide(
        db: &PgPool,
        id: i64,
        decision: ApplicationStatus,
        dto: DecideApplicationDto,
    ) -> Result<AdmissionApplication, AppError> {
        let admin_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE id = $1 AND role = 'admin')",
        )
        .bind(dto.admin_id)
        .fetch_one(db)
        .await?;

        if !admin_exists {
            return Err(AppError::not_found(anyhow::anyhow!("Admin not found")));
        }

        let mut tx = db.begin().await?;

        let application = sqlx::query_as::<_, AdmissionApplication>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM admission_applications WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Application not found")))?;

        let current: ApplicationStatus = application
            .status
            .parse()
            .map_err(|e: String| AppError::internal(anyhow::anyhow!(e)))?;

        if !current.can_decide() {
            return Err(AppError::precondition_failed(anyhow::anyhow!(
                "Application has already been {}",
                current
            )));
        }

        let updated = sqlx::query_as::<_, AdmissionApplication>(&format!(
            "UPDATE admission_applications SET status = $1, rejection_reason = $2
             WHERE id = $3
             RETURNING {APPLICATION_COLUMNS}"
        ))
        .bind(decision.as_str())
        .bind(if decision == ApplicationStatus::Rejected {
            dto.reason.as_deref()
        } else {
            None
        })
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        let details = format!(
            "Application {} for {} ({}) {}",
            id, updated.student_name, updated.reg_no, decision
        );
        AuditService::record_in_tx(
            &mut tx,
            &format!("admission_{}", decision),
            Some(&details),
            dto.admin_id,
        )
        .await?;

        tx.commit().await?;

        Ok(updated)
    }
}
