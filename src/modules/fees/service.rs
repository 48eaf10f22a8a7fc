use chrono::Utc;
use sqlx::PgPool;
use tracing::instrument;

use crate::modules::audit::service::AuditService;
use crate::modules::fees::model::{
    ClearanceStats, ClearanceStatus, CreateFeeStructureDto, CreatePaymentDto, FeeClearance,
    FeeStructure, Payment, UpdateFeeStructureDto, UpsertClearanceDto, cleared_on_for,
};
use crate::utils::errors::{AppError, map_unique_violation};

const FEE_COLUMNS: &str = "id, course_id, hostel_id, semester_id, amount";
const PAYMENT_COLUMNS: &str =
    "id, student_id, fee_structure_id, amount_paid, payment_method, payment_date";
const CLEARANCE_COLUMNS: &str = "id, student_id, amount_due, status, cleared_on";

pub struct FeeService;

impl FeeService {
    #[instrument(skip(db, dto))]
    pub async fn create_fee_structure(
        db: &PgPool,
        dto: CreateFeeStructureDto,
    ) -> Result<FeeStructure, AppError> {
        for (table, id, label) in [
            ("courses", dto.course_id, "Course"),
            ("hostels", dto.hostel_id, "Hostel"),
            ("semesters", dto.semester_id, "Semester"),
        ] {
            let exists = sqlx::query_scalar::<_, bool>(&format!(
                "SELECT EXISTS(SELECT 1 FROM {table} WHERE id = $1)"
            ))
            .bind(id)
            .fetch_one(db)
            .await?;

            if !exists {
                return Err(AppError::not_found(anyhow::anyhow!("{} not found", label)));
            }
        }

        let fee = sqlx::query_as::<_, FeeStructure>(&format!(
            "INSERT INTO fee_structures (course_id, hostel_id, semester_id, amount)
             VALUES ($1, $2, $3, $4)
             RETURNING {FEE_COLUMNS}"
        ))
        .bind(dto.course_id)
        .bind(dto.hostel_id)
        .bind(dto.semester_id)
        .bind(dto.amount)
        .fetch_one(db)
        .await
        .map_err(|e| {
            map_unique_violation(
                e,
                "A fee structure already exists for this course, hostel and semester",
            )
        })?;

        Ok(fee)
    }

    #[instrument(skip(db))]
    pub async fn get_fee_structures(
        db: &PgPool,
        semester_id: Option<i64>,
    ) -> Result<Vec<FeeStructure>, AppError> {
        let fees = match semester_id {
            Some(semester_id) => {
                sqlx::query_as::<_, FeeStructure>(&format!(
                    "SELECT {FEE_COLUMNS} FROM fee_structures WHERE semester_id = $1 ORDER BY id"
                ))
                .bind(semester_id)
                .fetch_all(db)
                .await?
            }
            None => {
                sqlx::query_as::<_, FeeStructure>(&format!(
                    "SELECT {FEE_COLUMNS} FROM fee_structures ORDER BY id"
                ))
                .fetch_all(db)
                .await?
            }
        };

        Ok(fees)
    }

    #[instrument(skip(db))]
    pub async fn get_fee_structure(db: &PgPool, id: i64) -> Result<FeeStructure, AppError> {
        let fee = sqlx::query_as::<_, FeeStructure>(&format!(
            "SELECT {FEE_COLUMNS} FROM fee_structures WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| {
            AppError::not_found(anyhow::anyhow!("Fee structure not found"))
        })?;

        Ok(fee)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_fee_structure(
        db: &PgPool,
        id: i64,
        dto: UpdateFeeStructureDto,
    ) -> Result<FeeStructure, AppError> {
        let existing = Self::get_fee_structure(db, id).await?;

        let course_id = dto.course_id.unwrap_or(existing.course_id);
        let hostel_id = dto.hostel_id.unwrap_or(existing.hostel_id);
        let semester_id = dto.semester_id.unwrap_or(existing.semester_id);
        let amount = dto.amount.unwrap_or(existing.amount);

        for (table, target, label) in [
            ("courses", course_id, "Course"),
            ("hostels", hostel_id, "Hostel"),
            ("semesters", semester_id, "Semester"),
        ] {
            let exists = sqlx::query_scalar::<_, bool>(&format!(
                "SELECT EXISTS(SELECT 1 FROM {table} WHERE id = $1)"
            ))
            .bind(target)
            .fetch_one(db)
            .await?;

            if !exists {
                return Err(AppError::not_found(anyhow::anyhow!("{} not found", label)));
            }
        }

        let fee = sqlx::query_as::<_, FeeStructure>(&format!(
            "UPDATE fee_structures
             SET course_id = $1, hostel_id = $2, semester_id = $3, amount = $4
             WHERE id = $5
             RETURNING {FEE_COLUMNS}"
        ))
        .bind(course_id)
        .bind(hostel_id)
        .bind(semester_id)
        .bind(amount)
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            map_unique_violation(
                e,
                "A fee structure already exists for this course, hostel and semester",
            )
        })?;

        Ok(fee)
    }

    #[instrument(skip(db))]
    pub async fn delete_fee_structure(db: &PgPool, id: i64) -> Result<(), AppError> {
        let payment_count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM payments WHERE fee_structure_id = $1")
                .bind(id)
                .fetch_one(db)
                .await?;

        if payment_count > 0 {
            return Err(AppError::precondition_failed(anyhow::anyhow!(
                "Cannot delete fee structure: {} payment(s) reference it",
                payment_count
            )));
        }

        let result = sqlx::query("DELETE FROM fee_structures WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Fee structure not found"
            )));
        }

        Ok(())
    }

    #[instrument(skip(db, dto))]
    pub async fn record_payment(db: &PgPool, dto: CreatePaymentDto) -> Result<Payment, AppError> {
        let student_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM student_profiles WHERE id = $1)",
        )
        .bind(dto.student_id)
        .fetch_one(db)
        .await?;

        if !student_exists {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        let fee_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM fee_structures WHERE id = $1)",
        )
        .bind(dto.fee_structure_id)
        .fetch_one(db)
        .await?;

        if !fee_exists {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Fee structure not found"
            )));
        }

        let payment = sqlx::query_as::<_, Payment>(&format!(
            "INSERT INTO payments (student_id, fee_structure_id, amount_paid, payment_method)
             VALUES ($1, $2, $3, $4)
             RETURNING {PAYMENT_COLUMNS}"
        ))
        .bind(dto.student_id)
        .bind(dto.fee_structure_id)
        .bind(dto.amount_paid)
        .bind(&dto.payment_method)
        .fetch_one(db)
        .await?;

        Ok(payment)
    }

    #[instrument(skip(db))]
    pub async fn get_payments(
        db: &PgPool,
        student_id: Option<i64>,
    ) -> Result<Vec<Payment>, AppError> {
        let payments = match student_id {
            Some(student_id) => {
                sqlx::query_as::<_, Payment>(&format!(
                    "SELECT {PAYMENT_COLUMNS} FROM payments
                     WHERE student_id = $1 ORDER BY payment_date DESC"
                ))
                .bind(student_id)
                .fetch_all(db)
                .await?
            }
            None => {
                sqlx::query_as::<_, Payment>(&format!(
                    "SELECT {PAYMENT_COLUMNS} FROM payments ORDER BY payment_date DESC"
                ))
                .fetch_all(db)
                .await?
            }
        };

        Ok(payments)
    }

    /// Create or update a student's clearance record. The status drives the
    /// `cleared_on` stamp: `cleared` sets it to now, anything else nulls it.
    /// Clearance is asserted by an administrator, not derived from payments.
    #[instrument(skip(db, dto))]
    pub async fn upsert_clearance(
        db: &PgPool,
        dto: UpsertClearanceDto,
    ) -> Result<FeeClearance, AppError> {
        let status: ClearanceStatus = dto
            .status
            .parse()
            .map_err(|e: String| AppError::unprocessable(anyhow::anyhow!(e)))?;

        let student_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM student_profiles WHERE id = $1)",
        )
        .bind(dto.student_id)
        .fetch_one(db)
        .await?;

        if !student_exists {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        if let Some(updated_by) = dto.updated_by {
            let admin_exists =
                sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                    .bind(updated_by)
                    .fetch_one(db)
                    .await?;

            if !admin_exists {
                return Err(AppError::not_found(anyhow::anyhow!("Updating user not found")));
            }
        }

        let cleared_on = cleared_on_for(status, Utc::now());

        let mut tx = db.begin().await?;

        let clearance = sqlx::query_as::<_, FeeClearance>(&format!(
            "INSERT INTO fee_clearances (student_id, amount_due, status, cleared_on)
             VALUES ($1, COALESCE($2, 0), $3, $4)
             ON CONFLICT (student_id) DO UPDATE
             SET amount_due = COALESCE($2, fee_clearances.amount_due),
                 status = $3,
                 cleared_on = $4
             RETURNING {CLEARANCE_COLUMNS}"
        ))
        .bind(dto.student_id)
        .bind(dto.amount_due)
        .bind(status.as_str())
        .bind(cleared_on)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(updated_by) = dto.updated_by {
            let details = format!(
                "Set clearance for student {} to {}",
                dto.student_id,
                status.as_str()
            );
            AuditService::record_in_tx(&mut tx, "clearance_update", Some(&details), updated_by)
                .await?;
        }

        tx.commit().await?;

        Ok(clearance)
    }

    #[instrument(skip(db))]
    pub async fn get_clearance(db: &PgPool, student_id: i64) -> Result<FeeClearance, AppError> {
        let clearance = sqlx::query_as::<_, FeeClearance>(&format!(
            "SELECT {CLEARANCE_COLUMNS} FROM fee_clearances WHERE student_id = $1"
        ))
        .bind(student_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| {
            AppError::not_found(anyhow::anyhow!("No clearance record for this student"))
        })?;

        Ok(clearance)
    }

    #[instrument(skip(db))]
    pub async fn get_clearances(db: &PgPool) -> Result<Vec<FeeClearance>, AppError> {
        let clearances = sqlx::query_as::<_, FeeClearance>(&format!(
            "SELECT {CLEARANCE_COLUMNS} FROM fee_clearances ORDER BY student_id"
        ))
        .fetch_all(db)
        .await?;

        Ok(clearances)
    }

    #[instrument(skip(db))]
    pub async fn clearance_stats(db: &PgPool) -> Result<ClearanceStats, AppError> {
        let (pending, cleared, flagged, total_amount_due) =
            sqlx::query_as::<_, (i64, i64, i64, f64)>(
                "SELECT
                     COUNT(*) FILTER (WHERE status = 'pending'),
                     COUNT(*) FILTER (WHERE status = 'cleared'),
                     COUNT(*) FILTER (WHERE status = 'flagged'),
                     COALESCE(SUM(amount_due), 0)
                 FROM fee_clearances",
            )
            .fetch_one(db)
            .await?;

        Ok(ClearanceStats {
            pending,
            cleared,
            flagged,
            total_amount_due,
        })
    }
}
