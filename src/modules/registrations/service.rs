use std::collections::HashSet;

use sqlx::PgPool;
use tracing::instrument;

use crate::modules::registrations::model::{
    CreateRegistrationDto, RegistrationListing, UnitRegistration, prerequisites_met,
};
use crate::utils::errors::{AppError, map_unique_violation};

pub struct RegistrationService;

impl RegistrationService {
    /// Register a student for a course in a semester.
    ///
    /// Fails with 409 if the (student, course, semester) triple already
    /// exists and with 412 if the course declares prerequisites the student
    /// has no registration record for. The checks and the insert run in one
    /// transaction; the unique index on the triple is the final arbiter
    /// against concurrent duplicates.
    #[instrument(skip(db))]
    pub async fn register(
        db: &PgPool,
        dto: CreateRegistrationDto,
    ) -> Result<UnitRegistration, AppError> {
        let student_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM student_profiles WHERE id = $1)",
        )
        .bind(dto.student_id)
        .fetch_one(db)
        .await?;

        if !student_exists {
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        let course_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1)")
                .bind(dto.course_id)
                .fetch_one(db)
                .await?;

        if !course_exists {
            return Err(AppError::not_found(anyhow::anyhow!("Course not found")));
        }

        let semester_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM semesters WHERE id = $1)")
                .bind(dto.semester_id)
                .fetch_one(db)
                .await?;

        if !semester_exists {
            return Err(AppError::not_found(anyhow::anyhow!("Semester not found")));
        }

        let mut tx = db.begin().await?;

        let already_registered = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                 SELECT 1 FROM unit_registrations
                 WHERE student_id = $1 AND course_id = $2 AND semester_id = $3
             )",
        )
        .bind(dto.student_id)
        .bind(dto.course_id)
        .bind(dto.semester_id)
        .fetch_one(&mut *tx)
        .await?;

        if already_registered {
            return Err(AppError::conflict(anyhow::anyhow!(
                "Student is already registered for this course in this semester"
            )));
        }

        let required = sqlx::query_scalar::<_, i64>(
            "SELECT prerequisite_id FROM course_prerequisites WHERE course_id = $1",
        )
        .bind(dto.course_id)
        .fetch_all(&mut *tx)
        .await?;

        if !required.is_empty() {
            let completed: HashSet<i64> = sqlx::query_scalar::<_, i64>(
                "SELECT course_id FROM unit_registrations WHERE student_id = $1",
            )
            .bind(dto.student_id)
            .fetch_all(&mut *tx)
            .await?
            .into_iter()
            .collect();

            if !prerequisites_met(&required, &completed) {
                return Err(AppError::precondition_failed(anyhow::anyhow!(
                    "Prerequisites not met for this course"
                )));
            }
        }

        let registration = sqlx::query_as::<_, UnitRegistration>(
            "INSERT INTO unit_registrations (student_id, course_id, semester_id)
             VALUES ($1, $2, $3)
             RETURNING id, student_id, course_id, semester_id, registered_on",
        )
        .bind(dto.student_id)
        .bind(dto.course_id)
        .bind(dto.semester_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            map_unique_violation(
                e,
                "Student is already registered for this course in this semester",
            )
        })?;

        tx.commit().await?;

        Ok(registration)
    }

    /// Remove a registration. Fails with 404 if it does not belong to the
    /// given student.
    #[instrument(skip(db))]
    pub async fn unregister(db: &PgPool, id: i64, student_id: i64) -> Result<(), AppError> {
        let result =
            sqlx::query("DELETE FROM unit_registrations WHERE id = $1 AND student_id = $2")
                .bind(id)
                .bind(student_id)
                .execute(db)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Registration not found for this student"
            )));
        }

        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn get_registrations(
        db: &PgPool,
        student_id: Option<i64>,
        semester_id: Option<i64>,
    ) -> Result<Vec<RegistrationListing>, AppError> {
        let mut query = String::from(
            "SELECT r.id, r.student_id, r.course_id, c.code AS course_code,
                    c.title AS course_title, r.semester_id, r.registered_on
             FROM unit_registrations r
             JOIN courses c ON c.id = r.course_id
             WHERE 1 = 1",
        );
        if student_id.is_some() {
            query.push_str(" AND r.student_id = $1");
        }
        if semester_id.is_some() {
            query.push_str(if student_id.is_some() {
                " AND r.semester_id = $2"
            } else {
                " AND r.semester_id = $1"
            });
        }
        query.push_str(" ORDER BY r.registered_on DESC");

        let mut q = sqlx::query_as::<_, RegistrationListing>(&query);
        if let Some(student_id) = student_id {
            q = q.bind(student_id);
        }
        if let Some(semester_id) = semester_id {
            q = q.bind(semester_id);
        }

        let registrations = q.fetch_all(db).await?;
        Ok(registrations)
    }
}
