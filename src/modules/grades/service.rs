use sqlx::PgPool;
use tracing::instrument;

use crate::modules::grades::model::{CreateGradeDto, Grade, GradeListing, LetterGrade};
use crate::utils::errors::{AppError, map_unique_violation};

pub struct GradeService;

impl GradeService {
    /// Record a grade for a (student, course, semester) triple.
    ///
    /// Fails with 422 if the grade is not on the letter scale and 409 if a
    /// grade already exists for the triple. Check and insert share one
    /// transaction, with the unique index as the final arbiter.
    #[instrument(skip(db))]
    pub async fn record_grade(db: &PgPool, dto: CreateGradeDto) -> Result<Grade, AppError> {
        let grade: LetterGrade = dto
            .grade
            .parse()
            .map_err(|e: String| AppError::unprocessable(anyhow::anyhow!(e)))?;

        let student_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE id = $1 AND role = 'student')",
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

        let mut tx = db.begin().await?;

        let already_graded = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                 SELECT 1 FROM grades
                 WHERE student_id = $1 AND course_id = $2 AND semester_id = $3
             )",
        )
        .bind(dto.student_id)
        .bind(dto.course_id)
        .bind(dto.semester_id)
        .fetch_one(&mut *tx)
        .await?;

        if already_graded {
            return Err(AppError::conflict(anyhow::anyhow!(
                "A grade already exists for this student, course and semester"
            )));
        }

        let recorded = sqlx::query_as::<_, Grade>(
            "INSERT INTO grades (student_id, course_id, semester_id, grade)
             VALUES ($1, $2, $3, $4)
             RETURNING id, student_id, course_id, semester_id, grade, date_posted",
        )
        .bind(dto.student_id)
        .bind(dto.course_id)
        .bind(dto.semester_id)
        .bind(grade.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            map_unique_violation(
                e,
                "A grade already exists for this student, course and semester",
            )
        })?;

        tx.commit().await?;

        Ok(recorded)
    }

    #[instrument(skip(db))]
    pub async fn get_grades(
        db: &PgPool,
        student_id: Option<i64>,
        semester_id: Option<i64>,
    ) -> Result<Vec<GradeListing>, AppError> {
        let mut query = String::from(
            "SELECT g.id, g.student_id, c.code AS course_code, c.title AS course_title,
                    g.grade, s.name AS semester, g.date_posted
             FROM grades g
             JOIN courses c ON c.id = g.course_id
             JOIN semesters s ON s.id = g.semester_id
             WHERE 1 = 1",
        );
        if student_id.is_some() {
            query.push_str(" AND g.student_id = $1");
        }
        if semester_id.is_some() {
            query.push_str(if student_id.is_some() {
                " AND g.semester_id = $2"
            } else {
                " AND g.semester_id = $1"
            });
        }
        query.push_str(" ORDER BY g.date_posted DESC");

        let mut q = sqlx::query_as::<_, GradeListing>(&query);
        if let Some(student_id) = student_id {
            q = q.bind(student_id);
        }
        if let Some(semester_id) = semester_id {
            q = q.bind(semester_id);
        }

        let grades = q.fetch_all(db).await?;
        Ok(grades)
    }
}
