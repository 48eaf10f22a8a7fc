use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use crate::modules::courses::model::{
    Course, CourseWithPrerequisites, CreateCourseDto, UpdateCourseDto,
};
use crate::utils::errors::AppError;

const COURSE_COLUMNS: &str = "id, code, title, description, program, semester_id, lecturer_id";

pub struct CourseService;

impl CourseService {
    #[instrument(skip(db, dto))]
    pub async fn create_course(
        db: &PgPool,
        dto: CreateCourseDto,
    ) -> Result<CourseWithPrerequisites, AppError> {
        let semester_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM semesters WHERE id = $1)")
                .bind(dto.semester_id)
                .fetch_one(db)
                .await?;

        if !semester_exists {
            return Err(AppError::not_found(anyhow::anyhow!("Semester not found")));
        }

        let mut tx = db.begin().await?;

        let course = sqlx::query_as::<_, Course>(&format!(
            "INSERT INTO courses (code, title, description, program, semester_id, lecturer_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COURSE_COLUMNS}"
        ))
        .bind(&dto.code)
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.program)
        .bind(dto.semester_id)
        .bind(dto.lecturer_id)
        .fetch_one(&mut *tx)
        .await?;

        for prereq_id in &dto.prerequisite_ids {
            Self::insert_prerequisite_edge(&mut tx, course.id, *prereq_id).await?;
        }

        tx.commit().await?;

        Ok(CourseWithPrerequisites {
            prerequisite_ids: dto.prerequisite_ids,
            course,
        })
    }

    async fn insert_prerequisite_edge(
        tx: &mut Transaction<'_, Postgres>,
        course_id: i64,
        prerequisite_id: i64,
    ) -> Result<(), AppError> {
        if course_id == prerequisite_id {
            return Err(AppError::unprocessable(anyhow::anyhow!(
                "A course cannot be its own prerequisite"
            )));
        }

        let result = sqlx::query(
            "INSERT INTO course_prerequisites (course_id, prerequisite_id)
             SELECT $1, $2 WHERE EXISTS(SELECT 1 FROM courses WHERE id = $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(course_id)
        .bind(prerequisite_id)
        .execute(&mut **tx)
        .await?;

        if result.rows_affected() == 0 {
            // Either the prerequisite course is missing or the edge already exists
            let exists =
                sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1)")
                    .bind(prerequisite_id)
                    .fetch_one(&mut **tx)
                    .await?;
            if !exists {
                return Err(AppError::not_found(anyhow::anyhow!(
                    "Prerequisite course {} not found",
                    prerequisite_id
                )));
            }
        }

        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn get_courses(
        db: &PgPool,
        program: Option<String>,
        semester_id: Option<i64>,
    ) -> Result<Vec<CourseWithPrerequisites>, AppError> {
        let mut query = format!("SELECT {COURSE_COLUMNS} FROM courses WHERE 1 = 1");
        if program.is_some() {
            query.push_str(" AND program = $1");
        }
        if semester_id.is_some() {
            query.push_str(if program.is_some() {
                " AND semester_id = $2"
            } else {
                " AND semester_id = $1"
            });
        }
        query.push_str(" ORDER BY code");

        let mut q = sqlx::query_as::<_, Course>(&query);
        if let Some(program) = &program {
            q = q.bind(program);
        }
        if let Some(semester_id) = semester_id {
            q = q.bind(semester_id);
        }

        let courses = q.fetch_all(db).await?;

        let mut result = Vec::with_capacity(courses.len());
        for course in courses {
            let prerequisite_ids = Self::prerequisite_ids(db, course.id).await?;
            result.push(CourseWithPrerequisites {
                course,
                prerequisite_ids,
            });
        }
        Ok(result)
    }

    #[instrument(skip(db))]
    pub async fn get_course(db: &PgPool, id: i64) -> Result<CourseWithPrerequisites, AppError> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course not found")))?;

        let prerequisite_ids = Self::prerequisite_ids(db, id).await?;

        Ok(CourseWithPrerequisites {
            course,
            prerequisite_ids,
        })
    }

    /// "Prerequisites of": one directional query over the edge set.
    pub async fn prerequisite_ids(db: &PgPool, course_id: i64) -> Result<Vec<i64>, AppError> {
        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT prerequisite_id FROM course_prerequisites WHERE course_id = $1 ORDER BY prerequisite_id",
        )
        .bind(course_id)
        .fetch_all(db)
        .await?;

        Ok(ids)
    }

    /// "Depended-on-by": the inverse view over the same edge set.
    #[instrument(skip(db))]
    pub async fn dependent_courses(db: &PgPool, course_id: i64) -> Result<Vec<Course>, AppError> {
        let courses = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses
             WHERE id IN (SELECT course_id FROM course_prerequisites WHERE prerequisite_id = $1)
             ORDER BY code"
        ))
        .bind(course_id)
        .fetch_all(db)
        .await?;

        Ok(courses)
    }

    #[instrument(skip(db))]
    pub async fn add_prerequisite(
        db: &PgPool,
        course_id: i64,
        prerequisite_id: i64,
    ) -> Result<CourseWithPrerequisites, AppError> {
        // Ensure the dependent course exists first
        Self::get_course(db, course_id).await?;

        let mut tx = db.begin().await?;
        Self::insert_prerequisite_edge(&mut tx, course_id, prerequisite_id).await?;
        tx.commit().await?;

        Self::get_course(db, course_id).await
    }

    #[instrument(skip(db))]
    pub async fn remove_prerequisite(
        db: &PgPool,
        course_id: i64,
        prerequisite_id: i64,
    ) -> Result<CourseWithPrerequisites, AppError> {
        let result = sqlx::query(
            "DELETE FROM course_prerequisites WHERE course_id = $1 AND prerequisite_id = $2",
        )
        .bind(course_id)
        .bind(prerequisite_id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Prerequisite edge not found"
            )));
        }

        Self::get_course(db, course_id).await
    }

    #[instrument(skip(db, dto))]
    pub async fn update_course(
        db: &PgPool,
        id: i64,
        dto: UpdateCourseDto,
    ) -> Result<CourseWithPrerequisites, AppError> {
        let existing = Self::get_course(db, id).await?.course;

        let code = dto.code.unwrap_or(existing.code);
        let title = dto.title.unwrap_or(existing.title);
        let description = dto.description.or(existing.description);
        let program = dto.program.unwrap_or(existing.program);
        let semester_id = dto.semester_id.unwrap_or(existing.semester_id);

        let course = sqlx::query_as::<_, Course>(&format!(
            "UPDATE courses
             SET code = $1, title = $2, description = $3, program = $4, semester_id = $5
             WHERE id = $6
             RETURNING {COURSE_COLUMNS}"
        ))
        .bind(&code)
        .bind(&title)
        .bind(&description)
        .bind(&program)
        .bind(semester_id)
        .bind(id)
        .fetch_one(db)
        .await?;

        let prerequisite_ids = Self::prerequisite_ids(db, id).await?;

        Ok(CourseWithPrerequisites {
            course,
            prerequisite_ids,
        })
    }

    #[instrument(skip(db))]
    pub async fn assign_lecturer(
        db: &PgPool,
        course_id: i64,
        lecturer_id: i64,
    ) -> Result<CourseWithPrerequisites, AppError> {
        let lecturer_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM lecturer_profiles WHERE id = $1)",
        )
        .bind(lecturer_id)
        .fetch_one(db)
        .await?;

        if !lecturer_exists {
            return Err(AppError::not_found(anyhow::anyhow!("Lecturer not found")));
        }

        let course = sqlx::query_as::<_, Course>(&format!(
            "UPDATE courses SET lecturer_id = $1 WHERE id = $2 RETURNING {COURSE_COLUMNS}"
        ))
        .bind(lecturer_id)
        .bind(course_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course not found")))?;

        let prerequisite_ids = Self::prerequisite_ids(db, course_id).await?;

        Ok(CourseWithPrerequisites {
            course,
            prerequisite_ids,
        })
    }

    /// Delete a course. Guarded while unit registrations reference it.
    #[instrument(skip(db))]
    pub async fn delete_course(db: &PgPool, id: i64) -> Result<(), AppError> {
        let registration_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM unit_registrations WHERE course_id = $1",
        )
        .bind(id)
        .fetch_one(db)
        .await?;

        if registration_count > 0 {
            return Err(AppError::precondition_failed(anyhow::anyhow!(
                "Cannot delete course: {} registration(s) reference it",
                registration_count
            )));
        }

        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Course not found")));
        }

        Ok(())
    }
}
