use sqlx::PgPool;
use tracing::instrument;

use crate::modules::users::model::{
    LecturerListing, LecturerProfile, StudentProfile, UpdateUserDto, User, UserWithProfile,
};
use crate::utils::errors::{AppError, map_unique_violation};
use crate::utils::pagination::{PaginationMeta, PaginationParams};

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn get_users(
        db: &PgPool,
        role: Option<String>,
        pagination: PaginationParams,
    ) -> Result<(Vec<UserWithProfile>, PaginationMeta), AppError> {
        let limit = pagination.limit();
        let offset = pagination.offset();

        let (users, total) = match role {
            Some(role) => {
                let users = sqlx::query_as::<_, User>(
                    "SELECT id, name, email, role, created_at FROM users
                     WHERE role = $1 ORDER BY name LIMIT $2 OFFSET $3",
                )
                .bind(&role)
                .bind(limit)
                .bind(offset)
                .fetch_all(db)
                .await?;

                let total =
                    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE role = $1")
                        .bind(&role)
                        .fetch_one(db)
                        .await?;

                (users, total)
            }
            None => {
                let users = sqlx::query_as::<_, User>(
                    "SELECT id, name, email, role, created_at FROM users
                     ORDER BY name LIMIT $1 OFFSET $2",
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(db)
                .await?;

                let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
                    .fetch_one(db)
                    .await?;

                (users, total)
            }
        };

        let mut result = Vec::with_capacity(users.len());
        for user in users {
            result.push(Self::attach_profile(db, user).await?);
        }

        let meta = PaginationMeta {
            total,
            limit,
            offset: pagination.page().is_none().then_some(offset),
            page: pagination.page(),
            has_more: offset + (result.len() as i64) < total,
        };

        Ok((result, meta))
    }

    #[instrument(skip(db))]
    pub async fn get_user(db: &PgPool, id: i64) -> Result<UserWithProfile, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, role, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        Self::attach_profile(db, user).await
    }

    async fn attach_profile(db: &PgPool, user: User) -> Result<UserWithProfile, AppError> {
        let student_profile = if user.role == "student" {
            sqlx::query_as::<_, StudentProfile>(
                "SELECT id, user_id, reg_no, program, year_of_study, phone
                 FROM student_profiles WHERE user_id = $1",
            )
            .bind(user.id)
            .fetch_optional(db)
            .await?
        } else {
            None
        };

        let lecturer_profile = if user.role == "lecturer" {
            sqlx::query_as::<_, LecturerProfile>(
                "SELECT id, user_id, staff_no, department, phone
                 FROM lecturer_profiles WHERE user_id = $1",
            )
            .bind(user.id)
            .fetch_optional(db)
            .await?
        } else {
            None
        };

        Ok(UserWithProfile {
            user,
            student_profile,
            lecturer_profile,
        })
    }

    /// Update a user's base fields and, where present, its role profile.
    #[instrument(skip(db, dto))]
    pub async fn update_user(
        db: &PgPool,
        id: i64,
        dto: UpdateUserDto,
    ) -> Result<UserWithProfile, AppError> {
        let existing = Self::get_user(db, id).await?;

        let name = dto.name.unwrap_or(existing.user.name);
        let email = dto.email.unwrap_or(existing.user.email);

        let mut tx = db.begin().await?;

        sqlx::query("UPDATE users SET name = $1, email = $2 WHERE id = $3")
            .bind(&name)
            .bind(&email)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_unique_violation(e, "A user with this email already exists"))?;

        if let Some(profile) = &existing.student_profile {
            let program = dto.program.unwrap_or_else(|| profile.program.clone());
            let year_of_study = dto.year_of_study.unwrap_or(profile.year_of_study);
            let phone = dto.phone.clone().or_else(|| profile.phone.clone());

            sqlx::query(
                "UPDATE student_profiles SET program = $1, year_of_study = $2, phone = $3
                 WHERE user_id = $4",
            )
            .bind(program)
            .bind(year_of_study)
            .bind(phone)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        } else if let Some(profile) = &existing.lecturer_profile {
            let department = dto.department.unwrap_or_else(|| profile.department.clone());
            let phone = dto.phone.clone().or_else(|| profile.phone.clone());

            sqlx::query(
                "UPDATE lecturer_profiles SET department = $1, phone = $2 WHERE user_id = $3",
            )
            .bind(department)
            .bind(phone)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Self::get_user(db, id).await
    }

    #[instrument(skip(db))]
    pub async fn delete_user(db: &PgPool, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("User not found")));
        }

        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn get_lecturers(db: &PgPool) -> Result<Vec<LecturerListing>, AppError> {
        let lecturers = sqlx::query_as::<_, LecturerListing>(
            "SELECT lp.id, lp.user_id, u.name, lp.staff_no, lp.department
             FROM lecturer_profiles lp
             JOIN users u ON u.id = lp.user_id
             ORDER BY u.name",
        )
        .fetch_all(db)
        .await?;

        Ok(lecturers)
    }

    /// Distinct program names across student profiles and courses.
    #[instrument(skip(db))]
    pub async fn get_programs(db: &PgPool) -> Result<Vec<String>, AppError> {
        let programs = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT program FROM (
                 SELECT program FROM student_profiles
                 UNION
                 SELECT program FROM courses
             ) p ORDER BY program",
        )
        .fetch_all(db)
        .await?;

        Ok(programs)
    }
}
