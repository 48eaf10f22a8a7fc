use sqlx::PgPool;
use tracing::instrument;

use crate::modules::auth::model::{LoginDto, SignupDto};
use crate::modules::users::model::{UserRole, UserWithProfile};
use crate::modules::users::service::UserService;
use crate::utils::errors::{AppError, map_unique_violation};
use crate::utils::password::{hash_password, verify_password};

pub struct AuthService;

impl AuthService {
    /// Create a user and its role profile in one transaction.
    ///
    /// Uniqueness of email, reg_no and staff_no is enforced by the database;
    /// violations map to 409.
    #[instrument(skip(db, dto))]
    pub async fn signup(db: &PgPool, dto: SignupDto) -> Result<UserWithProfile, AppError> {
        let password_hash = hash_password(&dto.password)?;

        let mut tx = db.begin().await?;

        let user_id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (name, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&password_hash)
        .bind(dto.role.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, "A user with this email already exists"))?;

        match dto.role {
            UserRole::Student => {
                let reg_no = dto.reg_no.ok_or_else(|| {
                    AppError::unprocessable(anyhow::anyhow!("reg_no is required for students"))
                })?;
                let program = dto.program.ok_or_else(|| {
                    AppError::unprocessable(anyhow::anyhow!("program is required for students"))
                })?;
                let year_of_study = dto.year_of_study.ok_or_else(|| {
                    AppError::unprocessable(anyhow::anyhow!(
                        "year_of_study is required for students"
                    ))
                })?;

                sqlx::query(
                    "INSERT INTO student_profiles (user_id, reg_no, program, year_of_study, phone)
                     VALUES ($1, $2, $3, $4, $5)",
                )
                .bind(user_id)
                .bind(&reg_no)
                .bind(&program)
                .bind(year_of_study)
                .bind(&dto.phone)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    map_unique_violation(e, "A student with this reg_no already exists")
                })?;
            }
            UserRole::Lecturer => {
                let staff_no = dto.staff_no.ok_or_else(|| {
                    AppError::unprocessable(anyhow::anyhow!("staff_no is required for lecturers"))
                })?;
                let department = dto.department.ok_or_else(|| {
                    AppError::unprocessable(anyhow::anyhow!(
                        "department is required for lecturers"
                    ))
                })?;

                sqlx::query(
                    "INSERT INTO lecturer_profiles (user_id, staff_no, department, phone)
                     VALUES ($1, $2, $3, $4)",
                )
                .bind(user_id)
                .bind(&staff_no)
                .bind(&department)
                .bind(&dto.phone)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    map_unique_violation(e, "A lecturer with this staff_no already exists")
                })?;
            }
            UserRole::Admin => {}
        }

        tx.commit().await?;

        UserService::get_user(db, user_id).await
    }

    /// Verify credentials and return the user payload.
    ///
    /// No token or session is issued; session security is handled elsewhere.
    #[instrument(skip(db, dto))]
    pub async fn login(db: &PgPool, dto: LoginDto) -> Result<UserWithProfile, AppError> {
        let row = sqlx::query_as::<_, (i64, String)>(
            "SELECT id, password_hash FROM users WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Invalid email or password")))?;

        let (user_id, password_hash) = row;

        if !verify_password(&dto.password, &password_hash)? {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Invalid email or password"
            )));
        }

        UserService::get_user(db, user_id).await
    }
}
