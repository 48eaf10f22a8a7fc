use axum::{Json, extract::State};
use tracing::instrument;
use validator::Validate;

use crate::modules::auth::model::{ErrorResponse, LoginDto, SignupDto};
use crate::modules::auth::service::AuthService;
use crate::modules::users::model::UserWithProfile;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupDto,
    responses(
        (status = 200, description = "User created", body = UserWithProfile),
        (status = 409, description = "Email, reg_no or staff_no already taken", body = ErrorResponse),
        (status = 422, description = "Missing or invalid fields", body = ErrorResponse)
    ),
    tag = "Auth"
)]
#[instrument(skip(state, dto))]
pub async fn signup(
    State(state): State<AppState>,
    Json(dto): Json<SignupDto>,
) -> Result<Json<UserWithProfile>, AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;

    let user = AuthService::signup(&state.db, dto).await?;
    Ok(Json(user))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Credentials valid", body = UserWithProfile),
        (status = 400, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "Auth"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    Json(dto): Json<LoginDto>,
) -> Result<Json<UserWithProfile>, AppError> {
    dto.validate()
        .map_err(|e| AppError::unprocessable(anyhow::anyhow!("Validation failed: {}", e)))?;

    let user = AuthService::login(&state.db, dto).await?;
    Ok(Json(user))
}
