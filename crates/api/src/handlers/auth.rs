//! Handlers for the `/auth` resource (register, login).
//!
//! Login only verifies credentials and returns the user's identity; there
//! are no sessions or tokens.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tracksm_core::account::{normalize_login, normalize_registration, LoginInput, RegisterInput};
use tracksm_core::error::CoreError;
use tracksm_db::models::user::{CreateUser, UserResponse};
use tracksm_db::repositories::UserRepo;

use crate::auth::password::{hash_password, verify_dummy, verify_password};
use crate::error::{is_unique_violation, AppError, AppResult};
use crate::extract::JsonBody;
use crate::state::AppState;

/// Message for every failed login, whether the email or the password was wrong.
const INVALID_CREDENTIALS: &str = "invalid credentials";

/// POST /api/auth/register
///
/// Create a user. A duplicate email is detected by the `users.email` unique
/// constraint at insert time and reported as 409.
pub async fn register(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<RegisterInput>,
) -> AppResult<impl IntoResponse> {
    let registration = normalize_registration(input)?;

    let password_hash = hash_password(&registration.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateUser {
        name: registration.name,
        email: registration.email,
        password_hash,
    };

    let user = UserRepo::create(&state.pool, &create)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                AppError::Core(CoreError::Conflict("email already registered".into()))
            } else {
                AppError::Database(err)
            }
        })?;

    tracing::info!(user_id = user.id, "User registered");

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// POST /api/auth/login
///
/// Unknown email and wrong password produce the same 401 response, and both
/// pay for one Argon2 verification.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<LoginInput>,
) -> AppResult<Json<UserResponse>> {
    let credentials = normalize_login(input)?;

    let Some(user) = UserRepo::find_by_email(&state.pool, &credentials.email).await? else {
        verify_dummy(&credentials.password);
        tracing::debug!("Login rejected: unknown email");
        return Err(invalid_credentials());
    };

    let password_valid = verify_password(&credentials.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::debug!(user_id = user.id, "Login rejected");
        return Err(invalid_credentials());
    }

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(UserResponse::from(user)))
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into()))
}
