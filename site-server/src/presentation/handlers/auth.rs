use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::cookie::CookieJar;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::accounts::session_cookie;
use crate::application::auth_service::AuthResult;
use crate::domain::user::{LoginRequest, RegisterRequest, User};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct RegisterDto {
    #[validate(length(min = 3, max = 64))]
    pub(crate) username: String,
    #[validate(email)]
    pub(crate) email: String,
    #[validate(length(min = 8, max = 128))]
    pub(crate) password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct LoginDto {
    #[validate(length(min = 1, max = 64))]
    pub(crate) username: String,
    #[validate(length(min = 1))]
    pub(crate) password: String,
}

/// Bearer token plus the account it belongs to. The same token is also
/// set as the session cookie.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AuthResponseDto {
    pub(crate) access_token: String,
    pub(crate) user: UserDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UserDto {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) created_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

fn issue(
    state: &AppState,
    jar: CookieJar,
    status: StatusCode,
    result: AuthResult,
) -> (StatusCode, CookieJar, Json<AuthResponseDto>) {
    let jar = jar.add(session_cookie(result.access_token.clone(), state.cookie_secure));
    let body = AuthResponseDto {
        access_token: result.access_token,
        user: result.user.into(),
    };
    (status, jar, Json(body))
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Account created, token issued", body = AuthResponseDto),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or email taken"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(dto): Json<RegisterDto>,
) -> AppResult<(StatusCode, CookieJar, Json<AuthResponseDto>)> {
    dto.validate()?;

    let result = state
        .auth_service
        .register(RegisterRequest {
            username: dto.username,
            email: dto.email,
            password: dto.password,
        })
        .await?;
    Ok(issue(&state, jar, StatusCode::CREATED, result))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Token issued", body = AuthResponseDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(dto): Json<LoginDto>,
) -> AppResult<(StatusCode, CookieJar, Json<AuthResponseDto>)> {
    dto.validate()?;

    let result = state
        .auth_service
        .login(LoginRequest {
            username: dto.username,
            password: dto.password,
        })
        .await?;
    Ok(issue(&state, jar, StatusCode::OK, result))
}
