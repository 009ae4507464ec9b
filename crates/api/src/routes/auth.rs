//! Account, session and profile routes.

use std::time::Duration;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use database::models::{NewUser, ProfileUpdate, User};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::{self, CurrentUser};
use crate::error::{ApiError, Result};
use crate::state::AppState;
use crate::validate::{self, FieldError};

/// How long a password-reset token stays valid.
const RESET_TOKEN_TTL: Duration = Duration::from_secs(60 * 60);

/// A user as returned to clients. Never carries the password hash.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            profile_image_url: user.profile_image_url,
            created_at: user.created_at,
        }
    }
}

/// Request to create an account.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Request to log in.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A freshly established session.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Request to start a password reset.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Request to complete a password reset.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

/// Request to update profile fields. Omitted fields keep their value.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

/// Create a session token and persist it.
async fn start_session(state: &AppState, user_id: i64) -> Result<String> {
    let token = Uuid::new_v4().to_string();
    database::session::create_session(state.db.pool(), &token, user_id, state.session_ttl).await?;
    Ok(token)
}

/// Create an account and log straight in.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<SessionResponse>> {
    let mut errors = Vec::new();
    validate::check_email(&mut errors, "email", &req.email);
    validate::check_password(&mut errors, "password", &req.password);
    validate::finish(errors)?;

    let password_hash = auth::hash_password(&req.password)?;
    let user = database::user::create_user(
        state.db.pool(),
        &NewUser {
            email: req.email.trim().to_lowercase(),
            password_hash,
            first_name: req.first_name,
            last_name: req.last_name,
            profile_image_url: None,
        },
    )
    .await?;

    let token = start_session(&state, user.id).await?;
    info!(user_id = user.id, "User registered");

    Ok(Json(SessionResponse {
        token,
        user: user.into(),
    }))
}

/// Log in with email and password.
///
/// Unknown email and wrong password return the same 401, so the
/// endpoint cannot be used to probe which accounts exist.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionResponse>> {
    let email = req.email.trim().to_lowercase();
    let user = database::user::get_user_by_email(state.db.pool(), &email)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    if !auth::verify_password(&req.password, &user.password_hash) {
        return Err(ApiError::Unauthorized);
    }

    let token = start_session(&state, user.id).await?;
    info!(user_id = user.id, "User logged in");

    Ok(Json(SessionResponse {
        token,
        user: user.into(),
    }))
}

/// End the current session.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>> {
    let token = auth::bearer_token(&headers).ok_or(ApiError::Unauthorized)?;
    database::session::delete_session(state.db.pool(), token).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// The currently authenticated user.
pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(user.into())
}

/// Start a password reset.
///
/// Responds identically whether or not the account exists. No mailer is
/// wired up; the token is logged for manual delivery.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<Json<serde_json::Value>> {
    let mut errors = Vec::new();
    validate::check_email(&mut errors, "email", &req.email);
    validate::finish(errors)?;

    let email = req.email.trim().to_lowercase();
    if let Some(user) = database::user::get_user_by_email(state.db.pool(), &email).await? {
        let token = Uuid::new_v4().to_string();
        database::user::set_reset_token(state.db.pool(), user.id, &token, RESET_TOKEN_TTL).await?;
        info!(user_id = user.id, reset_token = %token, "Password reset requested");
    }

    Ok(Json(serde_json::json!({ "success": true })))
}

/// Complete a password reset with a previously issued token.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<serde_json::Value>> {
    let mut errors = Vec::new();
    validate::check_password(&mut errors, "password", &req.password);
    validate::finish(errors)?;

    let user = database::user::get_user_by_reset_token(state.db.pool(), &req.token)
        .await?
        .ok_or_else(|| {
            ApiError::Validation(vec![FieldError::new(
                "token",
                "reset token is invalid or expired",
            )])
        })?;

    let password_hash = auth::hash_password(&req.password)?;
    database::user::update_password(state.db.pool(), user.id, &password_hash).await?;
    info!(user_id = user.id, "Password reset completed");

    Ok(Json(serde_json::json!({ "success": true })))
}

/// Update the current user's profile fields.
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>> {
    let mut errors = Vec::new();
    if let Some(first_name) = &req.first_name {
        validate::check_text(&mut errors, "firstName", first_name, validate::MAX_NAME_LENGTH);
    }
    if let Some(last_name) = &req.last_name {
        validate::check_text(&mut errors, "lastName", last_name, validate::MAX_NAME_LENGTH);
    }
    validate::finish(errors)?;

    let updated = database::user::update_profile(
        state.db.pool(),
        user.id,
        &ProfileUpdate {
            first_name: req.first_name,
            last_name: req.last_name,
            profile_image_url: req.profile_image_url,
        },
    )
    .await?;

    Ok(Json(updated.into()))
}
