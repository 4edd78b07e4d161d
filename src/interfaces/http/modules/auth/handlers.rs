//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::{Duration, Utc};
use tracing::{info, warn};

use super::dto::{
    ChangePasswordRequest, LoginRequest, LoginResponse, PasswordResetRequest, RegisterRequest,
    UpdateProfileRequest, UserInfo,
};
use crate::auth::jwt::{create_token, JwtConfig};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::reset_token;
use crate::domain::user::{Role, User};
use crate::domain::{DomainError, RepositoryProvider};
use crate::interfaces::http::common::{ApiError, ApiResponse, EmptyData, ValidatedJson};
use crate::interfaces::http::middleware::{require_user, AuthenticatedUser};

const RESET_TOKEN_TTL_HOURS: i64 = 2;

/// Auth state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub jwt_config: JwtConfig,
}

fn internal(e: impl std::fmt::Display) -> ApiError {
    ApiError(DomainError::Validation(format!("Database error: {}", e)))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<UserInfo>),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn register(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserInfo>>), ApiError> {
    if state
        .repos
        .users()
        .find_by_email(&request.email)
        .await?
        .is_some()
    {
        return Err(ApiError(DomainError::Conflict(
            "Email is already registered".to_string(),
        )));
    }

    let password_hash = hash_password(&request.password).map_err(internal)?;
    let now = Utc::now();
    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        name: request.name,
        email: request.email,
        phone: request.phone,
        vehicle_type: request.vehicle_type,
        role: Role::User,
        password_hash,
        is_active: true,
        reset_token_hash: None,
        reset_token_expires_at: None,
        created_at: now,
        updated_at: now,
        last_login_at: None,
    };

    state.repos.users().save(user.clone()).await?;
    info!(user_id = %user.id, "Account registered");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserInfo::from(user))),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let invalid = || ApiError(DomainError::Unauthorized("Invalid credentials".to_string()));

    let user = state
        .repos
        .users()
        .find_by_email(&request.email)
        .await?
        .ok_or_else(invalid)?;

    if !user.is_active {
        return Err(ApiError(DomainError::Unauthorized(
            "Account is disabled".to_string(),
        )));
    }

    let password_valid = verify_password(&request.password, &user.password_hash).unwrap_or(false);
    if !password_valid {
        return Err(invalid());
    }

    // Fire and forget; a failed timestamp update must not block login.
    if let Err(e) = state.repos.users().touch_last_login(&user.id).await {
        warn!(user_id = %user.id, error = %e, "Failed to record last login");
    }

    let token = create_token(&user.id, &user.email, user.role.as_str(), &state.jwt_config)
        .map_err(internal)?;

    let response = LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_config.expiration_hours * 3600,
        user: UserInfo::from(user),
    };

    Ok(Json(ApiResponse::success(response)))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current account info", body = ApiResponse<UserInfo>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_current_user(
    State(state): State<AuthHandlerState>,
    user: Option<Extension<AuthenticatedUser>>,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    let actor = require_user(user)?;

    let user = state
        .repos
        .users()
        .find_by_id(&actor.user_id)
        .await?
        .ok_or_else(|| DomainError::not_found("User", "id", &actor.user_id))?;

    Ok(Json(ApiResponse::success(UserInfo::from(user))))
}

#[utoipa::path(
    put,
    path = "/api/v1/auth/profile",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<UserInfo>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn update_profile(
    State(state): State<AuthHandlerState>,
    user: Option<Extension<AuthenticatedUser>>,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    let actor = require_user(user)?;

    state
        .repos
        .users()
        .update_profile(
            &actor.user_id,
            &request.name,
            request.phone,
            request.vehicle_type,
        )
        .await?;

    let updated = state
        .repos
        .users()
        .find_by_id(&actor.user_id)
        .await?
        .ok_or_else(|| DomainError::not_found("User", "id", &actor.user_id))?;

    Ok(Json(ApiResponse::success(UserInfo::from(updated))))
}

#[utoipa::path(
    put,
    path = "/api/v1/auth/change-password",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed"),
        (status = 401, description = "Invalid current password")
    )
)]
pub async fn change_password(
    State(state): State<AuthHandlerState>,
    user: Option<Extension<AuthenticatedUser>>,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<EmptyData>>, ApiError> {
    let actor = require_user(user)?;

    let db_user = state
        .repos
        .users()
        .find_by_id(&actor.user_id)
        .await?
        .ok_or_else(|| DomainError::not_found("User", "id", &actor.user_id))?;

    // Re-authenticate before touching the credential.
    let password_valid =
        verify_password(&request.current_password, &db_user.password_hash).unwrap_or(false);
    if !password_valid {
        return Err(ApiError(DomainError::Unauthorized(
            "Invalid current password".to_string(),
        )));
    }

    let new_hash = hash_password(&request.new_password).map_err(internal)?;
    state
        .repos
        .users()
        .update_password_hash(&actor.user_id, &new_hash)
        .await?;

    info!(user_id = %actor.user_id, "Password changed");
    Ok(Json(ApiResponse::success(EmptyData {})))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/password-reset-request",
    tag = "Authentication",
    request_body = PasswordResetRequest,
    responses(
        (status = 200, description = "Reset token issued if the account exists")
    )
)]
pub async fn request_password_reset(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<PasswordResetRequest>,
) -> Result<Json<ApiResponse<EmptyData>>, ApiError> {
    // The response is uniform whether or not the email exists, so the
    // endpoint cannot be used to probe for accounts.
    if let Some(user) = state.repos.users().find_by_email(&request.email).await? {
        let token = reset_token::generate_token();
        let expires_at = Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS);
        state
            .repos
            .users()
            .set_reset_token(&user.id, &reset_token::hash_token(&token), expires_at)
            .await?;
        // Delivery (email/SMS) is out of scope; the token is only logged
        // at debug level for operator-assisted resets.
        tracing::debug!(user_id = %user.id, "Password reset token issued");
    }

    Ok(Json(ApiResponse::success(EmptyData {})))
}
