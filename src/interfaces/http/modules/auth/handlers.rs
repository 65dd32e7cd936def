//! Auth handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use tracing::{info, warn};

use crate::auth::{create_token, JwtConfig};
use crate::domain::{DomainError, RepositoryProvider};
use crate::interfaces::http::common::{ApiError, ApiResponse, ValidatedJson};

use super::dto::{LoginRequest, LoginResponse, UserInfo};

/// Auth handler state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub jwt_config: JwtConfig,
}

/// Login with username (or email) and password
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(body): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let invalid = || DomainError::Unauthorized("Invalid credentials".into());

    let mut user = state
        .repos
        .users()
        .find_by_login(&body.username)
        .await?
        .ok_or_else(invalid)?;

    if !user.is_active {
        warn!(username = %body.username, "login attempt on disabled account");
        return Err(invalid().into());
    }

    let password_ok = crate::auth::verify_password(&body.password, &user.password_hash)
        .map_err(|e| DomainError::Storage(format!("Password verification error: {}", e)))?;
    if !password_ok {
        warn!(username = %body.username, "failed login attempt");
        return Err(invalid().into());
    }

    let token = create_token(
        &user.id,
        &user.username,
        user.role.as_str(),
        &state.jwt_config,
    )
    .map_err(|e| DomainError::Storage(format!("Token creation error: {}", e)))?;

    // Record the login; a failure here must not fail the login itself.
    user.record_login();
    if let Err(e) = state.repos.users().update(user.clone()).await {
        warn!(user_id = %user.id, error = %e, "failed to record login time");
    }

    info!(user_id = %user.id, username = %user.username, "user logged in");
    Ok(Json(ApiResponse::success(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_config.expiration_hours * 3600,
        user: UserInfo::from(&user),
    })))
}

/// Current authenticated user
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserInfo>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(
    State(state): State<AuthHandlerState>,
    axum::Extension(auth): axum::Extension<crate::auth::AuthenticatedUser>,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    let user = state
        .repos
        .users()
        .find_by_id(&auth.user_id)
        .await?
        .ok_or_else(|| DomainError::not_found("User", &auth.user_id))?;
    Ok(Json(ApiResponse::success(UserInfo::from(&user))))
}
