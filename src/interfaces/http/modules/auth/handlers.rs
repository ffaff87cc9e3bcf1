//! Authentication API handlers
//!
//! Thin wrappers over `AuthService`.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};

use super::dto::{LoginRequest, LoginResponse, SignupRequest, UserDto};
use crate::application::identity::AuthService;
use crate::domain::DomainError;
use crate::infrastructure::database::repositories::UserRepository;
use crate::interfaces::http::common::{domain_error_response, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

/// Auth handler state — concrete over `UserRepository` for Axum
/// compatibility.
#[derive(Clone)]
pub struct AuthHandlerState {
    pub auth_service: Arc<AuthService<UserRepository>>,
}

#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "Authentication",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already exists")
    )
)]
pub async fn signup(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), (StatusCode, Json<ApiResponse<()>>)> {
    match state
        .auth_service
        .signup(
            &request.username,
            &request.email,
            &request.password,
            request.role.as_deref(),
        )
        .await
    {
        Ok(user) => Ok((
            StatusCode::CREATED,
            Json(ApiResponse::success(UserDto::from(user))),
        )),
        Err(e) => Err(domain_error_response(e)),
    }
}

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login succeeded, returns a session token", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state
        .auth_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(auth) => Ok(Json(ApiResponse::success(LoginResponse {
            id: auth.user.id,
            email: auth.user.email,
            token: auth.token,
            token_type: auth.token_type,
            expires_in: auth.expires_in,
        }))),
        Err(e) => Err(domain_error_response(e)),
    }
}

#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserDto>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(
    State(state): State<AuthHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<UserDto>>, (StatusCode, Json<ApiResponse<()>>)> {
    match state.auth_service.get_user_by_id(&user.user_id).await {
        Ok(Some(user)) => Ok(Json(ApiResponse::success(UserDto::from(user)))),
        Ok(None) => Err(domain_error_response(DomainError::NotFound {
            entity: "User",
            field: "id",
            value: user.user_id,
        })),
        Err(e) => Err(domain_error_response(e)),
    }
}
