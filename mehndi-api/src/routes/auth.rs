/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /api/auth/login` - Exchange email and password for a bearer token
/// - `POST /api/auth/register` - Create another admin (requires a token)
///
/// Both answer with the same envelope:
///
/// ```json
/// {
///   "success": true,
///   "message": "Login successful",
///   "token": "eyJ...",
///   "user": { "id": "uuid", "email": "admin@example.com" }
/// }
/// ```
///
/// A failed login is `401` with `{"success": false, "message": "Invalid
/// credentials"}`, whether the email is unknown or the password is wrong.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
    extract::ApiJson,
    middleware::auth::AuthContext,
};
use axum::{extract::State, http::StatusCode, Extension, Json};
use mehndi_shared::{
    auth::{
        jwt::{create_token, Claims},
        password,
        service::{self, AuthResponse, DUPLICATE_USER_MESSAGE},
    },
    ServiceError,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

/// Login request
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Register request
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Checked for strength before hashing
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Logs an admin in
///
/// # Errors
///
/// - `401 Unauthorized`: invalid credentials (as an `AuthResponse` body)
/// - `422 Unprocessable Entity`: malformed request
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    req.validate()?;

    let user = match service::login_user(state.store.as_ref(), &req.email, &req.password).await {
        Ok(user) => user,
        Err(ServiceError::InvalidCredentials) => {
            return Ok((
                StatusCode::UNAUTHORIZED,
                Json(AuthResponse::invalid_credentials()),
            ));
        }
        Err(e) => return Err(e.into()),
    };

    let claims = Claims::new(user.id.clone(), user.email.clone(), state.config.jwt.expiry());
    let token = create_token(&claims, state.jwt_secret())?;

    Ok((StatusCode::OK, Json(AuthResponse::logged_in(token, user))))
}

/// Registers another admin
///
/// # Errors
///
/// - `409 Conflict`: email already registered (as an `AuthResponse` body)
/// - `422 Unprocessable Entity`: malformed email or weak password
pub async fn register(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    req.validate()?;

    password::validate_password_strength(&req.password).map_err(|e| {
        ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "password".to_string(),
            message: e,
        }])
    })?;

    match service::create_admin_user(state.store.as_ref(), &req.email, &req.password).await {
        Ok(user) => {
            info!(user_id = %user.id, created_by = %auth.user_id, "Admin registered");
            Ok((StatusCode::CREATED, Json(AuthResponse::registered(user))))
        }
        Err(ServiceError::DuplicateUser) => Ok((
            StatusCode::CONFLICT,
            Json(AuthResponse::failure(DUPLICATE_USER_MESSAGE)),
        )),
        Err(e) => Err(e.into()),
    }
}
