/// Bearer token authentication
///
/// Admin-only routes are wrapped in [`require_admin`], which validates the
/// `Authorization: Bearer <token>` header and stores an [`AuthContext`] in
/// the request extensions for handlers to read.
///
/// # Example
///
/// ```no_run
/// use axum::{middleware, routing::get, Extension, Router};
/// use mehndi_api::app::AppState;
/// use mehndi_api::middleware::auth::{require_admin, AuthContext};
///
/// async fn whoami(Extension(auth): Extension<AuthContext>) -> String {
///     auth.email
/// }
///
/// # fn example(state: AppState) -> Router<AppState> {
/// Router::new()
///     .route("/whoami", get(whoami))
///     .route_layer(middleware::from_fn_with_state(state, require_admin))
/// # }
/// ```

use crate::{app::AppState, error::ApiError};
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use mehndi_shared::auth::jwt::{self, Claims};
use tracing::{debug, warn};

/// Identity of the admin making the request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: String,
    pub email: String,
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
        }
    }
}

/// Extracts the token from an `Authorization` header value
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Rejects requests without a valid admin token
///
/// # Errors
///
/// - `401 Unauthorized` when the header is missing or the token is invalid,
///   expired or signed with another secret
/// - `400 Bad Request` when the header is not a Bearer credential
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            debug!(path = %req.uri().path(), "Missing authorization header");
            ApiError::Unauthorized("Missing authorization header".to_string())
        })?;

    let token = bearer_token(auth_header)
        .ok_or_else(|| ApiError::BadRequest("Expected Bearer token".to_string()))?;

    let claims = jwt::validate_token(token, state.jwt_secret()).map_err(|e| {
        warn!(error = %e, "Rejected bearer token");
        ApiError::from(e)
    })?;

    req.extensions_mut().insert(AuthContext::from(claims));

    Ok(next.run(req).await)
}
