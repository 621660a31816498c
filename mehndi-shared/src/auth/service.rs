/// Admin authentication service
///
/// Wraps the user repository with password hashing and shapes the results
/// returned by the login and registration endpoints.
///
/// Emails are trimmed and lower-cased before every lookup and insert.
/// Login failures are deliberately indistinguishable: an unknown email and a
/// wrong password both produce [`ServiceError::InvalidCredentials`].
///
/// # Example
///
/// ```
/// use mehndi_shared::auth::service::{create_admin_user, login_user};
/// use mehndi_shared::repository::MemoryStore;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryStore::new();
///
/// let created = create_admin_user(&store, "Admin@Example.com", "Henna#2025").await?;
/// let logged_in = login_user(&store, "admin@example.com", "Henna#2025").await?;
///
/// assert_eq!(created, logged_in);
/// # Ok(())
/// # }
/// ```

use crate::auth::password::{hash_password, verify_password};
use crate::error::{ServiceError, ServiceResult, INVALID_CREDENTIALS_MESSAGE};
use crate::models::user::{AuthUser, CreateUser};
use crate::repository::UserRepository;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful";
pub const ADMIN_CREATED_MESSAGE: &str = "Admin user created successfully";
pub const DUPLICATE_USER_MESSAGE: &str = "User already exists";

/// Result of a login or registration call
///
/// `token` is only present after a successful login, `user` after any
/// success. Failures carry just `success: false` and a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<AuthUser>,
}

impl AuthResponse {
    /// Successful login with the issued bearer token
    pub fn logged_in(token: String, user: AuthUser) -> Self {
        Self {
            success: true,
            message: LOGIN_SUCCESS_MESSAGE.to_string(),
            token: Some(token),
            user: Some(user),
        }
    }

    /// Successful admin registration
    pub fn registered(user: AuthUser) -> Self {
        Self {
            success: true,
            message: ADMIN_CREATED_MESSAGE.to_string(),
            token: None,
            user: Some(user),
        }
    }

    /// Any failure
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            token: None,
            user: None,
        }
    }

    /// The generic login failure
    pub fn invalid_credentials() -> Self {
        Self::failure(INVALID_CREDENTIALS_MESSAGE)
    }
}

/// Trims and lower-cases an email for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Creates an admin account
///
/// # Errors
///
/// - `DuplicateUser` if the email is already registered. The pre-insert
///   lookup catches the common case; the store's uniqueness guarantee catches
///   concurrent registrations.
/// - `Password` if hashing fails
/// - `Storage` / `Connection` from the repository
pub async fn create_admin_user<R>(repo: &R, email: &str, password: &str) -> ServiceResult<AuthUser>
where
    R: UserRepository + ?Sized,
{
    let email = normalize_email(email);

    if repo.find_user_by_email(&email).await?.is_some() {
        warn!(email = %email, "Admin registration rejected: email already registered");
        return Err(ServiceError::DuplicateUser);
    }

    let password_hash = hash_password(password).map_err(|e| {
        error!(error = %e, "Failed to hash admin password");
        ServiceError::from(e)
    })?;

    let user = repo
        .create_user(CreateUser {
            email,
            password_hash,
        })
        .await?;

    info!(user_id = %user.id, email = %user.email, "Admin user created");
    Ok(AuthUser::from(&user))
}

/// Checks an email and password pair
///
/// # Errors
///
/// - `InvalidCredentials` for an unknown email or a wrong password
/// - `Password` if the stored hash is unreadable
/// - `Storage` / `Connection` from the repository
pub async fn login_user<R>(repo: &R, email: &str, password: &str) -> ServiceResult<AuthUser>
where
    R: UserRepository + ?Sized,
{
    let email = normalize_email(email);

    let Some(user) = repo.find_user_by_email(&email).await? else {
        warn!(email = %email, "Login failed: unknown email");
        return Err(ServiceError::InvalidCredentials);
    };

    let valid = verify_password(password, &user.password_hash).map_err(|e| {
        error!(user_id = %user.id, error = %e, "Stored password hash could not be verified");
        ServiceError::from(e)
    })?;

    if !valid {
        warn!(user_id = %user.id, "Login failed: wrong password");
        return Err(ServiceError::InvalidCredentials);
    }

    info!(user_id = %user.id, "Admin logged in");
    Ok(AuthUser::from(&user))
}
