/// Service error taxonomy
///
/// Every repository, connection and auth operation in this crate fails with a
/// [`ServiceError`]. Variants map one-to-one onto the failure classes callers
/// are expected to branch on:
///
/// | Variant              | Meaning                                              |
/// |----------------------|------------------------------------------------------|
/// | `Configuration`      | Required configuration (e.g. `DATABASE_URL`) missing |
/// | `Connection`         | Store unreachable while opening the pool             |
/// | `Storage`            | Query or write failed on an established connection   |
/// | `NotFound`           | Operation targeted an id that does not exist         |
/// | `DuplicateUser`      | Registration hit the unique email constraint         |
/// | `InvalidCredentials` | Login failed (unknown email and wrong password alike)|
///
/// Nothing in this crate retries. Errors are logged where they occur and then
/// returned to the immediate caller.

use crate::auth::{jwt::JwtError, password::PasswordError};

/// Result alias used throughout the shared crate
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Message shared by every login failure so callers cannot tell an unknown
/// email from a wrong password.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";

/// Error type for persistence and authentication operations
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Required configuration is missing or malformed
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The database could not be reached
    #[error("Failed to connect to the database: {0}")]
    Connection(#[source] sqlx::Error),

    /// A query or write failed after the connection was established
    #[error("Storage operation failed: {0}")]
    Storage(#[source] sqlx::Error),

    /// The targeted record does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// An admin user with this email is already registered
    #[error("User already exists")]
    DuplicateUser,

    /// Generic authentication failure
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Password hashing failed
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Token signing or validation failed
    #[error(transparent)]
    Token(#[from] JwtError),
}

impl ServiceError {
    /// Builds a `NotFound` error for the given entity name and id
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        ServiceError::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Short machine-readable code for structured logs
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Configuration(_) => "configuration_error",
            ServiceError::Connection(_) => "connection_error",
            ServiceError::Storage(_) => "storage_error",
            ServiceError::NotFound { .. } => "not_found",
            ServiceError::DuplicateUser => "duplicate_user",
            ServiceError::InvalidCredentials => "invalid_credentials",
            ServiceError::Password(_) => "password_error",
            ServiceError::Token(_) => "token_error",
        }
    }
}

/// Returns true when a sqlx error is a unique-constraint violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}
