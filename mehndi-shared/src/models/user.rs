/// Admin user model and database operations
///
/// There is a single admin role. Accounts are created by the bootstrap
/// operation and only ever looked up by email afterwards.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     email TEXT NOT NULL,
///     password_hash TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT users_email_key UNIQUE (email)
/// );
/// ```

use super::to_iso8601;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Normalized user record
///
/// Carries the password hash for verification inside the auth service; the
/// hash is never serialized.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: String,
    pub email: String,

    /// Argon2id (or legacy bcrypt) PHC hash. Never plaintext.
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub created_at: String,
}

/// User row as stored in PostgreSQL
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id.to_string(),
            email: row.email,
            password_hash: row.password_hash,
            created_at: to_iso8601(&row.created_at),
        }
    }
}

/// Input for creating a user
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,

    /// Password hash (NOT plaintext password!)
    pub password_hash: String,
}

/// Public identity of an authenticated or newly created admin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
}

impl From<&User> for AuthUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
        }
    }
}

impl UserRow {
    /// Finds a user by email (exact match; callers normalize case)
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await
    }

    /// Inserts a user
    ///
    /// Fails with a unique violation if the email is already taken.
    pub async fn insert(pool: &PgPool, data: &CreateUser) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(&data.email)
        .bind(&data.password_hash)
        .fetch_one(pool)
        .await
    }
}
