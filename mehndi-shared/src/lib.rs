//! # Mehndi Studio Shared Library
//!
//! Persistence and authentication layer shared by the API server and the
//! HTTP client facade.
//!
//! ## Module Organization
//!
//! - `error`: Service error taxonomy
//! - `db`: Connection manager, pool construction and migrations
//! - `models`: Entity schemas (rows and normalized records)
//! - `repository`: Repository traits plus PostgreSQL and in-memory stores
//! - `auth`: Password hashing, JWT tokens and the auth service

pub mod auth;
pub mod db;
pub mod error;
pub mod models;
pub mod repository;

pub use error::{ServiceError, ServiceResult};

/// Current version of the shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
