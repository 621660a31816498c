/// Repository layer
///
/// Repository functions perform one CRUD operation against one entity type
/// and always hand back normalized records (string ids, ISO-8601 timestamps).
/// They are expressed as traits so the API server and tests can run against
/// either backend:
///
/// - [`PgStore`]: PostgreSQL via the process-wide [`ConnectionManager`]
/// - [`MemoryStore`]: in-process store with the same contract
///
/// # Contract
///
/// - `list_*` returns records ordered newest first; ties come back in any
///   order. An empty table is an empty `Vec`, not an error.
/// - `create_*` lets the store assign `id` and `created_at`.
/// - `update_product` writes only the supplied fields and fails with
///   `NotFound` for unknown (or malformed) ids.
/// - `delete_product` returns `{id, name}` and fails with `NotFound` when the
///   id does not exist.
/// - `create_user` fails with `DuplicateUser` if the email is taken.
///
/// Failures are logged where they occur and never retried.
///
/// [`ConnectionManager`]: crate::db::pool::ConnectionManager

use crate::error::{ServiceError, ServiceResult};
use crate::models::{
    lead::{CreateLead, Lead},
    product::{CreateProduct, DeletedProduct, Product, UpdateProduct},
    user::{CreateUser, User},
};
use async_trait::async_trait;
use tracing::warn;
use uuid::Uuid;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Product repository functions
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products, newest first
    async fn list_products(&self) -> ServiceResult<Vec<Product>>;

    /// Persists a new product and returns it with its assigned id
    async fn create_product(&self, data: CreateProduct) -> ServiceResult<Product>;

    /// Applies a partial update and returns the post-update record
    async fn update_product(&self, id: &str, data: UpdateProduct) -> ServiceResult<Product>;

    /// Removes a product and returns its id and name
    async fn delete_product(&self, id: &str) -> ServiceResult<DeletedProduct>;
}

/// Lead repository functions
#[async_trait]
pub trait LeadRepository: Send + Sync {
    /// All leads, newest first
    async fn list_leads(&self) -> ServiceResult<Vec<Lead>>;

    /// Persists a contact-form submission
    async fn create_lead(&self, data: CreateLead) -> ServiceResult<Lead>;
}

/// User lookups used by the auth service
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by (already normalized) email
    async fn find_user_by_email(&self, email: &str) -> ServiceResult<Option<User>>;

    /// Persists a user, failing with `DuplicateUser` if the email is taken
    async fn create_user(&self, data: CreateUser) -> ServiceResult<User>;
}

/// A complete backend: every repository plus a liveness check
#[async_trait]
pub trait Datastore: ProductRepository + LeadRepository + UserRepository {
    /// Checks that the backend is reachable
    async fn health_check(&self) -> ServiceResult<()>;
}

/// Parses a record id, treating malformed ids as missing records
pub(crate) fn parse_id(entity: &'static str, id: &str) -> ServiceResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| {
        warn!(entity, id, "Malformed id, treating as not found");
        ServiceError::not_found(entity, id)
    })
}
