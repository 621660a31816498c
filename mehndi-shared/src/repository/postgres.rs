/// PostgreSQL-backed repositories
///
/// Every operation first asks the [`ConnectionManager`] for the shared pool,
/// so the first call in a process opens the connection and later calls reuse
/// it.
///
/// # Example
///
/// ```no_run
/// use mehndi_shared::repository::{PgStore, ProductRepository};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = PgStore::global();
/// for product in store.list_products().await? {
///     println!("{} - {}", product.name, product.price);
/// }
/// # Ok(())
/// # }
/// ```

use super::{parse_id, Datastore, LeadRepository, ProductRepository, UserRepository};
use crate::db::pool::{self, ConnectionManager};
use crate::error::{is_unique_violation, ServiceError, ServiceResult};
use crate::models::{
    lead::{CreateLead, Lead, LeadRow},
    product::{CreateProduct, DeletedProduct, Product, ProductRow, UpdateProduct},
    user::{CreateUser, User, UserRow},
};
use async_trait::async_trait;
use tracing::{debug, error, warn};

/// Repository implementation over PostgreSQL
#[derive(Clone)]
pub struct PgStore {
    manager: ConnectionManager,
}

impl PgStore {
    /// Creates a store using the given connection manager
    pub fn new(manager: ConnectionManager) -> Self {
        Self { manager }
    }

    /// Creates a store on the process-wide connection manager
    pub fn global() -> Self {
        Self::new(ConnectionManager::global())
    }

    /// The connection manager this store draws its pool from
    pub fn manager(&self) -> &ConnectionManager {
        &self.manager
    }
}

fn storage_error(operation: &'static str, err: sqlx::Error) -> ServiceError {
    error!(operation, error = %err, "Storage operation failed");
    ServiceError::Storage(err)
}

fn not_found(entity: &'static str, id: &str) -> ServiceError {
    warn!(entity, id, "Record not found");
    ServiceError::not_found(entity, id)
}

#[async_trait]
impl ProductRepository for PgStore {
    async fn list_products(&self) -> ServiceResult<Vec<Product>> {
        let pool = self.manager.connect().await?;

        let rows = ProductRow::list(&pool)
            .await
            .map_err(|e| storage_error("list_products", e))?;

        debug!(count = rows.len(), "Fetched products");
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn create_product(&self, data: CreateProduct) -> ServiceResult<Product> {
        let pool = self.manager.connect().await?;

        let row = ProductRow::insert(&pool, &data)
            .await
            .map_err(|e| storage_error("create_product", e))?;

        debug!(product_id = %row.id, "Created product");
        Ok(Product::from(row))
    }

    async fn update_product(&self, id: &str, data: UpdateProduct) -> ServiceResult<Product> {
        let product_id = parse_id("Product", id)?;
        let pool = self.manager.connect().await?;

        let row = ProductRow::update(&pool, product_id, &data)
            .await
            .map_err(|e| storage_error("update_product", e))?
            .ok_or_else(|| not_found("Product", id))?;

        debug!(product_id = %row.id, "Updated product");
        Ok(Product::from(row))
    }

    async fn delete_product(&self, id: &str) -> ServiceResult<DeletedProduct> {
        let product_id = parse_id("Product", id)?;
        let pool = self.manager.connect().await?;

        let deleted = ProductRow::delete(&pool, product_id)
            .await
            .map_err(|e| storage_error("delete_product", e))?
            .ok_or_else(|| not_found("Product", id))?;

        debug!(product_id = %deleted.id, "Deleted product");
        Ok(deleted)
    }
}

#[async_trait]
impl LeadRepository for PgStore {
    async fn list_leads(&self) -> ServiceResult<Vec<Lead>> {
        let pool = self.manager.connect().await?;

        let rows = LeadRow::list(&pool)
            .await
            .map_err(|e| storage_error("list_leads", e))?;

        debug!(count = rows.len(), "Fetched leads");
        Ok(rows.into_iter().map(Lead::from).collect())
    }

    async fn create_lead(&self, data: CreateLead) -> ServiceResult<Lead> {
        let pool = self.manager.connect().await?;

        let row = LeadRow::insert(&pool, &data)
            .await
            .map_err(|e| storage_error("create_lead", e))?;

        debug!(lead_id = %row.id, "Created lead");
        Ok(Lead::from(row))
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn find_user_by_email(&self, email: &str) -> ServiceResult<Option<User>> {
        let pool = self.manager.connect().await?;

        let row = UserRow::find_by_email(&pool, email)
            .await
            .map_err(|e| storage_error("find_user_by_email", e))?;

        Ok(row.map(User::from))
    }

    async fn create_user(&self, data: CreateUser) -> ServiceResult<User> {
        let pool = self.manager.connect().await?;

        match UserRow::insert(&pool, &data).await {
            Ok(row) => {
                debug!(user_id = %row.id, "Created user");
                Ok(User::from(row))
            }
            Err(e) if is_unique_violation(&e) => {
                warn!(email = %data.email, "User email already registered");
                Err(ServiceError::DuplicateUser)
            }
            Err(e) => Err(storage_error("create_user", e)),
        }
    }
}

#[async_trait]
impl Datastore for PgStore {
    async fn health_check(&self) -> ServiceResult<()> {
        let pool = self.manager.connect().await?;

        pool::health_check(&pool)
            .await
            .map_err(|e| storage_error("health_check", e))
    }
}
