/// In-memory repositories
///
/// Keeps rows in process memory behind `tokio::sync::RwLock`s while honouring
/// the same contract as [`PgStore`](super::PgStore): UUID ids and timestamps
/// are assigned here, lists come back newest first, user emails are unique.
/// Used by the test suites and for running the API without a database.
///
/// # Example
///
/// ```
/// use mehndi_shared::models::lead::CreateLead;
/// use mehndi_shared::repository::{LeadRepository, MemoryStore};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = MemoryStore::new();
/// assert!(store.list_leads().await?.is_empty());
///
/// store
///     .create_lead(CreateLead {
///         name: "Priya".to_string(),
///         email: "priya@example.com".to_string(),
///         phone: "555-0100".to_string(),
///         service: None,
///         message: "Bridal booking".to_string(),
///     })
///     .await?;
///
/// assert_eq!(store.list_leads().await?.len(), 1);
/// # Ok(())
/// # }
/// ```

use super::{parse_id, Datastore, LeadRepository, ProductRepository, UserRepository};
use crate::error::{ServiceError, ServiceResult};
use crate::models::{
    lead::{CreateLead, Lead, LeadRow},
    product::{CreateProduct, DeletedProduct, Product, ProductRow, UpdateProduct},
    user::{CreateUser, User, UserRow},
};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

/// Repository implementation held entirely in memory
#[derive(Default)]
pub struct MemoryStore {
    products: RwLock<Vec<ProductRow>>,
    leads: RwLock<Vec<LeadRow>>,
    users: RwLock<Vec<UserRow>>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users with this email
    pub async fn user_count(&self, email: &str) -> usize {
        self.users
            .read()
            .await
            .iter()
            .filter(|user| user.email == email)
            .count()
    }
}

/// Sorts rows newest first; the sort is stable so ties keep insertion order
fn newest_first<T, F>(rows: &[T], created_at: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> chrono::DateTime<Utc>,
{
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    sorted
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn list_products(&self) -> ServiceResult<Vec<Product>> {
        let products = self.products.read().await;

        Ok(newest_first(products.as_slice(), |row| row.created_at)
            .into_iter()
            .map(Product::from)
            .collect())
    }

    async fn create_product(&self, data: CreateProduct) -> ServiceResult<Product> {
        let row = ProductRow {
            id: Uuid::new_v4(),
            name: data.name,
            description: data.description,
            price: data.price,
            image_url: data.image_url,
            created_at: Utc::now(),
        };

        self.products.write().await.push(row.clone());

        debug!(product_id = %row.id, "Created product");
        Ok(Product::from(row))
    }

    async fn update_product(&self, id: &str, data: UpdateProduct) -> ServiceResult<Product> {
        let product_id = parse_id("Product", id)?;
        let mut products = self.products.write().await;

        let row = products
            .iter_mut()
            .find(|row| row.id == product_id)
            .ok_or_else(|| {
                warn!(id, "Product not found");
                ServiceError::not_found("Product", id)
            })?;

        data.apply(row);

        debug!(product_id = %row.id, "Updated product");
        Ok(Product::from(row.clone()))
    }

    async fn delete_product(&self, id: &str) -> ServiceResult<DeletedProduct> {
        let product_id = parse_id("Product", id)?;
        let mut products = self.products.write().await;

        let position = products
            .iter()
            .position(|row| row.id == product_id)
            .ok_or_else(|| {
                warn!(id, "Product not found");
                ServiceError::not_found("Product", id)
            })?;

        let row = products.remove(position);

        debug!(product_id = %row.id, "Deleted product");
        Ok(DeletedProduct {
            id: row.id.to_string(),
            name: row.name,
        })
    }
}

#[async_trait]
impl LeadRepository for MemoryStore {
    async fn list_leads(&self) -> ServiceResult<Vec<Lead>> {
        let leads = self.leads.read().await;

        Ok(newest_first(leads.as_slice(), |row| row.created_at)
            .into_iter()
            .map(Lead::from)
            .collect())
    }

    async fn create_lead(&self, data: CreateLead) -> ServiceResult<Lead> {
        let row = LeadRow {
            id: Uuid::new_v4(),
            name: data.name,
            email: data.email,
            phone: data.phone,
            service: data.service,
            message: data.message,
            created_at: Utc::now(),
        };

        self.leads.write().await.push(row.clone());

        debug!(lead_id = %row.id, "Created lead");
        Ok(Lead::from(row))
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> ServiceResult<Option<User>> {
        let users = self.users.read().await;

        Ok(users
            .iter()
            .find(|row| row.email == email)
            .cloned()
            .map(User::from))
    }

    async fn create_user(&self, data: CreateUser) -> ServiceResult<User> {
        let mut users = self.users.write().await;

        // Same guarantee as the UNIQUE constraint in PostgreSQL
        if users.iter().any(|row| row.email == data.email) {
            warn!(email = %data.email, "User email already registered");
            return Err(ServiceError::DuplicateUser);
        }

        let row = UserRow {
            id: Uuid::new_v4(),
            email: data.email,
            password_hash: data.password_hash,
            created_at: Utc::now(),
        };
        users.push(row.clone());

        debug!(user_id = %row.id, "Created user");
        Ok(User::from(row))
    }
}

#[async_trait]
impl Datastore for MemoryStore {
    async fn health_check(&self) -> ServiceResult<()> {
        Ok(())
    }
}
