//! `mehndi-api create-admin`
//!
//! The only way to create the first admin account; further admins can be
//! registered through the API by an authenticated admin.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - PostgreSQL connection string

use mehndi_shared::{
    auth::{password::validate_password_strength, service::create_admin_user},
    db::{migrations::run_migrations, ConnectionManager},
    repository::PgStore,
    ServiceError,
};
use tracing::info;

/// Creates an admin user in the configured database
pub async fn create_admin(email: &str, password: &str) -> anyhow::Result<()> {
    validate_password_strength(password).map_err(anyhow::Error::msg)?;

    let manager = ConnectionManager::global();
    let pool = manager.connect().await?;
    run_migrations(&pool).await?;

    let store = PgStore::new(manager.clone());

    let result = create_admin_user(&store, email, password).await;
    manager.reset().await;

    match result {
        Ok(user) => {
            info!(user_id = %user.id, email = %user.email, "Admin user created successfully");
            Ok(())
        }
        Err(ServiceError::DuplicateUser) => {
            anyhow::bail!("Admin user already exists with email: {}", email)
        }
        Err(e) => Err(e.into()),
    }
}
