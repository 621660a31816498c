/// Database migration runner
///
/// Schema migrations live in `mehndi-shared/migrations/` and are embedded
/// into the binary at compile time with `sqlx::migrate!`.
///
/// # Example
///
/// ```no_run
/// use mehndi_shared::db::{migrations::run_migrations, pool::ConnectionManager};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = ConnectionManager::global().connect().await?;
/// run_migrations(&pool).await?;
/// # Ok(())
/// # }
/// ```

use sqlx::postgres::PgPool;
use tracing::{error, info};

/// Runs all pending database migrations
///
/// # Errors
///
/// Returns an error if a migration fails to apply or the migrations table
/// cannot be read.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    match sqlx::migrate!("./migrations").run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Migration failed");
            Err(e)
        }
    }
}
