/// Database layer
///
/// # Modules
///
/// - `pool`: connection manager, pool construction and health checks
/// - `migrations`: embedded schema migrations
///
/// Entity schemas are in the `models` module and the repository functions
/// that use this pool are in `repository`.

pub mod migrations;
pub mod pool;

pub use pool::{ConnectionManager, DatabaseConfig};
