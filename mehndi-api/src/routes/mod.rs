/// API route handlers
///
/// - `health`: Health check endpoint
/// - `products`: Product catalog CRUD
/// - `leads`: Contact-form leads
/// - `auth`: Login and admin registration

pub mod auth;
pub mod health;
pub mod leads;
pub mod products;
