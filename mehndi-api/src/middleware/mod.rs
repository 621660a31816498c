/// Middleware for the API server
///
/// - `auth`: bearer token validation for admin routes

pub mod auth;
