//! Command implementations for the `mehndi-api` binary
//!
//! - `serve`: run the HTTP server
//! - `admin`: bootstrap admin accounts

pub mod admin;
pub mod serve;
