//! # Mehndi Studio API Client
//!
//! HTTP facade over the back-office REST API for UIs that do not talk to the
//! database directly. Every request carries the stored bearer token, if any.
//!
//! ## Modules
//!
//! - `client`: [`ApiClient`] and its products / leads / auth namespaces
//! - `config`: [`ClientConfig`] loaded from the environment
//! - `token_store`: where the bearer token lives between calls
//! - `error`: [`ClientError`]
//!
//! ## Result conventions
//!
//! `auth().login` and `auth().register` never fail: any transport or server
//! error comes back as `AuthResponse { success: false, .. }`. Every other
//! operation returns `Err(ClientError)` for the caller to handle.
//!
//! ## Example
//!
//! ```no_run
//! use mehndi_client::{ApiClient, ClientConfig, Credentials};
//!
//! # async fn example() -> Result<(), mehndi_client::ClientError> {
//! let client = ApiClient::new(&ClientConfig::from_env()?)?;
//!
//! let response = client
//!     .auth()
//!     .login(&Credentials::new("owner@mehndi.studio", "Henna#2025"))
//!     .await;
//!
//! if response.success {
//!     for lead in client.leads().get_all().await? {
//!         println!("{} <{}>", lead.name, lead.email);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod token_store;

pub use client::{ApiClient, AuthApi, Credentials, LeadsApi, ProductsApi};
pub use config::ClientConfig;
pub use error::ClientError;
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
