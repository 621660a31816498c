/// HTTP client facade
///
/// Mirrors the repository operations over the REST API:
///
/// | Call                              | Request                    |
/// |-----------------------------------|----------------------------|
/// | `products().get_all()`            | `GET    /products`         |
/// | `products().create(data)`         | `POST   /products`         |
/// | `products().update(id, data)`     | `PUT    /products/:id`     |
/// | `products().delete(id)`           | `DELETE /products/:id`     |
/// | `leads().get_all()`               | `GET    /leads`            |
/// | `leads().create(data)`            | `POST   /leads`            |
/// | `auth().login(credentials)`       | `POST   /auth/login`       |
/// | `auth().register(email, pass)`    | `POST   /auth/register`    |
///
/// `Authorization: Bearer <token>` is attached whenever the token store holds
/// a token. No retries.

use crate::{
    config::ClientConfig,
    error::ClientError,
    token_store::{FileTokenStore, MemoryTokenStore, TokenStore},
};
use mehndi_shared::{
    auth::service::AuthResponse,
    models::{
        lead::{CreateLead, Lead},
        product::{CreateProduct, DeletedProduct, Product, UpdateProduct},
    },
};
use reqwest::{header, Method, RequestBuilder, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Message returned by `auth().login` on any failure
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";

/// Message returned by `auth().register` on any failure
pub const REGISTRATION_FAILED_MESSAGE: &str = "Registration failed";

/// Email and password pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// REST API client
///
/// Cheap to clone; clones share the HTTP connection pool and token store.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Creates a client, persisting the token to `config.token_path` if set
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let tokens: Arc<dyn TokenStore> = match &config.token_path {
            Some(path) => Arc::new(FileTokenStore::new(path)),
            None => Arc::new(MemoryTokenStore::new()),
        };

        Self::with_token_store(config, tokens)
    }

    /// Creates a client with a caller-supplied token store
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if the base URL is not an absolute
    /// http(s) URL.
    pub fn with_token_store(
        config: &ClientConfig,
        tokens: Arc<dyn TokenStore>,
    ) -> Result<Self, ClientError> {
        let base_url = parse_base_url(&config.base_url)?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url,
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn products(&self) -> ProductsApi<'_> {
        ProductsApi { client: self }
    }

    pub fn leads(&self) -> LeadsApi<'_> {
        LeadsApi { client: self }
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi { client: self }
    }

    /// Builds a request to the base URL plus `segments`, each percent-encoded
    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }

        let builder = self.http.request(method, url);

        match self.tokens.load() {
            Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// Sends a request and decodes a 2xx JSON body
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, "API request failed");
            ClientError::Transport(e)
        })?;

        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            serde_json::from_str::<T>(&text).map_err(|e| ClientError::Decode(e.to_string()))
        } else {
            let err = ClientError::from_response(status, &text);
            warn!(status = status.as_u16(), error = %err, "API returned an error");
            Err(err)
        }
    }
}

/// `/products` operations
pub struct ProductsApi<'a> {
    client: &'a ApiClient,
}

impl ProductsApi<'_> {
    /// All products, newest first
    pub async fn get_all(&self) -> Result<Vec<Product>, ClientError> {
        self.client
            .send(self.client.request(Method::GET, &["products"]))
            .await
    }

    pub async fn create(&self, data: &CreateProduct) -> Result<Product, ClientError> {
        self.client
            .send(self.client.request(Method::POST, &["products"]).json(data))
            .await
    }

    /// Partial update; only the fields set in `data` are sent
    pub async fn update(&self, id: &str, data: &UpdateProduct) -> Result<Product, ClientError> {
        self.client
            .send(self.client.request(Method::PUT, &["products", id]).json(data))
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<DeletedProduct, ClientError> {
        self.client
            .send(self.client.request(Method::DELETE, &["products", id]))
            .await
    }
}

/// `/leads` operations
pub struct LeadsApi<'a> {
    client: &'a ApiClient,
}

impl LeadsApi<'_> {
    /// All leads, newest first (admin)
    pub async fn get_all(&self) -> Result<Vec<Lead>, ClientError> {
        self.client
            .send(self.client.request(Method::GET, &["leads"]))
            .await
    }

    /// Submits the contact form
    pub async fn create(&self, data: &CreateLead) -> Result<Lead, ClientError> {
        self.client
            .send(self.client.request(Method::POST, &["leads"]).json(data))
            .await
    }
}

/// `/auth` operations and local session state
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl AuthApi<'_> {
    /// Logs in and stores the returned token
    ///
    /// Never fails: any transport or server error is returned as
    /// `{success: false, message: "Login failed"}`.
    pub async fn login(&self, credentials: &Credentials) -> AuthResponse {
        let request = self
            .client
            .request(Method::POST, &["auth", "login"])
            .json(credentials);

        let response = match self.client.send::<AuthResponse>(request).await {
            Ok(response) => response,
            Err(e) => {
                debug!(error = %e, "Login request failed");
                return AuthResponse::failure(LOGIN_FAILED_MESSAGE);
            }
        };

        if let Some(token) = response.token.as_deref().filter(|_| response.success) {
            if let Err(e) = self.client.tokens.save(token) {
                warn!(error = %e, "Failed to persist bearer token");
            }
        }

        response
    }

    /// Registers another admin using the stored token
    ///
    /// Never fails: any transport or server error is returned as
    /// `{success: false, message: "Registration failed"}`.
    pub async fn register(&self, email: &str, password: &str) -> AuthResponse {
        let request = self
            .client
            .request(Method::POST, &["auth", "register"])
            .json(&Credentials::new(email, password));

        match self.client.send::<AuthResponse>(request).await {
            Ok(response) => response,
            Err(e) => {
                debug!(error = %e, "Registration request failed");
                AuthResponse::failure(REGISTRATION_FAILED_MESSAGE)
            }
        }
    }

    /// Forgets the stored token; the server is not contacted
    pub fn logout(&self) -> Result<(), ClientError> {
        self.client.tokens.clear()?;
        Ok(())
    }

    /// Whether a token is stored (validity and expiry are not checked)
    pub fn is_authenticated(&self) -> bool {
        self.client.tokens.load().is_some()
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let url = Url::parse(raw)
        .map_err(|e| ClientError::Config(format!("Invalid API base URL '{}': {}", raw, e)))?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ClientError::Config(format!(
            "API base URL must be http(s): '{}'",
            raw
        )));
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespaces_share_token_store() {
        let tokens = Arc::new(MemoryTokenStore::new());
        let client = ApiClient::with_token_store(
            &ClientConfig::new("http://127.0.0.1:5000/api"),
            tokens.clone(),
        )
        .unwrap();

        assert!(!client.auth().is_authenticated());

        tokens.save("abc").unwrap();
        assert!(client.auth().is_authenticated());
        assert!(client.clone().auth().is_authenticated());

        client.auth().logout().unwrap();
        assert!(!client.auth().is_authenticated());
        assert_eq!(tokens.load(), None);
    }

    #[test]
    fn test_new_picks_file_store_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        std::fs::write(&path, "persisted").unwrap();

        let client = ApiClient::new(&ClientConfig::default().with_token_path(&path)).unwrap();
        assert!(client.auth().is_authenticated());
        assert_eq!(client.base_url(), "http://localhost:5000/api");
    }

    #[test]
    fn test_bearer_header_attached_when_token_present() {
        let tokens = Arc::new(MemoryTokenStore::new());
        let client =
            ApiClient::with_token_store(&ClientConfig::default(), tokens.clone()).unwrap();

        let anonymous = client.request(Method::GET, &["leads"]).build().unwrap();
        assert!(anonymous.headers().get(header::AUTHORIZATION).is_none());
        assert_eq!(anonymous.url().as_str(), "http://localhost:5000/api/leads");

        tokens.save("abc").unwrap();
        let authed = client.request(Method::GET, &["leads"]).build().unwrap();
        assert_eq!(authed.headers()[header::AUTHORIZATION], "Bearer abc");
    }

    #[test]
    fn test_id_is_encoded_as_one_segment() {
        let client = ApiClient::new(&ClientConfig::default()).unwrap();

        let request = client
            .request(Method::DELETE, &["products", "a/b?c#d"])
            .build()
            .unwrap();
        assert_eq!(
            request.url().as_str(),
            "http://localhost:5000/api/products/a%2Fb%3Fc%23d"
        );
        assert_eq!(request.url().query(), None);
        assert_eq!(request.url().fragment(), None);
    }

    #[test]
    fn test_root_base_url_has_no_double_slash() {
        let client = ApiClient::new(&ClientConfig::new("http://127.0.0.1:5000")).unwrap();

        let request = client.request(Method::GET, &["products"]).build().unwrap();
        assert_eq!(request.url().as_str(), "http://127.0.0.1:5000/products");
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        for raw in ["not a url", "mailto:owner@mehndi.studio"] {
            let err = ApiClient::new(&ClientConfig::new(raw)).err().unwrap();
            assert!(matches!(err, ClientError::Config(_)), "{}", raw);
        }
    }
}
