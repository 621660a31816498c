/// Common test utilities for integration tests
///
/// Every context gets its own in-memory store, so tests never share data and
/// need no database. Request helpers drive the router directly with
/// `tower::ServiceExt::oneshot`.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use mehndi_api::app::{build_router, AppState};
use mehndi_api::config::{ApiConfig, Config, JwtConfig};
use mehndi_shared::auth::jwt::{create_token, Claims};
use mehndi_shared::auth::service::create_admin_user;
use mehndi_shared::models::user::AuthUser;
use mehndi_shared::repository::MemoryStore;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "owner@mehndi.studio";
pub const ADMIN_PASSWORD: &str = "Henna#2025";
pub const JWT_SECRET: &str = "integration-test-secret-at-least-32-bytes";

/// Test context containing all necessary resources
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub app: Router,
    pub config: Config,
    pub admin: AuthUser,
    pub jwt_token: String,
}

impl TestContext {
    /// Creates a context with a fresh store and one seeded admin
    pub async fn new() -> anyhow::Result<Self> {
        let config = test_config();
        let store = Arc::new(MemoryStore::new());

        let admin = create_admin_user(store.as_ref(), ADMIN_EMAIL, ADMIN_PASSWORD).await?;

        let claims = Claims::new(admin.id.clone(), admin.email.clone(), config.jwt.expiry());
        let jwt_token = create_token(&claims, &config.jwt.secret)?;

        let state = AppState::new(store.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext {
            store,
            app,
            config,
            admin,
            jwt_token,
        })
    }

    /// Returns authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.jwt_token)
    }

    /// Sends a request without credentials
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        self.request(method, uri, body, None).await
    }

    /// Sends a request with the seeded admin's bearer token
    pub async fn send_as_admin(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let auth = self.auth_header();
        self.request(method, uri, body, Some(&auth)).await
    }

    /// Sends a request with an arbitrary `Authorization` header
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        authorization: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(value) = authorization {
            builder = builder.header("authorization", value);
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }
}

/// Configuration used by every test router
pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            ..Default::default()
        },
        jwt: JwtConfig {
            secret: JWT_SECRET.to_string(),
            expiry_hours: 24,
        },
    }
}
