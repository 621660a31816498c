/// Authentication for the admin back-office
///
/// # Modules
///
/// - [`password`]: Argon2id hashing, legacy bcrypt verification
/// - [`jwt`]: bearer token generation and validation
/// - [`service`]: admin creation, login and result shaping
///
/// # Example
///
/// ```no_run
/// use chrono::Duration;
/// use mehndi_shared::auth::jwt::{create_token, Claims};
/// use mehndi_shared::auth::service::{login_user, AuthResponse};
/// use mehndi_shared::repository::PgStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = PgStore::global();
/// let user = login_user(&store, "admin@example.com", "Henna#2025").await?;
///
/// let claims = Claims::new(user.id.clone(), user.email.clone(), Duration::hours(24));
/// let token = create_token(&claims, "a-secret-key-of-at-least-32-bytes!!")?;
/// let response = AuthResponse::logged_in(token, user);
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod password;
pub mod service;
