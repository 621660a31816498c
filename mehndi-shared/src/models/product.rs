/// Product model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE products (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name TEXT NOT NULL CHECK (length(name) > 0),
///     description TEXT NOT NULL,
///     price DOUBLE PRECISION NOT NULL CHECK (price >= 0),
///     image_url TEXT,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use super::{deserialize_some, to_iso8601};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

const PRODUCT_COLUMNS: &str = "id, name, description, price, image_url, created_at";

/// Normalized product record returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned id, as a string
    pub id: String,

    pub name: String,

    pub description: String,

    /// Non-negative price
    pub price: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// ISO-8601 creation timestamp
    pub created_at: String,
}

/// Product row as stored in PostgreSQL
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id.to_string(),
            name: row.name,
            description: row.description,
            price: row.price,
            image_url: row.image_url,
            created_at: to_iso8601(&row.created_at),
        }
    }
}

/// Input for creating a product
///
/// `id` and `created_at` are never accepted from the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreateProduct {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,

    pub description: String,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Partial update for a product
///
/// Only fields that are `Some` are written. `image_url` distinguishes an
/// absent field (leave unchanged) from an explicit `null` (clear it).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct UpdateProduct {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: Option<f64>,

    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<Option<String>>,
}

impl UpdateProduct {
    /// True when no field would be changed
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.image_url.is_none()
    }

    /// Applies the supplied fields to a row, leaving the rest untouched
    pub fn apply(&self, row: &mut ProductRow) {
        if let Some(name) = &self.name {
            row.name = name.clone();
        }
        if let Some(description) = &self.description {
            row.description = description.clone();
        }
        if let Some(price) = self.price {
            row.price = price;
        }
        if let Some(image_url) = &self.image_url {
            row.image_url = image_url.clone();
        }
    }
}

/// Confirmation returned after a product is deleted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedProduct {
    pub id: String,
    pub name: String,
}

impl ProductRow {
    /// Lists every product, newest first
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM products ORDER BY created_at DESC",
            PRODUCT_COLUMNS
        );

        sqlx::query_as::<_, ProductRow>(&query).fetch_all(pool).await
    }

    /// Finds a product by id
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let query = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);

        sqlx::query_as::<_, ProductRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Inserts a product; the database assigns `id` and `created_at`
    pub async fn insert(pool: &PgPool, data: &CreateProduct) -> Result<Self, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO products (name, description, price, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        );

        sqlx::query_as::<_, ProductRow>(&query)
            .bind(&data.name)
            .bind(&data.description)
            .bind(data.price)
            .bind(&data.image_url)
            .fetch_one(pool)
            .await
    }

    /// Updates only the supplied fields
    ///
    /// Returns `None` if no product has this id. An empty update reads the
    /// current row back unchanged.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: &UpdateProduct,
    ) -> Result<Option<Self>, sqlx::Error> {
        if data.is_empty() {
            return Self::find_by_id(pool, id).await;
        }

        // Build dynamic update query based on which fields are present
        let mut assignments = Vec::new();
        let mut bind_count = 1;

        if data.name.is_some() {
            bind_count += 1;
            assignments.push(format!("name = ${}", bind_count));
        }
        if data.description.is_some() {
            bind_count += 1;
            assignments.push(format!("description = ${}", bind_count));
        }
        if data.price.is_some() {
            bind_count += 1;
            assignments.push(format!("price = ${}", bind_count));
        }
        if data.image_url.is_some() {
            bind_count += 1;
            assignments.push(format!("image_url = ${}", bind_count));
        }

        let query = format!(
            "UPDATE products SET {} WHERE id = $1 RETURNING {}",
            assignments.join(", "),
            PRODUCT_COLUMNS
        );

        let mut q = sqlx::query_as::<_, ProductRow>(&query).bind(id);

        if let Some(name) = &data.name {
            q = q.bind(name);
        }
        if let Some(description) = &data.description {
            q = q.bind(description);
        }
        if let Some(price) = data.price {
            q = q.bind(price);
        }
        if let Some(image_url) = &data.image_url {
            q = q.bind(image_url);
        }

        q.fetch_optional(pool).await
    }

    /// Deletes a product, returning its id and name if it existed
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<Option<DeletedProduct>, sqlx::Error> {
        let deleted: Option<(Uuid, String)> =
            sqlx::query_as("DELETE FROM products WHERE id = $1 RETURNING id, name")
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(deleted.map(|(id, name)| DeletedProduct {
            id: id.to_string(),
            name,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> ProductRow {
        ProductRow {
            id: Uuid::new_v4(),
            name: "Henna Cone".to_string(),
            description: "Natural henna paste".to_string(),
            price: 18.99,
            image_url: Some("https://cdn.example.com/cone.jpg".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_normalizes_to_plain_record() {
        let row = sample_row();
        let id = row.id;
        let product = Product::from(row);

        assert_eq!(product.id, id.to_string());
        assert_eq!(product.price, 18.99);
        assert!(product.created_at.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(&product.created_at).is_ok());
    }

    #[test]
    fn test_update_default_is_empty() {
        assert!(UpdateProduct::default().is_empty());
    }

    #[test]
    fn test_update_applies_only_supplied_fields() {
        let mut row = sample_row();
        let before = row.clone();

        UpdateProduct {
            price: Some(25.0),
            ..Default::default()
        }
        .apply(&mut row);

        assert_eq!(row.price, 25.0);
        assert_eq!(row.name, before.name);
        assert_eq!(row.description, before.description);
        assert_eq!(row.image_url, before.image_url);
        assert_eq!(row.created_at, before.created_at);
    }

    #[test]
    fn test_update_image_url_absent_vs_null() {
        let absent: UpdateProduct = serde_json::from_str(r#"{"price": 5}"#).unwrap();
        assert_eq!(absent.image_url, None);

        let cleared: UpdateProduct = serde_json::from_str(r#"{"image_url": null}"#).unwrap();
        assert_eq!(cleared.image_url, Some(None));

        let mut row = sample_row();
        cleared.apply(&mut row);
        assert!(row.image_url.is_none());
    }

    #[test]
    fn test_create_product_validation() {
        let valid = CreateProduct {
            name: "Nail Art Kit".to_string(),
            description: "Brushes and gems".to_string(),
            price: 0.0,
            image_url: None,
        };
        assert!(valid.validate().is_ok());

        let negative = CreateProduct {
            price: -1.0,
            ..valid.clone()
        };
        assert!(negative.validate().is_err());

        let unnamed = CreateProduct {
            name: String::new(),
            ..valid
        };
        assert!(unnamed.validate().is_err());
    }

    #[test]
    fn test_product_without_image_omits_field() {
        let mut row = sample_row();
        row.image_url = None;

        let json = serde_json::to_value(Product::from(row)).unwrap();
        assert!(json.get("image_url").is_none());
    }
}
