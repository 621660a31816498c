/// Lead model and database operations
///
/// Leads are written by the public contact form and only ever read back from
/// the admin side, so there is no update or delete path.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE leads (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name TEXT NOT NULL,
///     email TEXT NOT NULL,
///     phone TEXT NOT NULL,
///     service TEXT,
///     message TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use super::to_iso8601;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

const LEAD_COLUMNS: &str = "id, name, email, phone, service, message, created_at";

/// Normalized lead record returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,

    /// Free-text service the visitor asked about (e.g. "bridal mehndi")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,

    pub message: String,
    pub created_at: String,
}

/// Lead row as stored in PostgreSQL
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LeadRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<LeadRow> for Lead {
    fn from(row: LeadRow) -> Self {
        Self {
            id: row.id.to_string(),
            name: row.name,
            email: row.email,
            phone: row.phone,
            service: row.service,
            message: row.message,
            created_at: to_iso8601(&row.created_at),
        }
    }
}

/// Contact-form submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreateLead {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,

    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

impl LeadRow {
    /// Lists every lead, newest first
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let query = format!("SELECT {} FROM leads ORDER BY created_at DESC", LEAD_COLUMNS);

        sqlx::query_as::<_, LeadRow>(&query).fetch_all(pool).await
    }

    /// Inserts a lead; the database assigns `id` and `created_at`
    pub async fn insert(pool: &PgPool, data: &CreateLead) -> Result<Self, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO leads (name, email, phone, service, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            LEAD_COLUMNS
        );

        sqlx::query_as::<_, LeadRow>(&query)
            .bind(&data.name)
            .bind(&data.email)
            .bind(&data.phone)
            .bind(&data.service)
            .bind(&data.message)
            .fetch_one(pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact_form() -> CreateLead {
        CreateLead {
            name: "Priya".to_string(),
            email: "priya@example.com".to_string(),
            phone: "+44 7700 900123".to_string(),
            service: Some("Bridal mehndi".to_string()),
            message: "Looking for a booking in June".to_string(),
        }
    }

    #[test]
    fn test_row_normalizes_to_plain_record() {
        let row = LeadRow {
            id: Uuid::new_v4(),
            name: "Priya".to_string(),
            email: "priya@example.com".to_string(),
            phone: "123".to_string(),
            service: None,
            message: "Hello".to_string(),
            created_at: Utc::now(),
        };
        let id = row.id;

        let lead = Lead::from(row);
        assert_eq!(lead.id, id.to_string());
        assert!(lead.service.is_none());
        assert!(DateTime::parse_from_rfc3339(&lead.created_at).is_ok());
    }

    #[test]
    fn test_create_lead_validation() {
        assert!(contact_form().validate().is_ok());

        let bad_email = CreateLead {
            email: "not-an-email".to_string(),
            ..contact_form()
        };
        assert!(bad_email.validate().is_err());

        let no_message = CreateLead {
            message: String::new(),
            ..contact_form()
        };
        assert!(no_message.validate().is_err());
    }

    #[test]
    fn test_service_is_optional_in_json() {
        let lead: CreateLead = serde_json::from_str(
            r#"{"name":"A","email":"a@example.com","phone":"1","message":"hi"}"#,
        )
        .unwrap();
        assert!(lead.service.is_none());
    }
}
