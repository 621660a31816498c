/// Entity schemas
///
/// Each entity comes in two shapes:
///
/// - a **row** type (`ProductRow`, `LeadRow`, `UserRow`) holding the store's
///   native `Uuid` id and `DateTime<Utc>` timestamp, plus the SQL that reads
///   and writes it;
/// - a plain **record** type (`Product`, `Lead`, `User`) with a string id and
///   an ISO-8601 `created_at`, which is all callers ever see.
///
/// The `From<Row> for Record` conversions are the normalization step.
///
/// # Models
///
/// - `product`: catalog items managed from the admin area
/// - `lead`: contact-form submissions
/// - `user`: admin accounts
///
/// # Example
///
/// ```no_run
/// use mehndi_shared::models::product::{CreateProduct, Product, ProductRow};
/// use mehndi_shared::db::pool::ConnectionManager;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = ConnectionManager::global().connect().await?;
///
/// let row = ProductRow::insert(&pool, &CreateProduct {
///     name: "Henna Cone".to_string(),
///     description: "Natural henna paste".to_string(),
///     price: 18.99,
///     image_url: None,
/// })
/// .await?;
///
/// let product = Product::from(row);
/// println!("{} created at {}", product.id, product.created_at);
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer};

pub mod lead;
pub mod product;
pub mod user;

/// Formats a store timestamp as ISO-8601 in UTC with millisecond precision
///
/// Output looks like `2025-03-01T10:15:30.123Z`.
pub fn to_iso8601(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Deserializes a present field into `Some`, so `Option<Option<T>>` can
/// tell an absent field (`None`) from an explicit `null` (`Some(None)`).
pub(crate) fn deserialize_some<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_to_iso8601_uses_millis_and_z_suffix() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 1, 10, 15, 30).unwrap();
        assert_eq!(to_iso8601(&ts), "2025-03-01T10:15:30.000Z");
    }

    #[test]
    fn test_to_iso8601_parses_back() {
        let now = Utc::now();
        let formatted = to_iso8601(&now);
        let parsed = DateTime::parse_from_rfc3339(&formatted).expect("should parse");
        assert_eq!(parsed.timestamp_millis(), now.timestamp_millis());
    }
}
