use crate::domain::listing::{ProviderProfile, ServiceListing};
use anyhow::Result;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Opaque reads over the catalog tables; no payment logic lives here.
#[derive(Clone)]
pub struct ListingsRepo {
    pub pool: PgPool,
}

impl ListingsRepo {
    pub async fn list_active(&self) -> Result<Vec<ServiceListing>> {
        let rows = sqlx::query(
            r#"
            SELECT listing_id, provider_id, title, price_minor, currency
            FROM service_listings
            WHERE is_active = true
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| ServiceListing {
                listing_id: r.get("listing_id"),
                provider_id: r.get("provider_id"),
                title: r.get("title"),
                price_minor: r.get("price_minor"),
                currency: r.get("currency"),
            })
            .collect())
    }

    pub async fn get_provider_profile(&self, provider_id: Uuid) -> Result<Option<ProviderProfile>> {
        let row = sqlx::query(
            "SELECT provider_id, display_name, email, country FROM provider_profiles WHERE provider_id = $1",
        )
        .bind(provider_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| ProviderProfile {
            provider_id: r.get("provider_id"),
            display_name: r.get("display_name"),
            email: r.get("email"),
            country: r.get("country"),
        }))
    }
}
