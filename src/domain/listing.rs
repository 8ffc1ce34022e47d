use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct ServiceListing {
    pub listing_id: Uuid,
    pub provider_id: Uuid,
    pub title: String,
    pub price_minor: i64,
    pub currency: String,
}

#[derive(Debug, Clone)]
pub struct ProviderProfile {
    pub provider_id: Uuid,
    pub display_name: String,
    pub email: String,
    pub country: String,
}
