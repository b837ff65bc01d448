use crate::domain::entities::offer::Offer;
use crate::domain::values::rarity::Rarity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Durable record of a claimed offer. Outlives the cache entry it came from,
/// which is what keeps the history rail and collection value stable after an
/// offer stops being reported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub user_id: String,
    pub canonical_id: String,
    pub title: String,
    pub source: String,
    pub store_url: String,
    pub cover_image_url: String,
    pub rarity: Rarity,
    /// Nominal value captured at claim time.
    pub savings: f64,
    pub claimed_at: DateTime<Utc>,
}

impl ClaimRecord {
    pub fn from_offer(user_id: &str, offer: &Offer) -> Self {
        Self {
            user_id: user_id.to_string(),
            canonical_id: offer.canonical_id.clone(),
            title: offer.title.clone(),
            source: offer.source.clone(),
            store_url: offer.store_url.clone(),
            cover_image_url: offer.image_url.clone(),
            rarity: offer.rarity,
            savings: offer.original_price,
            claimed_at: Utc::now(),
        }
    }
}
