use crate::domain::values::canonical_id;
use crate::domain::values::end_time::EndTime;
use crate::domain::values::rarity::Rarity;
use serde::{Deserialize, Serialize};

/// An offer as reported by a miner, before identity resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawOffer {
    pub title: String,
    pub original_price: f64,
    pub discount_price: f64,
    pub image_url: String,
    pub store_url: String,
    pub source: String,
    /// Source-native id. Records without one cannot be stably deduplicated
    /// and are dropped on ingest.
    pub external_id: Option<String>,
    pub end_time: Option<EndTime>,
    pub rarity: Option<Rarity>,
}

/// A currently known offer, keyed by its canonical id. Lives only in the
/// in-memory cache; durability of "this was ever offered" comes from the
/// claim history and ledger rows written when a user opens it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    /// `claim:{source}:{external_id}`, immutable once assigned.
    pub canonical_id: String,
    pub source: String,
    pub external_id: String,
    pub title: String,
    pub original_price: f64,
    pub discount_price: f64,
    pub image_url: String,
    pub store_url: String,
    pub end_time: Option<EndTime>,
    pub rarity: Rarity,
}

impl Offer {
    /// Resolve a raw record into a canonical offer. `None` when the record
    /// has no external id.
    pub fn from_raw(raw: RawOffer) -> Option<Self> {
        let external_id = raw.external_id.filter(|id| !id.trim().is_empty())?;
        let rarity = raw
            .rarity
            .unwrap_or_else(|| Rarity::from_price(raw.original_price));
        Some(Self {
            canonical_id: canonical_id::claim_id(&raw.source, &external_id),
            source: raw.source,
            external_id,
            title: raw.title,
            original_price: raw.original_price,
            discount_price: raw.discount_price,
            image_url: raw.image_url,
            store_url: raw.store_url,
            end_time: raw.end_time,
            rarity,
        })
    }

    pub fn is_free_now(&self) -> bool {
        self.discount_price == 0.0
    }

    /// Mystery offers are routed to their own rail and cannot be opened
    /// directly.
    pub fn is_mystery(&self) -> bool {
        self.title.to_lowercase().contains("mystery")
    }
}
