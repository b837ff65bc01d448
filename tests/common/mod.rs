//! Shared test helpers.

use async_trait::async_trait;
use lootradar::domain::entities::offer::RawOffer;
use lootradar::infrastructure::miners::{Miner, MinerError};
use lootradar::LootRadar;
use std::sync::Arc;

/// Miner stub returning a fixed batch, or failing on demand.
pub struct StubMiner {
    name: String,
    offers: Vec<RawOffer>,
    fail: bool,
}

impl StubMiner {
    pub fn returning(name: &str, offers: Vec<RawOffer>) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            offers,
            fail: false,
        })
    }

    pub fn failing(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            offers: vec![],
            fail: true,
        })
    }
}

#[async_trait]
impl Miner for StubMiner {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<Vec<RawOffer>, MinerError> {
        if self.fail {
            return Err(MinerError::Network("connection refused".into()));
        }
        Ok(self.offers.clone())
    }
}

pub fn setup(miners: Vec<Arc<dyn Miner>>) -> LootRadar {
    LootRadar::with_miners(":memory:", miners).unwrap()
}

/// A free-now offer with sensible defaults; tests tweak fields as needed.
pub fn raw_offer(title: &str, source: &str, external_id: &str) -> RawOffer {
    RawOffer {
        title: title.to_string(),
        original_price: 9.99,
        discount_price: 0.0,
        image_url: String::new(),
        store_url: format!("https://store.example/{external_id}"),
        source: source.to_string(),
        external_id: Some(external_id.to_string()),
        end_time: None,
        rarity: None,
    }
}
