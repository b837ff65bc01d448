use super::{politeness_delay, Miner, MinerError, USER_AGENT};
use crate::domain::entities::offer::RawOffer;
use crate::domain::values::end_time::EndTime;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Steam storefront miner. Reads the featured-categories JSON and keeps only
/// 100%-off specials.
pub struct SteamMiner {
    api_url: String,
    client: reqwest::Client,
}

impl SteamMiner {
    pub fn new() -> Self {
        Self {
            api_url: "https://store.steampowered.com/api/featuredcategories".into(),
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
        }
    }
}

impl Default for SteamMiner {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, serde::Deserialize)]
struct FeaturedResponse {
    #[serde(default)]
    specials: Option<Specials>,
}

#[derive(Debug, serde::Deserialize)]
struct Specials {
    #[serde(default)]
    items: Vec<SpecialItem>,
}

#[derive(Debug, serde::Deserialize)]
struct SpecialItem {
    id: i64,
    name: String,
    #[serde(default)]
    discount_percent: i64,
    /// Cents.
    #[serde(default)]
    original_price: Option<i64>,
    #[serde(default)]
    large_capsule_image: Option<String>,
    /// Unix timestamp.
    #[serde(default)]
    discount_expiration: Option<i64>,
}

impl SpecialItem {
    fn into_raw(self) -> Option<RawOffer> {
        if self.discount_percent != 100 {
            return None;
        }
        let original = self.original_price.filter(|p| *p > 0)?;
        let end_time = self
            .discount_expiration
            .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
            .map(EndTime::At);

        Some(RawOffer {
            title: self.name,
            original_price: original as f64 / 100.0,
            discount_price: 0.0,
            image_url: self.large_capsule_image.unwrap_or_default(),
            store_url: format!("https://store.steampowered.com/app/{}/", self.id),
            source: "Steam".into(),
            external_id: Some(self.id.to_string()),
            end_time,
            rarity: None,
        })
    }
}

#[async_trait]
impl Miner for SteamMiner {
    fn name(&self) -> &str {
        "steam_specials"
    }

    async fn fetch(&self) -> Result<Vec<RawOffer>, MinerError> {
        politeness_delay().await;

        let resp = self
            .client
            .get(&self.api_url)
            .send()
            .await
            .map_err(|e| MinerError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(MinerError::Network(format!(
                "Steam API returned {}",
                resp.status()
            )));
        }

        let data: FeaturedResponse = resp
            .json()
            .await
            .map_err(|e| MinerError::Parse(e.to_string()))?;

        Ok(data
            .specials
            .map(|s| s.items)
            .unwrap_or_default()
            .into_iter()
            .filter_map(SpecialItem::into_raw)
            .collect())
    }
}
