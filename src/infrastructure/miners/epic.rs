use super::{politeness_delay, Miner, MinerError, USER_AGENT};
use crate::domain::entities::offer::RawOffer;
use crate::domain::values::end_time::EndTime;
use crate::domain::values::rarity::Rarity;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Epic Games Store free-games miner. Reads the public promotions endpoint
/// and keeps only 100%-off deals.
pub struct EpicMiner {
    api_url: String,
    client: reqwest::Client,
}

/// Assumed nominal value for vaulted giveaways that report a zero price.
const VAULTED_ASSUMED_VALUE: f64 = 29.99;

impl EpicMiner {
    pub fn new() -> Self {
        Self {
            api_url:
                "https://store-site-backend-static.ak.epicgames.com/freeGamesPromotions".into(),
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
        }
    }

    #[cfg(test)]
    fn with_url(api_url: String) -> Self {
        let mut miner = Self::new();
        miner.api_url = api_url;
        miner
    }
}

impl Default for EpicMiner {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, serde::Deserialize)]
struct PromotionsResponse {
    data: PromotionsData,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PromotionsData {
    catalog: Catalog,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct Catalog {
    search_store: SearchStore,
}

#[derive(Debug, serde::Deserialize)]
struct SearchStore {
    elements: Vec<Element>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct Element {
    title: String,
    id: String,
    #[serde(default)]
    product_slug: Option<String>,
    #[serde(default)]
    price: Option<Price>,
    #[serde(default)]
    key_images: Vec<KeyImage>,
    #[serde(default)]
    categories: Vec<CategoryPath>,
    #[serde(default)]
    promotions: Option<Promotions>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct Price {
    total_price: TotalPrice,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct TotalPrice {
    /// Cents.
    discount_price: i64,
    /// Cents.
    original_price: i64,
}

#[derive(Debug, serde::Deserialize)]
struct KeyImage {
    url: String,
}

#[derive(Debug, serde::Deserialize)]
struct CategoryPath {
    #[serde(default)]
    path: String,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct Promotions {
    #[serde(default)]
    promotional_offers: Vec<PromotionalOfferGroup>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromotionalOfferGroup {
    #[serde(default)]
    promotional_offers: Vec<PromotionalOffer>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromotionalOffer {
    #[serde(default)]
    end_date: Option<DateTime<Utc>>,
}

impl Element {
    fn promotion_end(&self) -> Option<DateTime<Utc>> {
        self.promotions
            .as_ref()?
            .promotional_offers
            .first()?
            .promotional_offers
            .first()?
            .end_date
    }

    fn is_vaulted(&self) -> bool {
        self.categories
            .iter()
            .any(|c| c.path == "freegames/vaulted" || c.path == "freegames")
    }

    /// Vault/mystery entries carry "[]" or nothing for a slug; fall back to
    /// the generic free-games page.
    fn store_url(&self) -> String {
        let slug = match self.product_slug.as_deref() {
            Some("[]") | Some("") | None => "free-games",
            Some(s) => s,
        };
        format!("https://store.epicgames.com/p/{slug}")
    }

    fn into_raw(self) -> Option<RawOffer> {
        let price = self.price.as_ref()?;
        let discount = price.total_price.discount_price;
        let original = price.total_price.original_price;

        // Check the bill, not the tag: original > 0 with discount 0 is a
        // deal; zero-priced vaulted entries are premium giveaways with an
        // unknown sticker price.
        let (price_float, rarity) = if discount == 0 && original > 0 {
            (original as f64 / 100.0, None)
        } else if discount == 0 && original == 0 && self.is_vaulted() {
            (VAULTED_ASSUMED_VALUE, Some(Rarity::Legendary))
        } else {
            return None;
        };

        let image_url = self
            .key_images
            .first()
            .map(|k| k.url.clone())
            .unwrap_or_default();
        let end_time = self.promotion_end().map(EndTime::At);
        let store_url = self.store_url();

        Some(RawOffer {
            title: self.title,
            original_price: price_float,
            discount_price: 0.0,
            image_url,
            store_url,
            source: "Epic Games".into(),
            external_id: Some(self.id),
            end_time,
            rarity,
        })
    }
}

#[async_trait]
impl Miner for EpicMiner {
    fn name(&self) -> &str {
        "epic_free_games"
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
                "Epic API returned {}",
                resp.status()
            )));
        }

        let data: PromotionsResponse = resp
            .json()
            .await
            .map_err(|e| MinerError::Parse(e.to_string()))?;

        Ok(data
            .data
            .catalog
            .search_store
            .elements
            .into_iter()
            .filter_map(Element::into_raw)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(json: serde_json::Value) -> Element {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_standard_deal_converts_cents() {
        let raw = element(serde_json::json!({
            "title": "Pizza Possum",
            "id": "abc123",
            "productSlug": "pizza-possum",
            "price": {"totalPrice": {"discountPrice": 0, "originalPrice": 1999}},
            "keyImages": [{"url": "https://img.example/p.jpg"}],
        }))
        .into_raw()
        .unwrap();
        assert_eq!(raw.original_price, 19.99);
        assert_eq!(raw.external_id.as_deref(), Some("abc123"));
        assert_eq!(raw.store_url, "https://store.epicgames.com/p/pizza-possum");
    }

    #[test]
    fn test_paid_entries_are_dropped() {
        let result = element(serde_json::json!({
            "title": "Full Price Game",
            "id": "x",
            "price": {"totalPrice": {"discountPrice": 1999, "originalPrice": 1999}},
        }))
        .into_raw();
        assert!(result.is_none());
    }

    #[test]
    fn test_vaulted_zero_price_assumes_legendary() {
        let raw = element(serde_json::json!({
            "title": "Vault Game",
            "id": "v1",
            "productSlug": "[]",
            "price": {"totalPrice": {"discountPrice": 0, "originalPrice": 0}},
            "categories": [{"path": "freegames/vaulted"}],
        }))
        .into_raw()
        .unwrap();
        assert_eq!(raw.rarity, Some(Rarity::Legendary));
        assert_eq!(raw.original_price, VAULTED_ASSUMED_VALUE);
        assert_eq!(raw.store_url, "https://store.epicgames.com/p/free-games");
    }

    #[test]
    fn test_unreachable_url_is_network_error() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let miner = EpicMiner::with_url("http://127.0.0.1:9/promos".into());
        let result = rt.block_on(miner.fetch());
        assert!(matches!(result, Err(MinerError::Network(_))));
    }
}
