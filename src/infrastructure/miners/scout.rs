use super::{politeness_delay, Miner, MinerError, USER_AGENT};
use crate::domain::entities::offer::RawOffer;
use crate::domain::values::rarity::Rarity;
use async_trait::async_trait;
use std::time::Duration;

/// Community-signal miner watching r/FreeGameFindings for 100%-off finds.
/// The listing endpoint gives no prices, so values are estimated per
/// platform; the cleaned outbound URL doubles as the stable external id.
pub struct ScoutMiner {
    listing_url: String,
    client: reqwest::Client,
}

/// Base-game-only policy: anything matching these never enters the cache.
const BLOCKLIST: &[&str] = &[
    "DLC",
    "SOUNDTRACK",
    "ARTBOOK",
    "WALLPAPER",
    "DEMO",
    "BETA",
    "ALPHA",
    "RESTOCKED",
    "EXPIRED",
];

impl ScoutMiner {
    pub fn new() -> Self {
        Self {
            listing_url: "https://www.reddit.com/r/FreeGameFindings/new.json?limit=50".into(),
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
        }
    }
}

impl Default for ScoutMiner {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, serde::Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, serde::Deserialize)]
struct ListingData {
    children: Vec<Post>,
}

#[derive(Debug, serde::Deserialize)]
struct Post {
    data: PostData,
}

#[derive(Debug, serde::Deserialize)]
struct PostData {
    title: String,
    /// Outbound link for link posts.
    #[serde(default)]
    url: String,
    #[serde(default)]
    thumbnail: String,
}

fn is_garbage(title: &str) -> bool {
    let upper = title.to_uppercase();
    BLOCKLIST.iter().any(|k| upper.contains(k))
}

/// Posts lead with a bracketed platform tag: "[Steam] (Game) Pizza Possum - Free".
fn platform_tag(title: &str) -> Option<&str> {
    let start = title.find('[')?;
    let end = title[start..].find(']')? + start;
    Some(title[start + 1..end].trim())
}

fn normalize_platform(raw: &str) -> Option<&'static str> {
    let lower = raw.to_lowercase();
    if lower.contains("steam") {
        Some("Steam")
    } else if lower.contains("epic") {
        Some("Epic Games")
    } else if lower.contains("gog") {
        Some("GOG")
    } else if lower.contains("itch") {
        Some("Itch.io")
    } else {
        None
    }
}

/// Listing posts carry no price; estimate from platform averages.
fn estimate_value(platform: &str) -> f64 {
    match platform {
        "Steam" => 14.99,
        "Epic Games" => 19.99,
        "GOG" => 9.99,
        _ => 4.99,
    }
}

fn strip_parenthetical(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut depth = 0usize;
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

/// Reduce "[Steam] (Game) Pizza Possum - Free" to "Pizza Possum".
fn clean_title(title: &str, raw_platform: &str) -> String {
    let without_tag = title.replacen(&format!("[{raw_platform}]"), "", 1);
    let without_parens = strip_parenthetical(&without_tag);
    let mut cleaned = without_parens.as_str();
    for sep in ["-", "–", "100%", "Free"] {
        if let Some(idx) = cleaned.find(sep) {
            cleaned = &cleaned[..idx];
        }
    }
    cleaned.trim().to_string()
}

/// Stable dedup key: the outbound URL minus query, fragment and trailing
/// slash, so reposts of the same deal collapse to one id.
fn clean_url_key(url: &str) -> String {
    let base = url.split(['?', '#']).next().unwrap_or(url);
    base.trim_end_matches('/').to_string()
}

impl PostData {
    fn into_raw(self) -> Option<RawOffer> {
        if is_garbage(&self.title) {
            return None;
        }
        let raw_platform = platform_tag(&self.title)?.to_string();
        let platform = normalize_platform(&raw_platform)?;

        let title = clean_title(&self.title, &raw_platform);
        if title.is_empty() || self.url.is_empty() {
            return None;
        }

        let estimated = estimate_value(platform);
        let image_url = if self.thumbnail.starts_with("http") {
            self.thumbnail
        } else {
            String::new()
        };

        Some(RawOffer {
            title,
            original_price: estimated,
            discount_price: 0.0,
            image_url,
            store_url: self.url.clone(),
            source: platform.to_string(),
            external_id: Some(clean_url_key(&self.url)),
            end_time: None,
            rarity: Some(if estimated > 15.0 {
                Rarity::Rare
            } else {
                Rarity::Common
            }),
        })
    }
}

#[async_trait]
impl Miner for ScoutMiner {
    fn name(&self) -> &str {
        "scout_signal"
    }

    async fn fetch(&self) -> Result<Vec<RawOffer>, MinerError> {
        politeness_delay().await;

        let resp = self
            .client
            .get(&self.listing_url)
            .send()
            .await
            .map_err(|e| MinerError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(MinerError::Network(format!(
                "Listing returned {}",
                resp.status()
            )));
        }

        let listing: Listing = resp
            .json()
            .await
            .map_err(|e| MinerError::Parse(e.to_string()))?;

        Ok(listing
            .data
            .children
            .into_iter()
            .filter_map(|p| p.data.into_raw())
            .collect())
    }
}
