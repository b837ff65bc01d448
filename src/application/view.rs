//! Classification & ranking engine.
//!
//! A pure function from {cache snapshot, opened set, claim history, player
//! stats} to the read view: hero summary plus the fixed set of named rails.
//! No I/O happens here; the thin `ViewUseCase` wrapper gathers the inputs
//! and recomputes the whole view on every read.

use crate::domain::entities::claim_record::ClaimRecord;
use crate::domain::entities::offer::Offer;
use crate::domain::error::DomainError;
use crate::domain::ports::claim_history_repository::ClaimHistoryRepository;
use crate::domain::ports::interaction_repository::InteractionRepository;
use crate::domain::ports::ledger_repository::LedgerRepository;
use crate::domain::values::end_time::remaining_hours;
use crate::domain::values::platform::Platform;
use crate::domain::values::progression::{age_text, level_title, PlayerStats};
use crate::infrastructure::cache::OfferCache;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

/// Remaining-hours threshold under which an offer counts as urgent.
const URGENT_HOURS: f64 = 24.0;

#[derive(Debug, Serialize)]
pub struct ReadView {
    pub hero: HeroState,
    pub rails: Vec<Rail>,
    pub scout: ScoutState,
}

#[derive(Debug, Serialize)]
pub struct HeroState {
    /// Cumulative value of everything ever claimed; sourced from history,
    /// not the live cache, because history outlives cache entries.
    pub collection_value: f64,
    pub level: u32,
    pub level_title: String,
    pub streak: String,
}

#[derive(Debug, Serialize)]
pub struct Rail {
    pub id: String,
    pub title: String,
    pub cards: Vec<Card>,
    pub empty_message: String,
}

#[derive(Debug, Serialize)]
pub struct Card {
    pub id: String,
    pub title: String,
    pub platform: String,
    pub cover_image_url: String,
    /// Stable per-title hue for the art fallback gradient.
    pub fallback_hue: u32,
    pub original_price: f64,
    pub is_free_now: bool,
    pub end_time_rel: Option<String>,
    pub rating: String,
    pub offer_type: String,
    pub url: String,
    pub opened: bool,
}

#[derive(Debug, Serialize)]
pub struct ScoutState {
    pub status: String,
    pub last_discovery_age: String,
}

fn fallback_hue(title: &str) -> u32 {
    title.chars().map(|c| c as u32).sum::<u32>() % 360
}

fn card_from_offer(offer: &Offer) -> Card {
    Card {
        id: offer.canonical_id.clone(),
        title: offer.title.clone(),
        platform: offer.source.clone(),
        cover_image_url: offer.image_url.clone(),
        fallback_hue: fallback_hue(&offer.title),
        original_price: offer.original_price,
        is_free_now: offer.is_free_now(),
        end_time_rel: offer.end_time.as_ref().map(|e| e.to_string()),
        rating: offer.rarity.to_string(),
        offer_type: if offer.is_mystery() {
            "Mystery".into()
        } else {
            "BaseGame".into()
        },
        url: offer.store_url.clone(),
        opened: false,
    }
}

fn card_from_record(record: &ClaimRecord) -> Card {
    Card {
        id: record.canonical_id.clone(),
        title: record.title.clone(),
        platform: record.source.clone(),
        cover_image_url: record.cover_image_url.clone(),
        fallback_hue: fallback_hue(&record.title),
        original_price: record.savings,
        is_free_now: true,
        end_time_rel: None,
        rating: record.rarity.to_string(),
        offer_type: "BaseGame".into(),
        url: record.store_url.clone(),
        opened: true,
    }
}

/// Canonical in-rail ordering: free-now offers first, then soonest-ending
/// among the free ones (paid offers sort as if never ending), then highest
/// nominal value, then title as a stable tie-break.
fn sort_bucket(bucket: &mut [(Offer, f64)]) {
    bucket.sort_by(|(a, a_hours), (b, b_hours)| {
        let a_free = a.is_free_now();
        let b_free = b.is_free_now();
        let a_end = if a_free { *a_hours } else { f64::INFINITY };
        let b_end = if b_free { *b_hours } else { f64::INFINITY };
        (!a_free)
            .cmp(&!b_free)
            .then(a_end.total_cmp(&b_end))
            .then(b.original_price.total_cmp(&a.original_price))
            .then_with(|| a.title.cmp(&b.title))
    });
}

fn rail(id: &str, title: &str, cards: Vec<Card>, empty_message: &str) -> Rail {
    Rail {
        id: id.into(),
        title: title.into(),
        cards,
        empty_message: empty_message.into(),
    }
}

/// Build the full read view. Pure: all inputs are snapshots.
pub fn build_view(
    offers: Vec<Offer>,
    opened: &HashSet<String>,
    history: &[ClaimRecord],
    stats: &PlayerStats,
    last_scan_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> ReadView {
    let mut hero: Vec<(Offer, f64)> = Vec::new();
    let mut steam: Vec<(Offer, f64)> = Vec::new();
    let mut epic: Vec<(Offer, f64)> = Vec::new();
    let mut gog: Vec<(Offer, f64)> = Vec::new();
    let mut mystery: Vec<Offer> = Vec::new();

    for offer in offers {
        if opened.contains(&offer.canonical_id) {
            continue;
        }
        // Mystery offers are routed to their own rail only.
        if offer.is_mystery() {
            mystery.push(offer);
            continue;
        }

        let hours = remaining_hours(offer.end_time.as_ref(), now);

        match Platform::from_source(&offer.source) {
            Platform::Steam => steam.push((offer.clone(), hours)),
            Platform::Epic => epic.push((offer.clone(), hours)),
            Platform::Gog => gog.push((offer.clone(), hours)),
            // Not rail-worthy, but still hero-eligible below.
            Platform::Other => {}
        }

        if offer.is_free_now() || hours <= URGENT_HOURS {
            hero.push((offer, hours));
        }
    }

    sort_bucket(&mut hero);
    sort_bucket(&mut steam);
    sort_bucket(&mut epic);
    sort_bucket(&mut gog);
    // Mystery rail keeps arrival order.

    // History rail: newest claim first, every card flagged opened.
    let mut history_cards: Vec<Card> = history.iter().map(card_from_record).collect();
    history_cards.reverse();

    let to_cards = |bucket: Vec<(Offer, f64)>| -> Vec<Card> {
        bucket.iter().map(|(o, _)| card_from_offer(o)).collect()
    };

    let rails = vec![
        rail(
            "hero_miss",
            "You Don't Want to Miss",
            to_cards(hero),
            "No urgent deals found.",
        ),
        rail(
            "steam",
            &Platform::Steam.to_string(),
            to_cards(steam),
            "No offers on Steam right now.",
        ),
        rail(
            "epic",
            &Platform::Epic.to_string(),
            to_cards(epic),
            "No offers on Epic Games right now.",
        ),
        rail(
            "gog",
            &Platform::Gog.to_string(),
            to_cards(gog),
            "No offers on GOG right now.",
        ),
        rail(
            "mystery",
            "Mystery Loot",
            mystery.iter().map(card_from_offer).collect(),
            "The vault is empty.",
        ),
        rail(
            "history",
            "History / Collected",
            history_cards,
            "Your collection is empty.",
        ),
    ];

    let collection_value: f64 = history.iter().map(|r| r.savings).sum();

    ReadView {
        hero: HeroState {
            collection_value: (collection_value * 100.0).round() / 100.0,
            level: stats.level,
            level_title: level_title(stats.level).to_string(),
            streak: stats.streak.message.clone(),
        },
        rails,
        scout: ScoutState {
            status: if last_scan_at.is_some() {
                "watching".into()
            } else {
                "idle".into()
            },
            last_discovery_age: last_scan_at
                .map(|at| age_text(at, now))
                .unwrap_or_else(|| "Never".into()),
        },
    }
}

pub struct ViewUseCase {
    cache: Arc<OfferCache>,
    interactions: Arc<dyn InteractionRepository>,
    history: Arc<dyn ClaimHistoryRepository>,
    ledger: Arc<dyn LedgerRepository>,
}

impl ViewUseCase {
    pub fn new(
        cache: Arc<OfferCache>,
        interactions: Arc<dyn InteractionRepository>,
        history: Arc<dyn ClaimHistoryRepository>,
        ledger: Arc<dyn LedgerRepository>,
    ) -> Self {
        Self {
            cache,
            interactions,
            history,
            ledger,
        }
    }

    pub fn execute(&self, user_id: &str) -> Result<ReadView, DomainError> {
        let opened = self.interactions.get_opened_set(user_id)?;
        let history = self.history.list(user_id)?;
        let stats = super::stats::derive_player_stats(self.ledger.as_ref(), user_id)?;
        Ok(build_view(
            self.cache.snapshot(),
            &opened,
            &history,
            &stats,
            self.cache.last_scan_at(),
            Utc::now(),
        ))
    }
}
