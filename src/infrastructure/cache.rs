//! In-memory offer cache, shared between scan and request paths.
//!
//! The only shared mutable structure in the process. A scan builds its batch
//! off to the side and applies it under a single write lock, so readers see
//! either the pre-scan or post-scan state, never a partial batch. Entries
//! that a source stops reporting simply go stale in place; there is no
//! explicit deletion.

use crate::domain::entities::offer::Offer;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Default)]
pub struct OfferCache {
    offers: RwLock<HashMap<String, Offer>>,
    last_scan_at: RwLock<Option<DateTime<Utc>>>,
}

impl OfferCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert a whole scan batch atomically. Last write wins per canonical id.
    pub fn absorb(&self, batch: Vec<Offer>) {
        let mut offers = self.offers.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        for offer in batch {
            offers.insert(offer.canonical_id.clone(), offer);
        }
        drop(offers);
        *self.last_scan_at.write().unwrap_or_else(std::sync::PoisonError::into_inner) = Some(Utc::now());
    }

    pub fn get(&self, canonical_id: &str) -> Option<Offer> {
        self.offers
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(canonical_id)
            .cloned()
    }

    /// Point-in-time copy for the classification engine.
    pub fn snapshot(&self) -> Vec<Offer> {
        self.offers
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .values()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.offers.read().unwrap_or_else(std::sync::PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn last_scan_at(&self) -> Option<DateTime<Utc>> {
        *self.last_scan_at.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
