//! Scan use case — runs every miner, resolves identities and absorbs the
//! results into the offer cache.

use crate::domain::entities::offer::Offer;
use crate::infrastructure::cache::OfferCache;
use crate::infrastructure::miners::Miner;
use serde::Serialize;
use std::sync::Arc;

/// Result of one scan cycle.
#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub scanned_at: chrono::DateTime<chrono::Utc>,
    pub sources_run: usize,
    pub sources_failed: usize,
    pub offers_cached: usize,
    /// Raw records dropped for lacking a stable external id.
    pub records_skipped: usize,
}

pub struct ScanUseCase {
    miners: Vec<Arc<dyn Miner>>,
    cache: Arc<OfferCache>,
}

impl ScanUseCase {
    pub fn new(miners: Vec<Arc<dyn Miner>>, cache: Arc<OfferCache>) -> Self {
        Self { miners, cache }
    }

    /// Run one scan cycle. Each miner runs independently; a failure is
    /// logged and contributes zero offers without aborting the cycle. The
    /// surviving batch is applied to the cache atomically.
    pub async fn execute(&self) -> ScanReport {
        let mut batch: Vec<Offer> = Vec::new();
        let mut sources_run = 0usize;
        let mut sources_failed = 0usize;
        let mut records_skipped = 0usize;

        for miner in &self.miners {
            match miner.fetch().await {
                Ok(raws) => {
                    sources_run += 1;
                    for raw in raws {
                        match Offer::from_raw(raw) {
                            Some(offer) => batch.push(offer),
                            None => records_skipped += 1,
                        }
                    }
                }
                Err(e) => {
                    sources_failed += 1;
                    eprintln!("WARNING: Miner '{}' failed: {}", miner.name(), e);
                }
            }
        }

        let offers_cached = batch.len();
        self.cache.absorb(batch);

        ScanReport {
            scanned_at: chrono::Utc::now(),
            sources_run,
            sources_failed,
            offers_cached,
            records_skipped,
        }
    }
}
