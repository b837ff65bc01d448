//! Claim orchestration.
//!
//! Three independently idempotent effects — history record, interaction
//! mark, ledger credit — each keyed so that re-running the whole operation
//! after a crash between steps is always safe. No cross-effect transaction
//! is needed or attempted.

use crate::domain::entities::claim_record::ClaimRecord;
use crate::domain::entities::ledger_entry::LedgerEntry;
use crate::domain::error::DomainError;
use crate::domain::ports::claim_history_repository::ClaimHistoryRepository;
use crate::domain::ports::interaction_repository::InteractionRepository;
use crate::domain::ports::ledger_repository::LedgerRepository;
use crate::domain::values::transaction_type::TransactionType;
use crate::infrastructure::cache::OfferCache;
use std::sync::Arc;

/// XP minted per claimed offer.
pub const CLAIM_XP: i64 = 100;

pub struct ClaimUseCase {
    cache: Arc<OfferCache>,
    interactions: Arc<dyn InteractionRepository>,
    history: Arc<dyn ClaimHistoryRepository>,
    ledger: Arc<dyn LedgerRepository>,
}

impl ClaimUseCase {
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

    /// Open an offer for a user. Returns `true` when it was already opened
    /// (terminal no-op), `false` when the claim was freshly committed.
    pub fn execute(&self, user_id: &str, offer_id: &str) -> Result<bool, DomainError> {
        if self.interactions.has_opened(user_id, offer_id)? {
            return Ok(true);
        }

        let offer = self
            .cache
            .get(offer_id)
            .ok_or_else(|| DomainError::NotFound(format!("Offer lost from cache: {offer_id}")))?;

        if offer.is_mystery() {
            return Err(DomainError::Conflict(
                "Mystery offers cannot be opened directly".into(),
            ));
        }
        if offer.store_url.trim().is_empty() {
            return Err(DomainError::Unprocessable(
                "Offer has no store URL".into(),
            ));
        }

        // Effect 1: durable claim history, keyed by (user, canonical id).
        self.history.record(&ClaimRecord::from_offer(user_id, &offer))?;

        // Effect 2: interaction state, keyed by (user, offer id).
        self.interactions.mark_opened(user_id, offer_id)?;

        // Effect 3: XP credit. The reference pairs the user with the
        // canonical claim id, so a retry after a partial failure can only be
        // Skipped for that user, while other users earn their own credit.
        let entry = LedgerEntry::new(
            user_id.to_string(),
            CLAIM_XP,
            TransactionType::Earn,
            format!("{}:{}", user_id, offer.canonical_id),
            Some(serde_json::json!({
                "title": offer.title,
                "source": offer.source,
                "savings": offer.original_price,
            })),
            None,
        );
        self.ledger.add_transaction(&entry)?;

        Ok(false)
    }
}
