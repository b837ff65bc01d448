use crate::domain::error::DomainError;
use std::collections::HashSet;

/// Outcome of a `mark_opened` attempt. Mirrors the ledger's idempotency
/// pattern on the interaction key space instead of the economic one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    Opened,
    AlreadyOpened,
}

/// Per-user record of which canonical offer ids have been opened.
/// Presence is the sole truth for "already claimed"; rows are never updated
/// or deleted.
pub trait InteractionRepository: Send + Sync {
    /// Atomic insert keyed by `(user_id, offer_id)`; duplicates return
    /// `AlreadyOpened` without error.
    fn mark_opened(&self, user_id: &str, offer_id: &str) -> Result<MarkOutcome, DomainError>;

    fn has_opened(&self, user_id: &str, offer_id: &str) -> Result<bool, DomainError>;

    fn get_opened_set(&self, user_id: &str) -> Result<HashSet<String>, DomainError>;
}
