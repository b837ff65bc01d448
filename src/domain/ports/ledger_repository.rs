use crate::domain::entities::ledger_entry::LedgerEntry;
use crate::domain::error::DomainError;
use chrono::{DateTime, Utc};

/// Outcome of an `add_transaction` attempt. `Skipped` is the designed
/// idempotency path, not an error: the reference id was already committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxOutcome {
    Recorded { entry_id: String },
    Skipped,
}

pub trait LedgerRepository: Send + Sync {
    /// Atomic insert keyed uniquely by `entry.reference_id`. Any number of
    /// callers may race on the same reference; exactly one commits, the rest
    /// observe `Skipped`. All other storage errors propagate.
    fn add_transaction(&self, entry: &LedgerEntry) -> Result<TxOutcome, DomainError>;

    /// Σ amount over committed entries.
    fn get_balance(&self, user_id: &str) -> Result<i64, DomainError>;

    /// Σ amount where amount > 0 and type ∈ {EARN, BONUS, ADJUSTMENT}.
    fn get_lifetime_earned(&self, user_id: &str) -> Result<i64, DomainError>;

    /// Timestamp of the most recent earning activity (positive EARN/BONUS).
    fn get_last_earn_timestamp(&self, user_id: &str)
        -> Result<Option<DateTime<Utc>>, DomainError>;
}
