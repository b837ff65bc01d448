use crate::domain::values::transaction_type::TransactionType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One immutable row in the append-only XP ledger. Never mutated or deleted;
/// corrections are new ADJUSTMENT entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// System-assigned, unused for business logic.
    pub id: String,
    pub user_id: String,
    /// Signed: positive = earn, negative = spend/adjustment.
    pub amount: i64,
    pub transaction_type: TransactionType,
    /// Caller-supplied idempotency key, globally unique.
    pub reference_id: String,
    pub created_at: DateTime<Utc>,
    /// Optional snapshot of the triggering event (e.g. offer data at claim
    /// time).
    pub metadata: Option<serde_json::Value>,
}

impl LedgerEntry {
    pub fn new(
        user_id: String,
        amount: i64,
        transaction_type: TransactionType,
        reference_id: String,
        metadata: Option<serde_json::Value>,
        created_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id,
            amount,
            transaction_type,
            reference_id,
            created_at: created_at.unwrap_or_else(Utc::now),
            metadata,
        }
    }
}
