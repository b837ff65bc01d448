use crate::domain::entities::claim_record::ClaimRecord;
use crate::domain::error::DomainError;

pub trait ClaimHistoryRepository: Send + Sync {
    /// Insert keyed by `(user_id, canonical_id)`. Returns `false` when the
    /// claim was already recorded; repeats never duplicate.
    fn record(&self, record: &ClaimRecord) -> Result<bool, DomainError>;

    /// All claims for a user, oldest first.
    fn list(&self, user_id: &str) -> Result<Vec<ClaimRecord>, DomainError>;
}
