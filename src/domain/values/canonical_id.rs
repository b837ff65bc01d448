//! Canonical reference id generation.
//!
//! Single source of truth for the dedup/idempotency key space. The claim id
//! produced here keys the offer cache, the interaction store, the claim
//! history, and (paired with the user id) the ledger `reference_id` for
//! claim credits, which is what makes claim crediting idempotent per user.

/// Canonical id for a game claim: `claim:{source}:{external_id}`.
///
/// Inputs are trimmed and lowercased, so `("Steam", "Game123")` and
/// `(" steam ", " game123 ")` collapse to the same id.
pub fn claim_id(source: &str, external_id: &str) -> String {
    format!(
        "claim:{}:{}",
        source.trim().to_lowercase(),
        external_id.trim().to_lowercase()
    )
}

/// Canonical id for a bonus event: `bonus:{type}:{context}`.
/// Example: `bonus:streak:2025-12-25`.
pub fn bonus_id(bonus_type: &str, context: &str) -> String {
    format!(
        "bonus:{}:{}",
        bonus_type.trim().to_lowercase(),
        context.trim().to_lowercase()
    )
}
