use crate::domain::error::DomainError;
use crate::domain::ports::ledger_repository::LedgerRepository;
use crate::domain::values::progression::{level_for, streak_status, PlayerStats};
use chrono::Utc;
use std::sync::Arc;

/// Derive the HUD metrics from ledger aggregates. Nothing is cached; every
/// read recomputes from the source of truth.
pub fn derive_player_stats(
    ledger: &dyn LedgerRepository,
    user_id: &str,
) -> Result<PlayerStats, DomainError> {
    let balance = ledger.get_balance(user_id)?;
    let lifetime = ledger.get_lifetime_earned(user_id)?;
    let last_earn = ledger.get_last_earn_timestamp(user_id)?;
    Ok(PlayerStats {
        balance,
        level: level_for(lifetime),
        streak: streak_status(last_earn, Utc::now()),
    })
}

pub struct StatsUseCase {
    ledger: Arc<dyn LedgerRepository>,
}

impl StatsUseCase {
    pub fn new(ledger: Arc<dyn LedgerRepository>) -> Self {
        Self { ledger }
    }

    pub fn player_stats(&self, user_id: &str) -> Result<PlayerStats, DomainError> {
        derive_player_stats(self.ledger.as_ref(), user_id)
    }
}
