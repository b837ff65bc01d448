pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

use crate::application::claim::ClaimUseCase;
use crate::application::scan::{ScanReport, ScanUseCase};
use crate::application::stats::StatsUseCase;
use crate::application::view::{ReadView, ViewUseCase};
use crate::domain::entities::claim_record::ClaimRecord;
use crate::domain::entities::ledger_entry::LedgerEntry;
use crate::domain::error::DomainError;
use crate::domain::ports::claim_history_repository::ClaimHistoryRepository;
use crate::domain::ports::interaction_repository::InteractionRepository;
use crate::domain::ports::ledger_repository::{LedgerRepository, TxOutcome};
use crate::domain::values::progression::PlayerStats;
use crate::domain::values::transaction_type::TransactionType;
use crate::infrastructure::cache::OfferCache;
use crate::infrastructure::miners::epic::EpicMiner;
use crate::infrastructure::miners::scout::ScoutMiner;
use crate::infrastructure::miners::steam::SteamMiner;
use crate::infrastructure::miners::Miner;
use crate::infrastructure::sqlite::history_repo::SqliteHistoryRepo;
use crate::infrastructure::sqlite::interaction_repo::SqliteInteractionRepo;
use crate::infrastructure::sqlite::ledger_repo::SqliteLedgerRepo;
use crate::infrastructure::sqlite::migrations::run_migrations;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::Serialize;
use std::sync::Arc;

/// Result of the claim endpoint: deterministic "already claimed" or
/// "freshly claimed", always carrying the recomputed read view.
#[derive(Debug, Serialize)]
pub struct ClaimOutcome {
    pub already_opened: bool,
    pub state: ReadView,
}

pub struct LootRadar {
    scan_uc: ScanUseCase,
    claim_uc: ClaimUseCase,
    view_uc: ViewUseCase,
    stats_uc: StatsUseCase,
    ledger: Arc<dyn LedgerRepository>,
    history: Arc<dyn ClaimHistoryRepository>,
}

impl LootRadar {
    /// Wire the full miner roster against the given database path.
    pub fn new(db_path: &str) -> Result<Self, DomainError> {
        let miners: Vec<Arc<dyn Miner>> = vec![
            Arc::new(EpicMiner::new()),
            Arc::new(SteamMiner::new()),
            Arc::new(ScoutMiner::new()),
        ];
        Self::with_miners(db_path, miners)
    }

    pub fn with_miners(
        db_path: &str,
        miners: Vec<Arc<dyn Miner>>,
    ) -> Result<Self, DomainError> {
        let open = |path: &str| -> Result<Connection, DomainError> {
            let conn = Connection::open(path)
                .map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
            conn.pragma_update(None, "journal_mode", "WAL")
                .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
            run_migrations(&conn)?;
            Ok(conn)
        };

        let ledger: Arc<dyn LedgerRepository> = Arc::new(SqliteLedgerRepo::new(open(db_path)?));
        let interactions: Arc<dyn InteractionRepository> =
            Arc::new(SqliteInteractionRepo::new(open(db_path)?));
        let history: Arc<dyn ClaimHistoryRepository> =
            Arc::new(SqliteHistoryRepo::new(open(db_path)?));
        let cache = Arc::new(OfferCache::new());

        Ok(Self {
            scan_uc: ScanUseCase::new(miners, cache.clone()),
            claim_uc: ClaimUseCase::new(
                cache.clone(),
                interactions.clone(),
                history.clone(),
                ledger.clone(),
            ),
            view_uc: ViewUseCase::new(cache, interactions, history.clone(), ledger.clone()),
            stats_uc: StatsUseCase::new(ledger.clone()),
            ledger,
            history,
        })
    }

    /// Run one scan cycle across all miners.
    pub async fn scan(&self) -> ScanReport {
        self.scan_uc.execute().await
    }

    /// The full read view for a user, recomputed from source-of-truth state.
    pub fn state(&self, user_id: &str) -> Result<ReadView, DomainError> {
        self.view_uc.execute(user_id)
    }

    /// Idempotent claim. Errors: NotFound (offer gone from cache), Conflict
    /// (mystery offer), Unprocessable (no store URL).
    pub fn open_offer(&self, user_id: &str, offer_id: &str) -> Result<ClaimOutcome, DomainError> {
        let already_opened = self.claim_uc.execute(user_id, offer_id)?;
        Ok(ClaimOutcome {
            already_opened,
            state: self.view_uc.execute(user_id)?,
        })
    }

    pub fn player_stats(&self, user_id: &str) -> Result<PlayerStats, DomainError> {
        self.stats_uc.player_stats(user_id)
    }

    /// Direct ledger credit/debit with a caller-supplied idempotency
    /// reference (bonuses, redemptions, adjustments).
    pub fn add_transaction(
        &self,
        user_id: &str,
        amount: i64,
        transaction_type: TransactionType,
        reference_id: &str,
        metadata: Option<serde_json::Value>,
        created_at: Option<DateTime<Utc>>,
    ) -> Result<TxOutcome, DomainError> {
        let entry = LedgerEntry::new(
            user_id.to_string(),
            amount,
            transaction_type,
            reference_id.to_string(),
            metadata,
            created_at,
        );
        self.ledger.add_transaction(&entry)
    }

    pub fn balance(&self, user_id: &str) -> Result<i64, DomainError> {
        self.ledger.get_balance(user_id)
    }

    pub fn claim_history(&self, user_id: &str) -> Result<Vec<ClaimRecord>, DomainError> {
        self.history.list(user_id)
    }
}
