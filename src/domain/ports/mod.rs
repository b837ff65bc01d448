pub mod claim_history_repository;
pub mod interaction_repository;
pub mod ledger_repository;
