pub mod history_repo;
pub mod interaction_repo;
pub mod ledger_repo;
pub mod migrations;
