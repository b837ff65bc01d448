pub mod claim_record;
pub mod ledger_entry;
pub mod offer;
