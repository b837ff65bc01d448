use chrono::{Duration, Utc};
use lootradar::domain::entities::ledger_entry::LedgerEntry;
use lootradar::domain::ports::ledger_repository::{LedgerRepository, TxOutcome};
use lootradar::domain::values::transaction_type::TransactionType;
use lootradar::infrastructure::sqlite::ledger_repo::SqliteLedgerRepo;
use lootradar::infrastructure::sqlite::migrations::run_migrations;
use rusqlite::Connection;
use std::sync::Arc;

fn repo() -> Arc<SqliteLedgerRepo> {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    Arc::new(SqliteLedgerRepo::new(conn))
}

fn entry(user: &str, amount: i64, tx: TransactionType, reference: &str) -> LedgerEntry {
    LedgerEntry::new(user.to_string(), amount, tx, reference.to_string(), None, None)
}

#[test]
fn test_duplicate_reference_is_skipped_not_error() {
    let repo = repo();
    let first = repo
        .add_transaction(&entry("u1", 100, TransactionType::Earn, "claim:steam:1"))
        .unwrap();
    assert!(matches!(first, TxOutcome::Recorded { .. }));

    let second = repo
        .add_transaction(&entry("u1", 100, TransactionType::Earn, "claim:steam:1"))
        .unwrap();
    assert_eq!(second, TxOutcome::Skipped);

    assert_eq!(repo.get_balance("u1").unwrap(), 100);
}

#[test]
fn test_concurrent_same_reference_commits_exactly_once() {
    let repo = repo();
    let mut handles = Vec::new();
    for _ in 0..5 {
        let repo = repo.clone();
        handles.push(std::thread::spawn(move || {
            repo.add_transaction(&entry("u1", 100, TransactionType::Earn, "claim:steam:race"))
                .unwrap()
        }));
    }

    let outcomes: Vec<TxOutcome> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let recorded = outcomes
        .iter()
        .filter(|o| matches!(o, TxOutcome::Recorded { .. }))
        .count();
    assert_eq!(recorded, 1);
    assert_eq!(
        outcomes.iter().filter(|o| **o == TxOutcome::Skipped).count(),
        4
    );
    assert_eq!(repo.get_balance("u1").unwrap(), 100);
}

#[test]
fn test_balance_sums_all_signed_amounts() {
    let repo = repo();
    repo.add_transaction(&entry("u1", 300, TransactionType::Earn, "r1")).unwrap();
    repo.add_transaction(&entry("u1", 200, TransactionType::Bonus, "r2")).unwrap();
    repo.add_transaction(&entry("u1", -150, TransactionType::Redeem, "r3")).unwrap();
    assert_eq!(repo.get_balance("u1").unwrap(), 350);
}

#[test]
fn test_lifetime_earned_ignores_spend_and_negative_adjustments() {
    let repo = repo();
    repo.add_transaction(&entry("u1", 300, TransactionType::Earn, "r1")).unwrap();
    repo.add_transaction(&entry("u1", 50, TransactionType::Adjustment, "r2")).unwrap();
    repo.add_transaction(&entry("u1", -100, TransactionType::Redeem, "r3")).unwrap();
    repo.add_transaction(&entry("u1", -25, TransactionType::Adjustment, "r4")).unwrap();
    assert_eq!(repo.get_lifetime_earned("u1").unwrap(), 350);
    assert_eq!(repo.get_balance("u1").unwrap(), 225);
}

#[test]
fn test_users_are_independent() {
    let repo = repo();
    repo.add_transaction(&entry("u1", 100, TransactionType::Earn, "r1")).unwrap();
    repo.add_transaction(&entry("u2", 40, TransactionType::Earn, "r2")).unwrap();
    assert_eq!(repo.get_balance("u1").unwrap(), 100);
    assert_eq!(repo.get_balance("u2").unwrap(), 40);
}

#[test]
fn test_last_earn_timestamp_tracks_earn_and_bonus_only() {
    let repo = repo();
    assert!(repo.get_last_earn_timestamp("u1").unwrap().is_none());

    let earn_at = Utc::now() - Duration::hours(5);
    let mut e = entry("u1", 100, TransactionType::Earn, "r1");
    e.created_at = earn_at;
    repo.add_transaction(&e).unwrap();

    // A later positive adjustment does not refresh earning activity.
    let mut adj = entry("u1", 10, TransactionType::Adjustment, "r2");
    adj.created_at = Utc::now();
    repo.add_transaction(&adj).unwrap();

    let last = repo.get_last_earn_timestamp("u1").unwrap().unwrap();
    assert!((last - earn_at).num_seconds().abs() < 2);
}

#[test]
fn test_skipped_transaction_never_reflected_in_aggregates() {
    let repo = repo();
    repo.add_transaction(&entry("u1", 100, TransactionType::Earn, "r1")).unwrap();
    // Same reference, different amount: must not change anything.
    let outcome = repo
        .add_transaction(&entry("u1", 9999, TransactionType::Earn, "r1"))
        .unwrap();
    assert_eq!(outcome, TxOutcome::Skipped);
    assert_eq!(repo.get_balance("u1").unwrap(), 100);
    assert_eq!(repo.get_lifetime_earned("u1").unwrap(), 100);
}
