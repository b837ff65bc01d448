use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), String> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS ledger_entries (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            amount INTEGER NOT NULL,
            transaction_type TEXT NOT NULL CHECK(transaction_type IN ('EARN','REDEEM','ADJUSTMENT','BONUS')),
            reference_id TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL,
            metadata TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_ledger_user_created
        ON ledger_entries(user_id, created_at);

        CREATE TABLE IF NOT EXISTS opened_offers (
            user_id TEXT NOT NULL,
            offer_id TEXT NOT NULL,
            opened_at TEXT NOT NULL,
            PRIMARY KEY (user_id, offer_id)
        );

        CREATE TABLE IF NOT EXISTS claim_history (
            user_id TEXT NOT NULL,
            canonical_id TEXT NOT NULL,
            title TEXT NOT NULL,
            source TEXT NOT NULL,
            store_url TEXT NOT NULL,
            cover_image_url TEXT NOT NULL DEFAULT '',
            rarity TEXT NOT NULL DEFAULT 'COMMON',
            savings REAL NOT NULL DEFAULT 0,
            claimed_at TEXT NOT NULL,
            PRIMARY KEY (user_id, canonical_id)
        );

        CREATE INDEX IF NOT EXISTS idx_history_claimed ON claim_history(user_id, claimed_at);
        ",
    )
    .map_err(|e| format!("Migration failed: {e}"))
}
