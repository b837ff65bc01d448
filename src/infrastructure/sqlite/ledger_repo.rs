use crate::domain::entities::ledger_entry::LedgerEntry;
use crate::domain::error::DomainError;
use crate::domain::ports::ledger_repository::{LedgerRepository, TxOutcome};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, ErrorCode};
use std::sync::Mutex;

pub struct SqliteLedgerRepo {
    conn: Mutex<Connection>,
}

impl SqliteLedgerRepo {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn is_unique_violation(err: &rusqlite::Error) -> bool {
        matches!(
            err,
            rusqlite::Error::SqliteFailure(e, _)
                if e.code == ErrorCode::ConstraintViolation
        )
    }
}

impl LedgerRepository for SqliteLedgerRepo {
    fn add_transaction(&self, entry: &LedgerEntry) -> Result<TxOutcome, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let metadata_json = entry
            .metadata
            .as_ref()
            .map(|m| serde_json::to_string(m))
            .transpose()
            .map_err(|e| DomainError::Database(format!("Failed to encode metadata: {e}")))?;

        let result = conn.execute(
            "INSERT INTO ledger_entries (id, user_id, amount, transaction_type, reference_id, created_at, metadata)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                entry.id,
                entry.user_id,
                entry.amount,
                entry.transaction_type.to_string(),
                entry.reference_id,
                entry.created_at.to_rfc3339(),
                metadata_json,
            ],
        );

        match result {
            Ok(_) => Ok(TxOutcome::Recorded {
                entry_id: entry.id.clone(),
            }),
            // The UNIQUE(reference_id) constraint is the sole idempotency
            // guard; a violation means this reference was already committed.
            Err(e) if Self::is_unique_violation(&e) => Ok(TxOutcome::Skipped),
            Err(e) => Err(DomainError::Database(format!(
                "Failed to add transaction: {e}"
            ))),
        }
    }

    fn get_balance(&self, user_id: &str) -> Result<i64, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM ledger_entries WHERE user_id = ?1",
            params![user_id],
            |row| row.get(0),
        )
        .map_err(|e| DomainError::Database(e.to_string()))
    }

    fn get_lifetime_earned(&self, user_id: &str) -> Result<i64, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.query_row(
            "SELECT COALESCE(SUM(amount), 0)
             FROM ledger_entries
             WHERE user_id = ?1 AND amount > 0
               AND transaction_type IN ('EARN', 'BONUS', 'ADJUSTMENT')",
            params![user_id],
            |row| row.get(0),
        )
        .map_err(|e| DomainError::Database(e.to_string()))
    }

    fn get_last_earn_timestamp(
        &self,
        user_id: &str,
    ) -> Result<Option<DateTime<Utc>>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare(
                "SELECT created_at
                 FROM ledger_entries
                 WHERE user_id = ?1 AND amount > 0
                   AND transaction_type IN ('EARN', 'BONUS')
                 ORDER BY created_at DESC
                 LIMIT 1",
            )
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut rows = stmt
            .query_map(params![user_id], |row| row.get::<_, String>(0))
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(rows.next().and_then(|r| r.ok()).and_then(|s| {
            DateTime::parse_from_rfc3339(&s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        }))
    }
}
